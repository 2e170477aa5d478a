//! Built-in league catalogue: the default feed when no catalogue file is given.

use super::{match_day, Catalogue, GoalRecord, MatchRecord, PlayerRecord, TeamRecord};
use crate::database_ops::models::Position::{self, Defender, Forward, Goalkeeper, Midfielder};
use crate::error::{IngestError, IngestResult};

const TEAMS: &[(&str, &str, i32, &str)] = &[
    ("Zenit", "Saint Petersburg", 1925, "Gazprom Arena"),
    ("Spartak", "Moscow", 1922, "Otkritie Arena"),
    ("CSKA", "Moscow", 1911, "VEB Arena"),
    ("Lokomotiv", "Moscow", 1922, "RZD Arena"),
    ("Krasnodar", "Krasnodar", 2008, "Krasnodar Stadium"),
    ("Dynamo", "Moscow", 1923, "VTB Arena"),
    ("Rubin", "Kazan", 1958, "Kazan Arena"),
    ("Rostov", "Rostov-on-Don", 1930, "Rostov Arena"),
    ("Akhmat", "Grozny", 1946, "Akhmat Arena"),
    ("Sochi", "Sochi", 2018, "Fisht"),
    ("Ural", "Yekaterinburg", 1930, "Central Stadium"),
    ("Arsenal", "Tula", 1946, "Arsenal"),
    ("Khimki", "Khimki", 1997, "Arena Khimki"),
    ("Orenburg", "Orenburg", 1976, "Gazovik"),
    ("Tambov", "Tambov", 2013, "Spartak"),
    ("Rotor", "Volgograd", 1929, "Volgograd Arena"),
    ("Ufa", "Ufa", 2010, "Neftyanik"),
    ("Torpedo", "Moscow", 1924, "Eduard Streltsov"),
    ("Chertanovo", "Moscow", 1993, "Chertanovo Academy"),
];

// Some names repeat on purpose: the same name under another team_id is a new
// player, the same name under the same team_id is absorbed as a duplicate.
const PLAYERS: &[(&str, Position, i64, i32, bool)] = &[
    ("Artem Dzyuba", Forward, 1, 10, true),
    ("Wilmar Barrios", Midfielder, 1, 5, true),
    ("Malcom", Forward, 1, 8, true),
    ("Daler Kuzyaev", Midfielder, 1, 4, true),
    ("Dejan Lovren", Defender, 1, 1, true),
    ("Sardar Azmoun", Forward, 1, 9, true),
    ("Andrey Lunev", Goalkeeper, 1, 0, false),
    ("Aleksandr Erokhin", Midfielder, 1, 2, false),
    ("Yuri Zhirkov", Defender, 1, 3, false),
    ("Sebastian Driussi", Forward, 1, 7, false),
    ("Dmitri Chistyakov", Defender, 1, 0, false),
    ("Dmitri Shomko", Defender, 1, 0, false),
    ("Mikhail Kerzhakov", Goalkeeper, 1, 0, false),
    ("Dmitri Skopintsev", Defender, 1, 0, false),
    //
    ("Aleksandr Sobolev", Forward, 2, 6, true),
    ("Zelimkhan Bakaev", Midfielder, 2, 7, true),
    ("Jordan Larsson", Forward, 2, 9, true),
    ("Georgi Dzhikiya", Defender, 2, 1, true),
    ("Ilya Kutepov", Defender, 2, 2, false),
    ("Roman Zobnin", Midfielder, 2, 3, true),
    ("Aleksandr Maksimenko", Goalkeeper, 2, 0, true),
    ("Aleksandr Tashaev", Midfielder, 2, 3, false),
    //
    ("Fedor Chalov", Forward, 3, 4, true),
    ("Igor Akinfeev", Goalkeeper, 3, 0, true),
    ("Nikola Vlasic", Midfielder, 3, 3, true),
    ("Mario Fernandes", Defender, 3, 1, true),
    ("Ilzat Akhmetov", Midfielder, 3, 2, true),
    ("Konstantin Maradishvili", Midfielder, 3, 2, false),
    ("Vadim Karpov", Defender, 3, 0, false),
    //
    ("Anton Miranchuk", Midfielder, 4, 2, true),
    ("Grzegorz Krychowiak", Midfielder, 4, 1, true),
    ("Eder", Forward, 4, 3, false),
    ("Maciej Rybus", Defender, 4, 0, true),
    ("Solomon Kverkvelia", Defender, 4, 1, false),
    ("Dmitri Barinov", Midfielder, 4, 2, true),
    ("Guilherme Marinato", Goalkeeper, 4, 0, true),
    //
    ("Marcus Berg", Forward, 5, 5, false),
    ("Remy Cabella", Midfielder, 5, 4, true),
    ("Yuri Gazinsky", Midfielder, 5, 2, true),
    ("Ari", Forward, 5, 3, true),
    ("Cristian Ramirez", Defender, 5, 1, true),
    ("Evgeni Chernov", Defender, 5, 0, false),
    ("Matvei Safonov", Goalkeeper, 5, 0, true),
    //
    ("Clinton N'Jie", Forward, 6, 1, true),
    ("Aleksandr Tashaev", Midfielder, 6, 3, false),
    ("Emanuel Mammana", Defender, 6, 1, true),
    ("Andrei Mostovoy", Midfielder, 6, 2, true),
    ("Sergei Terekhov", Defender, 6, 0, false),
    ("Soslan Dzhanaev", Goalkeeper, 6, 0, true),
    //
    ("Georgi Makhatadze", Midfielder, 7, 1, true),
    ("Aleksandr Gatskan", Midfielder, 7, 2, true),
    ("Egor Sorokin", Defender, 7, 1, true),
    ("Aleksandr Troshechkin", Midfielder, 7, 2, false),
    ("Maksim Osipenko", Defender, 7, 0, false),
    ("Sergei Pesyakov", Goalkeeper, 7, 0, true),
    //
    ("Dmitri Poloz", Forward, 8, 3, true),
    ("Bernard Berisha", Forward, 8, 2, true),
    ("Idriss Diallo", Defender, 8, 1, true),
    ("Ismael Silla", Midfielder, 8, 2, false),
    ("Aleksandr Butenko", Defender, 8, 0, false),
    ("Aleksandr Melnikov", Goalkeeper, 8, 0, true),
    //
    ("Bernard Berisha", Forward, 9, 2, true),
    ("Aleksei Sutormin", Midfielder, 9, 2, true),
    ("Egor Sorokin", Defender, 9, 1, true),
    ("Silvije Begic", Defender, 9, 0, false),
    ("Andrey Lunev", Goalkeeper, 9, 0, true),
    ("Dmitri Tarasov", Midfielder, 9, 1, false),
    ("Igor Konovalov", Midfielder, 9, 1, true),
    //
    ("Aleksei Pomazun", Goalkeeper, 10, 0, true),
    ("Vladimir Granat", Defender, 10, 1, true),
    ("Nikita Chernov", Defender, 10, 0, false),
    ("Erik Bicfalvi", Midfielder, 10, 2, true),
    ("Andrei Panyukov", Forward, 10, 3, true),
    ("Mikhail Merkulov", Defender, 10, 0, false),
    ("Sergei Pryadkin", Midfielder, 10, 1, true),
    //
    ("Aleksei Pomazun", Goalkeeper, 10, 0, true),
    ("Vladimir Granat", Defender, 10, 1, true),
    ("Aleksei Evseev", Midfielder, 10, 2, true),
    ("Roman Emelyanov", Midfielder, 10, 3, true),
    ("Dmitri Zhironkin", Forward, 10, 2, true),
    ("Aleksandr Semakin", Defender, 10, 0, true),
    ("Aleksandr Prudnikov", Forward, 10, 3, true),
    ("Igor Portnyagin", Forward, 10, 1, true),
    ("Vladislav Ignatyev", Midfielder, 10, 1, true),
    ("Kirill Panchenko", Forward, 10, 2, false),
    //
    ("Sergei Tkachev", Midfielder, 11, 1, true),
    ("Aleksandr Lomovitsky", Midfielder, 11, 3, true),
    ("Dmitri Kombarov", Defender, 11, 1, true),
    ("Aleksei Gritsaenko", Defender, 11, 0, true),
    ("Aleksandr Kovalev", Goalkeeper, 11, 0, true),
    ("Igor Smolnikov", Defender, 11, 0, true),
    ("Sergei Ryzhikov", Goalkeeper, 11, 0, true),
    ("Andrei Panyukov", Forward, 11, 3, true),
    ("Dmitri Skopintsev", Defender, 11, 0, true),
    ("Maksim Belyaev", Defender, 11, 0, false),
    //
    ("Dmitri Kuznetsov", Forward, 12, 3, false),
    ("Egor Golenkov", Forward, 12, 4, true),
    ("Andrei Mishchenko", Defender, 12, 2, true),
    ("Ilya Kukharchuk", Midfielder, 12, 3, true),
    ("Aleksandr Filin", Defender, 12, 0, false),
    ("Igor Diveev", Defender, 12, 1, true),
    //
    ("Andrei Eshchenko", Defender, 13, 0, true),
    ("Denis Tkachuk", Midfielder, 13, 1, true),
    ("Aleksandr Prudnikov", Forward, 13, 2, true),
    ("Pavel Nekhaychik", Midfielder, 13, 3, false),
    ("Andrei Malykh", Defender, 13, 0, false),
    ("Mikhail Sivakov", Midfielder, 13, 1, true),
    //
    ("Petr Nechaev", Midfielder, 14, 1, true),
    ("Aleksandr Selikhov", Goalkeeper, 14, 0, true),
    ("Maksim Trusevich", Defender, 14, 0, false),
    ("Artem Fedorov", Forward, 14, 2, true),
    ("Dmitri Kamenshchikov", Midfielder, 14, 1, false),
    ("Ivan Ryzhov", Midfielder, 14, 1, true),
    //
    ("Aleksei Sapogov", Forward, 15, 3, true),
    ("Andrei Tikhonov", Midfielder, 15, 2, true),
    ("Sergei Parshivlyuk", Defender, 15, 1, true),
    ("Denis Glushakov", Midfielder, 15, 1, false),
    ("Artem Mamin", Defender, 15, 0, false),
    ("Igor Gorbatenko", Midfielder, 15, 1, true),
    //
    ("Denis Terentyev", Defender, 16, 0, true),
    ("Aleksandr Kucherov", Midfielder, 16, 1, true),
    ("Ivan Oleynikov", Forward, 16, 2, true),
    ("Mikhail Borodin", Goalkeeper, 16, 0, false),
    ("Evgeni Osipov", Defender, 16, 1, true),
    ("Aleksandr Fomin", Midfielder, 16, 1, false),
    //
    ("Dmitri Sychev", Forward, 17, 4, true),
    ("Aleksandr Pavlenko", Midfielder, 17, 2, true),
    ("Sergei Terekhov", Defender, 17, 1, true),
    ("Igor Lebedenko", Forward, 17, 3, false),
    ("Aleksandr Rybakov", Midfielder, 17, 1, false),
    ("Andrei Kanchelskis", Midfielder, 17, 1, true),
    //
    ("Sergei Lapochkin", Forward, 18, 3, true),
    ("Ivan Savin", Midfielder, 18, 2, true),
    ("Dmitri Polyakov", Defender, 18, 1, true),
    ("Aleksei Kuznetsov", Goalkeeper, 18, 0, true),
    ("Maksim Kovalev", Defender, 18, 0, false),
    ("Vladimir Vorobyev", Midfielder, 18, 1, false),
];

// (home, away, (year, month, day), home_score, away_score)
const MATCHES: &[(i64, i64, (i32, u32, u32), i32, i32)] = &[
    (1, 2, (2024, 7, 5), 2, 1),
    (2, 3, (2024, 7, 10), 1, 1),
    (3, 4, (2024, 7, 15), 0, 3),
    (4, 5, (2024, 7, 20), 2, 2),
    (5, 1, (2024, 7, 25), 1, 4),
    (6, 7, (2024, 7, 30), 0, 1),
    (7, 8, (2024, 8, 5), 3, 3),
    (8, 9, (2024, 8, 10), 2, 2),
    (9, 10, (2024, 8, 15), 1, 1),
    (10, 6, (2024, 8, 20), 1, 0),
    (1, 4, (2024, 8, 25), 2, 2),
    (5, 6, (2024, 8, 30), 1, 3),
    (7, 10, (2024, 9, 5), 2, 1),
    (2, 9, (2024, 9, 10), 3, 0),
    (1, 3, (2024, 9, 15), 0, 2),
    (4, 2, (2024, 9, 20), 1, 1),
    (6, 1, (2024, 9, 25), 2, 3),
    (7, 5, (2024, 9, 30), 1, 2),
    (8, 4, (2024, 10, 5), 2, 3),
    (9, 3, (2024, 10, 10), 0, 1),
    (10, 2, (2024, 10, 15), 1, 2),
    (1, 7, (2024, 10, 20), 3, 1),
    (5, 9, (2024, 10, 25), 2, 2),
    (6, 8, (2024, 10, 30), 1, 1),
    (4, 10, (2024, 11, 5), 0, 3),
    (3, 6, (2024, 11, 10), 1, 2),
    (2, 5, (2024, 11, 15), 2, 1),
    (8, 1, (2024, 11, 20), 0, 4),
    (9, 7, (2024, 11, 25), 1, 1),
    (10, 4, (2024, 11, 30), 2, 2),
    (1, 8, (2024, 12, 5), 3, 0),
    (5, 2, (2024, 12, 10), 1, 2),
    (6, 3, (2024, 12, 15), 0, 1),
    (7, 9, (2024, 12, 20), 2, 3),
    (4, 1, (2024, 12, 25), 1, 2),
    (2, 6, (2024, 12, 30), 3, 1),
];

// Two goals per match; match n is credited to players 2n+8 and 2n+9, with a
// third for match 3 and match 4.
const GOALS: &[(i64, i64, i32)] = &[
    (1, 10, 15),
    (1, 11, 35),
    (2, 12, 20),
    (2, 13, 60),
    (3, 14, 10),
    (3, 15, 45),
    (3, 16, 80),
    (4, 17, 30),
    (4, 18, 55),
    (4, 19, 70),
    (5, 20, 25),
    (5, 21, 50),
    (5, 22, 75),
    (6, 23, 40),
    (6, 24, 85),
    (7, 25, 15),
    (7, 26, 45),
    (7, 27, 65),
    (8, 28, 30),
    (8, 29, 70),
    (9, 30, 25),
    (9, 31, 55),
    (10, 32, 35),
    (10, 33, 65),
    (11, 34, 20),
    (11, 35, 50),
    (12, 36, 25),
    (12, 37, 75),
    (13, 38, 30),
    (13, 39, 55),
    (14, 40, 15),
    (14, 41, 45),
    (15, 42, 35),
    (15, 43, 65),
    (16, 44, 10),
    (16, 45, 50),
    (17, 46, 25),
    (17, 47, 75),
    (18, 48, 30),
    (18, 49, 70),
    (19, 50, 10),
    (19, 51, 55),
    (20, 52, 20),
    (20, 53, 65),
    (21, 54, 25),
    (21, 55, 55),
    (22, 56, 35),
    (22, 57, 70),
    (23, 58, 15),
    (23, 59, 45),
    (24, 60, 35),
    (24, 61, 55),
    (25, 62, 10),
    (25, 63, 50),
    (26, 64, 20),
    (26, 65, 55),
    (27, 66, 30),
    (27, 67, 75),
    (28, 68, 25),
    (28, 69, 70),
    (29, 70, 15),
    (29, 71, 45),
    (30, 72, 35),
    (30, 73, 55),
    (31, 74, 10),
    (31, 75, 50),
    (32, 76, 20),
    (32, 77, 65),
    (33, 78, 25),
    (33, 79, 70),
    (34, 80, 15),
    (34, 81, 55),
    (35, 82, 20),
    (35, 83, 65),
    (36, 84, 25),
    (36, 85, 55),
];

pub fn league_catalogue() -> IngestResult<Catalogue> {
    let teams = TEAMS
        .iter()
        .map(|&(name, city, founded, stadium)| TeamRecord::new(name, city, founded, stadium))
        .collect();
    let players = PLAYERS
        .iter()
        .map(|&(name, position, team_id, goals, starter)| {
            PlayerRecord::new(name, position, team_id, goals, starter)
        })
        .collect();
    let matches = MATCHES
        .iter()
        .map(|&(home, away, (y, m, d), hs, aws)| {
            match_day(y, m, d)
                .map(|date| MatchRecord::new(home, away, date, hs, aws))
                .ok_or_else(|| IngestError::Catalogue(format!("invalid fixture date {y}-{m}-{d}")))
        })
        .collect::<IngestResult<Vec<_>>>()?;
    let goals = GOALS
        .iter()
        .map(|&(match_id, player_id, minute)| GoalRecord::new(match_id, player_id, minute))
        .collect();

    Ok(Catalogue {
        teams,
        players,
        matches,
        goals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn fixture_references_stay_in_range() {
        let catalogue = league_catalogue().unwrap();
        let team_count = catalogue.teams.len() as i64;

        let distinct_players: HashSet<(&str, i64)> = catalogue
            .players
            .iter()
            .map(|p| (p.name.as_str(), p.team_id))
            .collect();
        let player_count = distinct_players.len() as i64;

        assert!(catalogue.players.iter().all(|p| (1..=team_count).contains(&p.team_id)));
        assert!(catalogue
            .matches
            .iter()
            .all(|m| (1..=team_count).contains(&m.home_team_id) && (1..=team_count).contains(&m.away_team_id)));
        let match_count = catalogue.matches.len() as i64;
        assert!(catalogue
            .goals
            .iter()
            .all(|g| (1..=match_count).contains(&g.match_id) && (1..=player_count).contains(&g.player_id)));
    }

    #[test]
    fn fixture_team_names_and_match_keys_are_unique() {
        let catalogue = league_catalogue().unwrap();
        let names: HashSet<_> = catalogue.teams.iter().map(|t| &t.name).collect();
        assert_eq!(names.len(), catalogue.teams.len());

        let keys: HashSet<_> = catalogue
            .matches
            .iter()
            .map(|m| (m.home_team_id, m.away_team_id, m.date))
            .collect();
        assert_eq!(keys.len(), catalogue.matches.len());
    }

    #[test]
    fn fixture_repeats_two_players_within_the_same_team() {
        let catalogue = league_catalogue().unwrap();
        let mut seen = HashSet::new();
        let repeats = catalogue
            .players
            .iter()
            .filter(|p| !seen.insert((p.name.clone(), p.team_id)))
            .count();
        assert_eq!(repeats, 2);
    }
}
