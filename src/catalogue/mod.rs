//! Ordered bundle of records fed to one ingestion run.
//!
//! Players, matches and goals point at store ids (`team_id`, `match_id`,
//! `player_id`), which an empty store hands out sequentially in catalogue
//! order.

pub mod fixtures;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

use crate::database_ops::models::Position;
use crate::error::{IngestError, IngestResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub name: String,
    pub city: String,
    pub founded: i32,
    pub stadium: String,
}

impl TeamRecord {
    pub fn new(name: &str, city: &str, founded: i32, stadium: &str) -> Self {
        Self {
            name: name.to_string(),
            city: city.to_string(),
            founded,
            stadium: stadium.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub position: Position,
    pub team_id: i64,
    #[serde(default)]
    pub goals: i32,
    #[serde(default = "default_starter")]
    pub is_starter: bool,
}

fn default_starter() -> bool {
    true
}

impl PlayerRecord {
    pub fn new(name: &str, position: Position, team_id: i64, goals: i32, is_starter: bool) -> Self {
        Self {
            name: name.to_string(),
            position,
            team_id,
            goals,
            is_starter,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub home_team_id: i64,
    pub away_team_id: i64,
    #[serde(deserialize_with = "deserialize_match_date")]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub home_score: i32,
    #[serde(default)]
    pub away_score: i32,
}

impl MatchRecord {
    pub fn new(
        home_team_id: i64,
        away_team_id: i64,
        date: NaiveDateTime,
        home_score: i32,
        away_score: i32,
    ) -> Self {
        Self {
            home_team_id,
            away_team_id,
            date,
            home_score,
            away_score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalRecord {
    pub match_id: i64,
    pub player_id: i64,
    pub minute: i32,
}

impl GoalRecord {
    pub fn new(match_id: i64, player_id: i64, minute: i32) -> Self {
        Self {
            match_id,
            player_id,
            minute,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalogue {
    #[serde(default)]
    pub teams: Vec<TeamRecord>,
    #[serde(default)]
    pub players: Vec<PlayerRecord>,
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
    #[serde(default)]
    pub goals: Vec<GoalRecord>,
}

impl Catalogue {
    pub fn from_json_str(raw: &str) -> IngestResult<Self> {
        serde_json::from_str(raw).map_err(|e| IngestError::Catalogue(format!("invalid catalogue json: {e}")))
    }

    pub fn from_json_file(path: &Path) -> IngestResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| IngestError::Catalogue(format!("reading {}: {e}", path.display())))?;
        Self::from_json_str(&raw)
    }

    pub fn record_count(&self) -> usize {
        self.teams.len() + self.players.len() + self.matches.len() + self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }
}

/// Midnight on the given calendar day.
pub fn match_day(year: i32, month: u32, day: u32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day).and_then(|d| d.and_hms_opt(0, 0, 0))
}

const MATCH_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

fn parse_match_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    MATCH_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn deserialize_match_date<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_match_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognised match date {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_catalogue_accepts_all_date_spellings_and_defaults() {
        let raw = r#"{
            "teams": [{"name": "Zenit", "city": "Saint Petersburg", "founded": 1925, "stadium": "Gazprom Arena"}],
            "players": [{"name": "Malcom", "position": "Forward", "team_id": 1}],
            "matches": [
                {"home_team_id": 1, "away_team_id": 2, "date": "2024-07-05", "home_score": 2, "away_score": 1},
                {"home_team_id": 2, "away_team_id": 1, "date": "2024-08-01 19:30:00"},
                {"home_team_id": 1, "away_team_id": 3, "date": "2024-09-01T17:00:00"}
            ]
        }"#;
        let catalogue = Catalogue::from_json_str(raw).unwrap();

        assert_eq!(catalogue.teams[0], TeamRecord::new("Zenit", "Saint Petersburg", 1925, "Gazprom Arena"));
        assert_eq!(catalogue.players[0].goals, 0);
        assert!(catalogue.players[0].is_starter);
        assert_eq!(catalogue.matches[0].date, match_day(2024, 7, 5).unwrap());
        assert_eq!(catalogue.matches[1].home_score, 0);
        assert_eq!(catalogue.matches[1].date.format("%H:%M").to_string(), "19:30");
        assert_eq!(catalogue.matches[2].date.format("%H:%M").to_string(), "17:00");
        assert!(catalogue.goals.is_empty());
        assert_eq!(catalogue.record_count(), 5);
    }

    #[test]
    fn json_position_accepts_any_case() {
        let raw = r#"{"players": [
            {"name": "Malcom", "position": "forward", "team_id": 1},
            {"name": "Andrey Lunev", "position": " GOALKEEPER ", "team_id": 1}
        ]}"#;
        let catalogue = Catalogue::from_json_str(raw).unwrap();
        assert_eq!(catalogue.players[0].position, Position::Forward);
        assert_eq!(catalogue.players[1].position, Position::Goalkeeper);
    }

    #[test]
    fn bad_position_or_date_is_a_catalogue_error() {
        let bad_position = r#"{"players": [{"name": "X", "position": "Winger", "team_id": 1}]}"#;
        assert!(matches!(
            Catalogue::from_json_str(bad_position),
            Err(IngestError::Catalogue(_))
        ));
        let bad_date = r#"{"matches": [{"home_team_id": 1, "away_team_id": 2, "date": "05/07/2024"}]}"#;
        assert!(matches!(
            Catalogue::from_json_str(bad_date),
            Err(IngestError::Catalogue(_))
        ));
    }

    #[test]
    fn missing_file_is_a_catalogue_error() {
        let err = Catalogue::from_json_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
