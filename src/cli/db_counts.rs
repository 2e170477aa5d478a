use anyhow::{Context, Result};
use std::fmt::Write as _;

use crate::database_ops::db::Db;
use crate::database_ops::stats::{league_stats, table_counts, LeagueStats, TableCounts};
use crate::util::env as env_util;

#[derive(Debug, Clone, Default)]
pub struct DbCountsConfig {
    /// Optional override for the database URL.
    pub database_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct StatsConfig {
    /// Optional override for the database URL.
    pub database_url: Option<String>,
    /// Rows per leaderboard (defaults to env STATS_LIMIT or 10).
    pub limit: Option<i64>,
}

async fn open(database_url: Option<String>) -> Result<Db> {
    env_util::init_env();
    let db_url = database_url.unwrap_or_else(env_util::db_url);
    let db = Db::connect(&db_url, 2)
        .await
        .with_context(|| format!("connecting to {db_url}"))?;
    db.ensure_schema().await?;
    Ok(db)
}

pub fn render_counts(counts: &TableCounts) -> String {
    let mut out = String::new();
    writeln!(out, "DB COUNTS SUMMARY:").ok();
    writeln!(out, "teams: {}", counts.teams).ok();
    writeln!(out, "players: {}", counts.players).ok();
    writeln!(out, "matches: {}", counts.matches).ok();
    writeln!(out, "goals: {}", counts.goals).ok();
    out
}

pub fn render_stats(stats: &LeagueStats) -> String {
    let mut out = String::new();
    writeln!(out, "LEAGUE STATS:").ok();
    writeln!(
        out,
        "matches: {}, goals: {}, avg goals/match: {:.2}",
        stats.total_matches, stats.total_goals, stats.avg_goals_per_match
    )
    .ok();
    writeln!(out, "top teams:").ok();
    for (rank, team) in stats.top_teams.iter().enumerate() {
        writeln!(out, "  {:>2}. {} ({}) {} pts", rank + 1, team.name, team.city, team.points).ok();
    }
    writeln!(out, "top scorers:").ok();
    for (rank, player) in stats.top_scorers.iter().enumerate() {
        writeln!(
            out,
            "  {:>2}. {} [{}] {} goals",
            rank + 1,
            player.name,
            player.position,
            player.goals
        )
        .ok();
    }
    out
}

pub async fn run(cfg: DbCountsConfig) -> Result<TableCounts> {
    let db = open(cfg.database_url).await?;
    let counts = table_counts(&db).await;
    db.close().await;
    let counts = counts?;
    print!("{}", render_counts(&counts));
    Ok(counts)
}

pub async fn run_stats(cfg: StatsConfig) -> Result<LeagueStats> {
    let limit = cfg
        .limit
        .unwrap_or_else(|| env_util::env_parse("STATS_LIMIT", 10i64))
        .max(1);
    let db = open(cfg.database_url).await?;
    let stats = league_stats(&db, limit).await;
    db.close().await;
    let stats = stats?;
    print!("{}", render_stats(&stats));
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database_ops::models::{PlayerRow, Position, TeamRow};

    #[test]
    fn counts_render_one_line_per_table() {
        let text = render_counts(&TableCounts {
            teams: 19,
            players: 135,
            matches: 36,
            goals: 72,
        });
        assert!(text.contains("teams: 19\n"));
        assert!(text.contains("goals: 72\n"));
    }

    #[test]
    fn stats_render_leaderboards() {
        let stats = LeagueStats {
            top_teams: vec![TeamRow {
                id: 1,
                name: "Zenit".into(),
                city: "Saint Petersburg".into(),
                founded: 1925,
                stadium: "Gazprom Arena".into(),
                points: 3,
                photo_url: None,
            }],
            top_scorers: vec![PlayerRow {
                id: 1,
                name: "Artem Dzyuba".into(),
                position: Position::Forward,
                goals: 10,
                team_id: 1,
                photo_url: None,
                is_starter: true,
            }],
            total_goals: 3,
            total_matches: 2,
            avg_goals_per_match: 1.5,
        };
        let text = render_stats(&stats);
        assert!(text.contains("avg goals/match: 1.50"));
        assert!(text.contains(" 1. Zenit (Saint Petersburg) 3 pts"));
        assert!(text.contains(" 1. Artem Dzyuba [Forward] 10 goals"));
    }

    #[tokio::test]
    async fn counts_on_a_fresh_file_store_are_zero() {
        let dir = tempfile::tempdir().unwrap();
        let counts = run(DbCountsConfig {
            database_url: Some(format!(
                "sqlite://{}?mode=rwc",
                dir.path().join("league.db").display()
            )),
        })
        .await
        .unwrap();
        assert_eq!(counts, TableCounts::default());
    }
}
