use serde::Serialize;

use super::db::Db;
use super::models::{PlayerRow, TeamRow};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableCounts {
    pub teams: i64,
    pub players: i64,
    pub matches: i64,
    pub goals: i64,
}

pub async fn table_counts(db: &Db) -> Result<TableCounts, sqlx::Error> {
    macro_rules! count {
        ($table:literal) => {
            sqlx::query_scalar::<_, i64>(concat!("SELECT COUNT(*) FROM ", $table))
                .fetch_one(&db.pool)
                .await?
        };
    }

    Ok(TableCounts {
        teams: count!("teams"),
        players: count!("players"),
        matches: count!("matches"),
        goals: count!("goals"),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueStats {
    pub top_teams: Vec<TeamRow>,
    pub top_scorers: Vec<PlayerRow>,
    /// Sum of home and away scores over every match.
    pub total_goals: i64,
    pub total_matches: i64,
    pub avg_goals_per_match: f64,
}

/// Standings-style aggregates. Ties fall back to insertion order.
pub async fn league_stats(db: &Db, limit: i64) -> Result<LeagueStats, sqlx::Error> {
    let top_teams: Vec<TeamRow> = sqlx::query_as(
        "SELECT id, name, city, founded, stadium, points, photo_url FROM teams \
         ORDER BY points DESC, id ASC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(&db.pool)
    .await?;

    let top_scorers: Vec<PlayerRow> = sqlx::query_as(
        "SELECT id, name, position, goals, team_id, photo_url, is_starter FROM players \
         ORDER BY goals DESC, id ASC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(&db.pool)
    .await?;

    let (total_goals, total_matches): (i64, i64) = sqlx::query_as(
        "SELECT COALESCE(SUM(home_score + away_score), 0), COUNT(*) FROM matches",
    )
    .fetch_one(&db.pool)
    .await?;

    let avg_goals_per_match = if total_matches > 0 {
        total_goals as f64 / total_matches as f64
    } else {
        0.0
    };

    Ok(LeagueStats {
        top_teams,
        top_scorers,
        total_goals,
        total_matches,
        avg_goals_per_match,
    })
}
