//! Per-entity writes. Teams and players are skip-on-duplicate; matches and
//! goals are plain inserts that surface the store's own constraint errors.

use sqlx::SqliteConnection;
use tracing::{debug, info, warn};

use crate::catalogue::{GoalRecord, MatchRecord, PlayerRecord, TeamRecord};
use crate::enrichment::{PhotoBook, SubjectKind};
use crate::error::{classify_write_error, IngestResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted(i64),
    /// Row already existed; carries the existing id.
    Skipped(i64),
}

impl UpsertOutcome {
    pub fn was_inserted(self) -> bool {
        matches!(self, UpsertOutcome::Inserted(_))
    }
}

pub async fn find_team_id(conn: &mut SqliteConnection, name: &str) -> IngestResult<Option<i64>> {
    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM teams WHERE name = ?")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(id)
}

pub async fn find_player_id(
    conn: &mut SqliteConnection,
    name: &str,
    team_id: i64,
) -> IngestResult<Option<i64>> {
    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM players WHERE name = ? AND team_id = ?")
        .bind(name)
        .bind(team_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(id)
}

pub async fn upsert_team(
    conn: &mut SqliteConnection,
    photos: &PhotoBook,
    team: &TeamRecord,
) -> IngestResult<UpsertOutcome> {
    if let Some(id) = find_team_id(conn, &team.name).await? {
        warn!(team = %team.name, id, "team already exists, skipping");
        return Ok(UpsertOutcome::Skipped(id));
    }

    let enrichment = photos.enrichment(SubjectKind::Team, &team.name);
    let res = sqlx::query(
        "INSERT INTO teams (name, city, founded, stadium, photo_url) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&team.name)
    .bind(&team.city)
    .bind(team.founded)
    .bind(&team.stadium)
    .bind(enrichment.photo_url())
    .execute(&mut *conn)
    .await
    .map_err(|e| classify_write_error(e, "team", || team.name.clone()))?;

    let id = res.last_insert_rowid();
    info!(team = %team.name, id, photo = %enrichment, "team added");
    Ok(UpsertOutcome::Inserted(id))
}

pub async fn upsert_player(
    conn: &mut SqliteConnection,
    photos: &PhotoBook,
    player: &PlayerRecord,
) -> IngestResult<UpsertOutcome> {
    if let Some(id) = find_player_id(conn, &player.name, player.team_id).await? {
        warn!(player = %player.name, team_id = player.team_id, id, "player already exists, skipping");
        return Ok(UpsertOutcome::Skipped(id));
    }

    let enrichment = photos.enrichment(SubjectKind::Player, &player.name);
    let res = sqlx::query(
        "INSERT INTO players (name, position, goals, team_id, photo_url, is_starter) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&player.name)
    .bind(player.position.as_str())
    .bind(player.goals)
    .bind(player.team_id)
    .bind(enrichment.photo_url())
    .bind(player.is_starter)
    .execute(&mut *conn)
    .await
    .map_err(|e| {
        classify_write_error(e, "player", || format!("{} (team {})", player.name, player.team_id))
    })?;

    let id = res.last_insert_rowid();
    info!(player = %player.name, team_id = player.team_id, id, photo = %enrichment, "player added");
    Ok(UpsertOutcome::Inserted(id))
}

/// Unconditional insert; a repeated (home, away, date) is a `Conflict`.
pub async fn upsert_match(conn: &mut SqliteConnection, m: &MatchRecord) -> IngestResult<i64> {
    let res = sqlx::query(
        "INSERT INTO matches (home_team_id, away_team_id, date, home_score, away_score) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(m.home_team_id)
    .bind(m.away_team_id)
    .bind(m.date)
    .bind(m.home_score)
    .bind(m.away_score)
    .execute(&mut *conn)
    .await
    .map_err(|e| {
        classify_write_error(e, "match", || {
            format!("{} vs {} on {}", m.home_team_id, m.away_team_id, m.date)
        })
    })?;

    let id = res.last_insert_rowid();
    debug!(id, home = m.home_team_id, away = m.away_team_id, "match added");
    Ok(id)
}

/// Unconditional insert; nothing stops the same goal landing twice.
pub async fn upsert_goal(conn: &mut SqliteConnection, g: &GoalRecord) -> IngestResult<i64> {
    let res = sqlx::query("INSERT INTO goals (match_id, player_id, minute) VALUES (?, ?, ?)")
        .bind(g.match_id)
        .bind(g.player_id)
        .bind(g.minute)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            classify_write_error(e, "goal", || {
                format!("match {} player {} minute {}", g.match_id, g.player_id, g.minute)
            })
        })?;

    let id = res.last_insert_rowid();
    debug!(id, match_id = g.match_id, player_id = g.player_id, "goal added");
    Ok(id)
}
