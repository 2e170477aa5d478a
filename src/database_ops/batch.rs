//! Batch loader: teams, then players, then matches, then goals, all on the
//! caller's connection so one transaction covers the whole catalogue.

use serde::Serialize;
use sqlx::SqliteConnection;
use std::collections::HashSet;
use tracing::{debug, info};

use super::upsert::{
    find_player_id, find_team_id, upsert_goal, upsert_match, upsert_player, upsert_team,
    UpsertOutcome,
};
use crate::catalogue::Catalogue;
use crate::enrichment::{PhotoBook, PhotoRequest};
use crate::error::IngestResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KindTally {
    pub inserted: usize,
    pub skipped: usize,
}

impl KindTally {
    fn record(&mut self, outcome: UpsertOutcome) {
        if outcome.was_inserted() {
            self.inserted += 1;
        } else {
            self.skipped += 1;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub teams: KindTally,
    pub players: KindTally,
    pub matches: usize,
    pub goals: usize,
}

/// Names worth resolving before the insert phase: teams and players that are
/// neither in the store nor already earlier in the catalogue.
pub async fn plan_enrichment(
    conn: &mut SqliteConnection,
    catalogue: &Catalogue,
) -> IngestResult<Vec<PhotoRequest>> {
    let mut requests = Vec::new();

    let mut teams_seen = HashSet::new();
    for team in &catalogue.teams {
        if !teams_seen.insert(team.name.as_str()) {
            continue;
        }
        if find_team_id(conn, &team.name).await?.is_none() {
            requests.push(PhotoRequest::team(&team.name));
        }
    }

    let mut players_seen = HashSet::new();
    for player in &catalogue.players {
        if !players_seen.insert((player.name.as_str(), player.team_id)) {
            continue;
        }
        if find_player_id(conn, &player.name, player.team_id).await?.is_none() {
            requests.push(PhotoRequest::player(&player.name));
        }
    }

    debug!(requests = requests.len(), "enrichment planned");
    Ok(requests)
}

/// Insert phase. Stops at the first error; the caller owns rollback.
pub async fn load(
    conn: &mut SqliteConnection,
    photos: &PhotoBook,
    catalogue: &Catalogue,
) -> IngestResult<LoadSummary> {
    let mut summary = LoadSummary::default();

    for team in &catalogue.teams {
        summary.teams.record(upsert_team(conn, photos, team).await?);
    }
    for player in &catalogue.players {
        summary.players.record(upsert_player(conn, photos, player).await?);
    }
    for m in &catalogue.matches {
        upsert_match(conn, m).await?;
        summary.matches += 1;
    }
    for goal in &catalogue.goals {
        upsert_goal(conn, goal).await?;
        summary.goals += 1;
    }

    info!(
        teams_inserted = summary.teams.inserted,
        teams_skipped = summary.teams.skipped,
        players_inserted = summary.players.inserted,
        players_skipped = summary.players.skipped,
        matches = summary.matches,
        goals = summary.goals,
        "catalogue loaded"
    );
    Ok(summary)
}
