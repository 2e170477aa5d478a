//! Committed-state snapshots: one pretty-printed JSON array per table.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info};

use super::db::Db;
use super::models::{GoalRow, MatchRow, PlayerRow, TeamRow};
use crate::error::{IngestError, IngestResult};

pub const TEAMS_FILE: &str = "teams.json";
pub const PLAYERS_FILE: &str = "players.json";
pub const MATCHES_FILE: &str = "matches.json";
pub const GOALS_FILE: &str = "goals.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotFile {
    pub path: PathBuf,
    pub records: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Per-file outcome of one export. Every file is attempted even when an
/// earlier one fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub written: Vec<SnapshotFile>,
    pub failed: Vec<ExportFailure>,
}

impl ExportReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn into_result(self) -> IngestResult<Vec<SnapshotFile>> {
        if self.is_complete() {
            return Ok(self.written);
        }
        let detail = self
            .failed
            .iter()
            .map(|f| format!("{}: {}", f.path.display(), f.reason))
            .collect::<Vec<_>>()
            .join("; ");
        Err(IngestError::Export(detail))
    }
}

/// Four-space indented JSON with non-ASCII text kept as-is.
pub fn render_json<T: Serialize>(rows: &[T]) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    rows.serialize(&mut ser)?;
    Ok(buf)
}

async fn write_table<T>(db: &Db, out_dir: &Path, file: &str, sql: &str, report: &mut ExportReport)
where
    T: Serialize + Send + Unpin + for<'r> sqlx::FromRow<'r, sqlx::sqlite::SqliteRow>,
{
    let path = out_dir.join(file);
    let outcome = async {
        let rows: Vec<T> = sqlx::query_as(sql)
            .fetch_all(&db.pool)
            .await
            .map_err(|e| format!("query failed: {e}"))?;
        let bytes = render_json(&rows).map_err(|e| format!("serialize failed: {e}"))?;
        fs::write(&path, bytes)
            .await
            .map_err(|e| format!("write failed: {e}"))?;
        Ok::<usize, String>(rows.len())
    }
    .await;

    match outcome {
        Ok(records) => {
            info!(path = %path.display(), records, "snapshot written");
            report.written.push(SnapshotFile { path, records });
        }
        Err(reason) => {
            error!(path = %path.display(), error = %reason, "snapshot failed");
            report.failed.push(ExportFailure { path, reason });
        }
    }
}

/// Write teams, players, matches and goals under `out_dir`, replacing any
/// previous files. Rows come out in id order.
pub async fn export(db: &Db, out_dir: &Path) -> ExportReport {
    let mut report = ExportReport::default();

    if let Err(e) = fs::create_dir_all(out_dir).await {
        let reason = format!("create dir failed: {e}");
        error!(dir = %out_dir.display(), error = %reason, "snapshot directory unavailable");
        for file in [TEAMS_FILE, PLAYERS_FILE, MATCHES_FILE, GOALS_FILE] {
            report.failed.push(ExportFailure {
                path: out_dir.join(file),
                reason: reason.clone(),
            });
        }
        return report;
    }

    write_table::<TeamRow>(
        db,
        out_dir,
        TEAMS_FILE,
        "SELECT id, name, city, founded, stadium, points, photo_url FROM teams ORDER BY id",
        &mut report,
    )
    .await;
    write_table::<PlayerRow>(
        db,
        out_dir,
        PLAYERS_FILE,
        "SELECT id, name, position, goals, team_id, photo_url, is_starter FROM players ORDER BY id",
        &mut report,
    )
    .await;
    write_table::<MatchRow>(
        db,
        out_dir,
        MATCHES_FILE,
        "SELECT id, home_team_id, away_team_id, date, home_score, away_score FROM matches ORDER BY id",
        &mut report,
    )
    .await;
    write_table::<GoalRow>(
        db,
        out_dir,
        GOALS_FILE,
        "SELECT id, match_id, player_id, minute FROM goals ORDER BY id",
        &mut report,
    )
    .await;

    report
}
