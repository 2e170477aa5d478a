use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::database_ops::db::Db;
use crate::database_ops::snapshot::{self, SnapshotFile};
use crate::util::env as env_util;

#[derive(Debug, Clone, Default)]
pub struct ExportCommandConfig {
    /// Optional override for the database URL.
    pub database_url: Option<String>,
    /// Optional override for SNAPSHOT_DIR.
    pub out_dir: Option<PathBuf>,
}

/// Re-export snapshots of whatever the store currently holds.
pub async fn run(cfg: ExportCommandConfig) -> Result<Vec<SnapshotFile>> {
    env_util::init_env();
    let db_url = cfg.database_url.unwrap_or_else(env_util::db_url);
    let out_dir = cfg
        .out_dir
        .or_else(|| env_util::env_opt("SNAPSHOT_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));

    let db = Db::connect(&db_url, 2)
        .await
        .with_context(|| format!("connecting to {db_url}"))?;
    db.ensure_schema().await?;
    let report = snapshot::export(&db, &out_dir).await;
    db.close().await;

    for file in &report.written {
        println!("wrote {} ({} records)", file.path.display(), file.records);
    }
    Ok(report.into_result()?)
}
