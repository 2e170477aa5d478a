use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::catalogue::{fixtures::league_catalogue, Catalogue};
use crate::enrichment::ResolverConfig;
use crate::pipeline::{run_pipeline, PipelineSettings, RunReport};
use crate::util::env as env_util;

const CONFIG_KEYS: &[&str] = &[
    "DATABASE_URL",
    "SNAPSHOT_DIR",
    "ENRICH_CONCURRENCY",
    "ENRICH_DISABLED",
    "RESOLVER_BASE_URL",
    "RESOLVER_USER_AGENT",
    "RESOLVER_TIMEOUT_SECS",
    "RESOLVER_PROXY",
];

#[derive(Debug, Clone, Default)]
pub struct IngestCommandConfig {
    /// JSON catalogue to load instead of the built-in league.
    pub catalogue: Option<PathBuf>,
    /// Optional override for the database URL.
    pub database_url: Option<String>,
    /// Optional override for the snapshot directory.
    pub out_dir: Option<PathBuf>,
    /// Skip photo lookups entirely.
    pub no_enrich: bool,
    /// Override ENRICH_CONCURRENCY.
    pub concurrency: Option<usize>,
}

impl IngestCommandConfig {
    fn settings(&self) -> PipelineSettings {
        let mut settings = PipelineSettings::from_env();
        if let Some(url) = &self.database_url {
            settings.database_url = url.clone();
        }
        if let Some(dir) = &self.out_dir {
            settings.snapshot_dir = dir.clone();
        }
        if self.no_enrich {
            settings.enrich_enabled = false;
        }
        if let Some(n) = self.concurrency {
            settings.enrich_concurrency = n.max(1);
        }
        settings
    }

    fn catalogue(&self) -> Result<Catalogue> {
        match &self.catalogue {
            Some(path) => Catalogue::from_json_file(path)
                .with_context(|| format!("loading catalogue {}", path.display())),
            None => league_catalogue().context("building built-in league catalogue"),
        }
    }
}

pub async fn run(cfg: IngestCommandConfig) -> Result<RunReport> {
    env_util::init_env();
    env_util::log_config_snapshot("ingest", CONFIG_KEYS);

    let settings = cfg.settings();
    let catalogue = cfg.catalogue()?;
    if catalogue.is_empty() {
        warn!("catalogue has no records; only the snapshots will be refreshed");
    }
    info!(
        records = catalogue.record_count(),
        out_dir = %settings.snapshot_dir.display(),
        enrich = settings.enrich_enabled,
        concurrency = settings.enrich_concurrency,
        "starting ingestion"
    );

    let report = run_pipeline(&settings, ResolverConfig::from_env(), &catalogue)
        .await
        .context("ingestion run failed")?;

    println!(
        "teams: +{} (skipped {}), players: +{} (skipped {}), matches: +{}, goals: +{}, photos: {}/{}",
        report.load.teams.inserted,
        report.load.teams.skipped,
        report.load.players.inserted,
        report.load.players.skipped,
        report.load.matches,
        report.load.goals,
        report.photos_found,
        report.photos_requested,
    );
    for file in &report.export.written {
        println!("wrote {} ({} records)", file.path.display(), file.records);
    }
    report.export.clone().into_result()?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn json_catalogue_file_drives_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let catalogue_path = dir.path().join("catalogue.json");
        std::fs::write(
            &catalogue_path,
            r#"{"teams": [{"name": "Zenit", "city": "Saint Petersburg", "founded": 1925, "stadium": "Gazprom Arena"}],
                "players": [{"name": "Malcom", "position": "Forward", "team_id": 1, "goals": 8}]}"#,
        )
        .unwrap();

        let report = run(IngestCommandConfig {
            catalogue: Some(catalogue_path),
            database_url: Some(format!(
                "sqlite://{}?mode=rwc",
                dir.path().join("league.db").display()
            )),
            out_dir: Some(dir.path().join("snapshots")),
            no_enrich: true,
            concurrency: None,
        })
        .await
        .unwrap();

        assert_eq!(report.load.teams.inserted, 1);
        assert_eq!(report.load.players.inserted, 1);
        assert!(dir.path().join("snapshots").join("players.json").exists());
    }

    #[tokio::test]
    async fn blocked_snapshot_dir_fails_the_command() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file").unwrap();
        let catalogue_path = dir.path().join("catalogue.json");
        std::fs::write(&catalogue_path, r#"{"teams": []}"#).unwrap();

        let err = run(IngestCommandConfig {
            catalogue: Some(catalogue_path),
            database_url: Some(format!(
                "sqlite://{}?mode=rwc",
                dir.path().join("league.db").display()
            )),
            out_dir: Some(blocker),
            no_enrich: true,
            concurrency: None,
        })
        .await
        .unwrap_err();
        assert!(err.to_string().contains("snapshot export incomplete"), "{err:#}");
    }
}
