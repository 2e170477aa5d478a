//! Ingestion driver: resolve photos, load the catalogue in one transaction,
//! commit, then export snapshots of the committed state.

use serde::Serialize;
use sqlx::SqliteConnection;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::catalogue::Catalogue;
use crate::database_ops::batch::{self, LoadSummary};
use crate::database_ops::db::Db;
use crate::database_ops::snapshot::{self, ExportReport};
use crate::enrichment::{resolve_all, PhotoBook, PhotoSource, ProfileResolver, ResolverConfig};
use crate::error::IngestResult;
use crate::util::env::{db_url, env_flag, env_opt, env_parse};

pub const DEFAULT_ENRICH_CONCURRENCY: usize = 4;

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub database_url: String,
    pub snapshot_dir: PathBuf,
    pub enrich_concurrency: usize,
    pub enrich_enabled: bool,
    pub max_connections: u32,
}

impl PipelineSettings {
    pub fn from_env() -> Self {
        Self {
            database_url: db_url(),
            snapshot_dir: env_opt("SNAPSHOT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            enrich_concurrency: env_parse("ENRICH_CONCURRENCY", DEFAULT_ENRICH_CONCURRENCY).max(1),
            enrich_enabled: !env_flag("ENRICH_DISABLED", false),
            max_connections: env_parse("DB_MAX_CONNECTIONS", 4u32),
        }
    }
}

/// Everything one run needs, built once by the driver.
#[derive(Clone)]
pub struct PipelineContext {
    pub db: Db,
    /// `None` disables enrichment: no lookups are issued at all.
    pub photos: Option<Arc<dyn PhotoSource>>,
    pub snapshot_dir: PathBuf,
    pub enrich_concurrency: usize,
}

impl PipelineContext {
    pub async fn connect(settings: &PipelineSettings, resolver: ResolverConfig) -> IngestResult<Self> {
        let db = Db::connect(&settings.database_url, settings.max_connections).await?;
        let photos: Option<Arc<dyn PhotoSource>> = if settings.enrich_enabled {
            Some(Arc::new(ProfileResolver::new(resolver)?))
        } else {
            info!("photo enrichment disabled");
            None
        };
        Ok(Self {
            db,
            photos,
            snapshot_dir: settings.snapshot_dir.clone(),
            enrich_concurrency: settings.enrich_concurrency.max(1),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    pub load: LoadSummary,
    pub photos_requested: usize,
    pub photos_found: usize,
    pub export: ExportReport,
}

struct Staged {
    load: LoadSummary,
    photos_requested: usize,
    photos_found: usize,
}

pub struct Pipeline {
    ctx: PipelineContext,
}

impl Pipeline {
    pub fn new(ctx: PipelineContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &PipelineContext {
        &self.ctx
    }

    /// One ingestion run. Any load error rolls back every write of the run;
    /// export problems after commit land in `RunReport::export`.
    #[instrument(skip_all, fields(
        teams = catalogue.teams.len(),
        players = catalogue.players.len(),
        matches = catalogue.matches.len(),
        goals = catalogue.goals.len()
    ))]
    pub async fn run(&self, catalogue: &Catalogue) -> IngestResult<RunReport> {
        self.ctx.db.ensure_schema().await?;

        let mut tx = self.ctx.db.pool.begin().await?;
        let staged = match self.stage(&mut tx, catalogue).await {
            Ok(staged) => staged,
            Err(e) => {
                error!(error = %e, constraint = e.is_constraint_violation(), "ingestion failed, rolling back");
                if let Err(rb) = tx.rollback().await {
                    warn!(error = %rb, "rollback failed");
                }
                return Err(e);
            }
        };
        tx.commit().await?;
        info!("ingestion committed");

        let export = snapshot::export(&self.ctx.db, &self.ctx.snapshot_dir).await;
        if !export.is_complete() {
            error!(failed = export.failed.len(), "snapshot export incomplete; committed data kept");
        }

        Ok(RunReport {
            load: staged.load,
            photos_requested: staged.photos_requested,
            photos_found: staged.photos_found,
            export,
        })
    }

    async fn stage(&self, conn: &mut SqliteConnection, catalogue: &Catalogue) -> IngestResult<Staged> {
        let (photos, photos_requested) = match &self.ctx.photos {
            Some(source) => {
                let requests = batch::plan_enrichment(conn, catalogue).await?;
                let requested = requests.len();
                let book = resolve_all(source.as_ref(), requests, self.ctx.enrich_concurrency).await;
                (book, requested)
            }
            None => (PhotoBook::default(), 0),
        };

        let load = batch::load(conn, &photos, catalogue).await?;
        Ok(Staged {
            load,
            photos_requested,
            photos_found: photos.found(),
        })
    }
}

/// Connect, run once and close the store, whatever the outcome.
pub async fn run_pipeline(
    settings: &PipelineSettings,
    resolver: ResolverConfig,
    catalogue: &Catalogue,
) -> IngestResult<RunReport> {
    let pipeline = Pipeline::new(PipelineContext::connect(settings, resolver).await?);
    let result = pipeline.run(catalogue).await;
    pipeline.context().db.close().await;
    result
}
