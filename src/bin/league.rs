use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use league_ingest::cli::db_counts::{self, DbCountsConfig, StatsConfig};
use league_ingest::cli::export::{self, ExportCommandConfig};
use league_ingest::cli::ingest::{self, IngestCommandConfig};
use league_ingest::logging::init_tracing;
use league_ingest::util::env;

#[derive(Parser, Debug)]
#[command(name = "league", version, about = "League ingestion admin CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "kebab-case")]
enum Commands {
    /// Load a catalogue, commit it and export snapshots
    Ingest {
        /// JSON catalogue file (defaults to the built-in league)
        #[arg(long)]
        catalogue: Option<PathBuf>,
        /// Optional override for the database URL
        #[arg(long)]
        db_url: Option<String>,
        /// Snapshot output directory (defaults to env SNAPSHOT_DIR or .)
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Skip photo lookups
        #[arg(long, default_value_t = false)]
        no_enrich: bool,
        /// Max photo lookups in flight (defaults to env ENRICH_CONCURRENCY or 4)
        #[arg(long)]
        concurrency: Option<usize>,
    },
    /// Write snapshots of the current store without ingesting
    Export {
        /// Optional override for the database URL
        #[arg(long)]
        db_url: Option<String>,
        /// Snapshot output directory (defaults to env SNAPSHOT_DIR or .)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Print row counts for the league tables
    DbCounts {
        /// Optional override for the database URL
        #[arg(long)]
        db_url: Option<String>,
    },
    /// Print leaderboards and goal averages
    Stats {
        /// Optional override for the database URL
        #[arg(long)]
        db_url: Option<String>,
        /// Rows per leaderboard (defaults to env STATS_LIMIT or 10)
        #[arg(long)]
        limit: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env::init_env();
    init_tracing("info")?;
    env::bootstrap_cli("league");

    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest {
            catalogue,
            db_url,
            out_dir,
            no_enrich,
            concurrency,
        } => {
            ingest::run(IngestCommandConfig {
                catalogue,
                database_url: db_url,
                out_dir,
                no_enrich,
                concurrency,
            })
            .await?;
        }
        Commands::Export { db_url, out_dir } => {
            export::run(ExportCommandConfig {
                database_url: db_url,
                out_dir,
            })
            .await?;
        }
        Commands::DbCounts { db_url } => {
            db_counts::run(DbCountsConfig {
                database_url: db_url,
            })
            .await?;
        }
        Commands::Stats { db_url, limit } => {
            db_counts::run_stats(StatsConfig {
                database_url: db_url,
                limit,
            })
            .await?;
        }
    }

    Ok(())
}
