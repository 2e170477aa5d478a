use anyhow::Result;
use league_ingest::cli::ingest::{run, IngestCommandConfig};
use league_ingest::logging::init_tracing;
use league_ingest::util::env as env_util;

#[tokio::main]
async fn main() -> Result<()> {
    env_util::init_env();
    init_tracing("info")?;
    env_util::bootstrap_cli("league-ingest");

    run(IngestCommandConfig::default()).await?;
    Ok(())
}
