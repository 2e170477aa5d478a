pub mod catalogue;
pub mod cli;
pub mod database_ops;
pub mod enrichment;
pub mod error;
pub mod logging;
pub mod pipeline;

pub mod util {
    pub mod env;
}

pub use error::{IngestError, IngestResult};
pub use pipeline::{run_pipeline, Pipeline, PipelineContext, PipelineSettings, RunReport};
