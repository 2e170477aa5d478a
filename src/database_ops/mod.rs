pub mod batch;
pub mod db;
pub mod models;
pub mod snapshot;
pub mod stats;
pub mod upsert;
