pub mod db_counts;
pub mod export;
pub mod ingest;
