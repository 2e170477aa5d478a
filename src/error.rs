use sqlx::error::ErrorKind;
use thiserror::Error;

pub type IngestResult<T> = std::result::Result<T, IngestError>;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("{entity} conflicts with an existing row: {key}")]
    Conflict { entity: &'static str, key: String },
    #[error("{entity} references a missing row: {key}")]
    MissingReference { entity: &'static str, key: String },
    #[error("persistence: {0}")]
    Persistence(#[from] sqlx::Error),
    #[error("http client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("catalogue: {0}")]
    Catalogue(String),
    #[error("snapshot export incomplete after commit: {0}")]
    Export(String),
}

impl IngestError {
    /// True for errors raised by the store's own constraints.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            IngestError::Conflict { .. } | IngestError::MissingReference { .. }
        )
    }
}

/// Map a failed write into the taxonomy: unique and foreign-key violations get
/// their own variants, everything else stays a persistence error.
pub(crate) fn classify_write_error(
    err: sqlx::Error,
    entity: &'static str,
    key: impl FnOnce() -> String,
) -> IngestError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.kind() {
            ErrorKind::UniqueViolation => return IngestError::Conflict { entity, key: key() },
            ErrorKind::ForeignKeyViolation => {
                return IngestError::MissingReference { entity, key: key() }
            }
            _ => {}
        }
    }
    IngestError::Persistence(err)
}
