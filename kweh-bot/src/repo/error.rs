use deadpool_postgres::{BuildError, PoolError};
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

// RepoError is the lowest level error type, wrapping errors from the catalog and cache backends.
// It does not wrap any higher level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    /// Record not found
    #[error("not found")]
    NotFound,

    /// Upstream answered with a non-success status
    #[error("unexpected status: {0}")]
    Status(u16),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error(transparent)]
    Pg(#[from] tokio_postgres::Error),

    #[error(transparent)]
    Migrate(#[from] refinery::Error),

    #[error(transparent)]
    Build(#[from] BuildError),
}
