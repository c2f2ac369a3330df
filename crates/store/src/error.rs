//! Store error model.

use stockbook_core::DomainError;
use thiserror::Error;

/// Result type used across the storage layer.
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A domain rule rejected the operation before it reached storage.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The underlying storage engine failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
