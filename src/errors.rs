use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for domain, report, and storage layers.
///
/// Bad *data* (missing categories, unparsable amounts, malformed attachment
/// lists) never produces one of these; it is absorbed by the documented
/// fallback rules. Errors are reserved for bad call contracts: unknown ids,
/// unrecognized range/granularity names, storage failures.
#[derive(Error, Debug)]
pub enum BooksError {
    #[error("Client not found: {0}")]
    ClientNotFound(String),
    #[error("Project not found: {0}")]
    ProjectNotFound(String),
    #[error("Vendor not found: {0}")]
    VendorNotFound(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, BooksError>;

impl From<std::io::Error> for BooksError {
    fn from(err: std::io::Error) -> Self {
        BooksError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for BooksError {
    fn from(err: serde_json::Error) -> Self {
        BooksError::StorageError(err.to_string())
    }
}
