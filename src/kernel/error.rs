use thiserror::Error;

use crate::kernel::services::ports::StorageError;
use crate::models::FileStoreError;

/// Failures at the kernel boundary. Each one becomes an error notice.
#[derive(Debug, Error)]
pub enum LabError {
    #[error(transparent)]
    Store(#[from] FileStoreError),
    #[error("{0} must not be empty")]
    EmptyInput(&'static str),
    #[error("deployment failed: {0}")]
    NetworkFailure(String),
    #[error("no file selected")]
    NoSelection,
    #[error("{0} already in progress")]
    Busy(&'static str),
    #[error("submission not found: {0}")]
    SubmissionNotFound(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("async runtime unavailable: {0}")]
    Runtime(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LabError>;
