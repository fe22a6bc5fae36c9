//! Error types for the aggregation pipeline.

use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The input CSV is missing, unreadable or malformed. Fatal to the session.
    #[error("data source unavailable: {path}: {reason}")]
    DataSourceUnavailable { path: String, reason: String },

    /// A caller violated a documented precondition.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    pub(crate) fn unavailable(path: &str, reason: impl ToString) -> Self {
        Error::DataSourceUnavailable {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}
