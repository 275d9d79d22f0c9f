//! Error types for dashboard services.

use emon_core::EmonError;
use thiserror::Error;

/// Result type for dashboard service operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from loading or rendering the dashboard.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading from the document store failed.
    #[error("store error: {0}")]
    Store(#[from] EmonError),

    /// A fetch task panicked or was cancelled.
    #[error("fetch task failed: {0}")]
    Task(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(e: toml::ser::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(e: tokio::task::JoinError) -> Self {
        Error::Task(e.to_string())
    }
}
