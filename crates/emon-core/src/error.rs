//! Unified error types for the energy monitor
//!
//! [`EmonError`] is the common error representation shared by the store
//! clients and the renderers. Layer-specific errors convert into it so the
//! dashboard can report every failure through a single channel.

use thiserror::Error;

/// Unified error type for all energy monitor operations.
#[derive(Error, Debug)]
pub enum EmonError {
    /// I/O errors (local store access, output files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Data validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Document store failures (transport, HTTP status, unreachable backend)
    #[error("Store error: {0}")]
    Store(String),

    /// Generic errors (for wrapping external errors)
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Results using EmonError.
pub type EmonResult<T> = Result<T, EmonError>;

impl From<anyhow::Error> for EmonError {
    fn from(err: anyhow::Error) -> Self {
        EmonError::Other(format!("{err:#}"))
    }
}

impl From<serde_json::Error> for EmonError {
    fn from(err: serde_json::Error) -> Self {
        EmonError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EmonError::Store("connection refused".into());
        assert!(err.to_string().contains("Store error"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: EmonError = io_err.into();
        assert!(matches!(err, EmonError::Io(_)));
    }

    #[test]
    fn test_json_error_is_parse() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: EmonError = json_err.into();
        assert!(matches!(err, EmonError::Parse(_)));
    }

    #[test]
    fn test_anyhow_keeps_context_chain() {
        let err = anyhow::anyhow!("status 503").context("fetching daily_generation_italy");
        let err: EmonError = err.into();
        assert!(matches!(&err, EmonError::Other(_)));
        assert_eq!(err.to_string(), "fetching daily_generation_italy: status 503");
    }
}
