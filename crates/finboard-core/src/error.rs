//! Error types for finboard-core
//!
//! The query engine itself never fails; these errors come from loading
//! data, driving the view-state reducers and talking to data sources.

use std::io;
use thiserror::Error;

/// Main error type for finboard-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("{kind} not found: {id}")]
    RecordNotFound { kind: String, id: String },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("Invalid transition: {action} while {state}")]
    InvalidTransition { action: String, state: String },

    #[error("Data source error: {message}")]
    DataSource { message: String },

    #[error("Bank connection failed: {message}")]
    Connection { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<serde_json::Error> for CoreError {
    fn from(error: serde_json::Error) -> Self {
        CoreError::InvalidFormat {
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let error = CoreError::RecordNotFound {
            kind: "Account".to_string(),
            id: "9".to_string(),
        };
        assert_eq!(error.to_string(), "Account not found: 9");

        let error = CoreError::InvalidTransition {
            action: "begin_connect".to_string(),
            state: "connecting to Chase".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid transition: begin_connect while connecting to Chase");
    }

    #[test]
    fn test_json_error_is_invalid_format() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: CoreError = json_error.into();
        assert!(matches!(error, CoreError::InvalidFormat { .. }));
    }
}
