use std::io;
use thiserror::Error;

/// Application-wide error type, consolidating all possible errors into a single enum.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents errors specific to the actor system, such as a closed channel.
    #[error("Actor error: {0}")]
    Actor(String),

    /// Represents data validation errors (e.g., an empty chat message).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., a malformed environment variable).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents errors from operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// A quick action identifier that is not part of the fixed action set.
    #[error("Unknown quick action: {0}")]
    UnknownAction(String),
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::Io(e) => AppError::Io(io::Error::new(e.kind(), e.to_string())),
            AppError::Actor(s) => AppError::Actor(s.clone()),
            AppError::Validation(s) => AppError::Validation(s.clone()),
            AppError::Config(s) => AppError::Config(s.clone()),
            AppError::Timeout(s) => AppError::Timeout(s.clone()),
            AppError::UnknownAction(s) => AppError::UnknownAction(s.clone()),
        }
    }
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout(format!("Operation timed out: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::Validation(format!("Date parse error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AppError::Validation("Message cannot be empty".to_string());
        assert_eq!(err.to_string(), "Validation error: Message cannot be empty");

        let err = AppError::UnknownAction("dance".to_string());
        assert_eq!(err.to_string(), "Unknown quick action: dance");
    }

    #[test]
    fn test_clone_preserves_variant() {
        let err = AppError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed"));
        match err.clone() {
            AppError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("Expected Io, got {:?}", other),
        }
    }

    #[test]
    fn test_date_parse_maps_to_validation() {
        let err: AppError = chrono::NaiveDate::parse_from_str("02/11/2026", "%Y-%m-%d")
            .unwrap_err()
            .into();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
