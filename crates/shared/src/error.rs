//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Account or instrument configuration is invalid (e.g. a closing day of 0).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input validation failed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced record was not found in the snapshot.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An engine invariant did not hold.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Reading input failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// Input could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) => 78,
            Self::Validation(_) | Self::Serialization(_) => 65,
            Self::NotFound(_) => 66,
            Self::Io(_) => 74,
            Self::InvariantViolation(_) | Self::Internal(_) => 70,
        }
    }

    /// Returns the stable error code for machine-readable output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvariantViolation(_) => "INVARIANT_VIOLATION",
            Self::Io(_) => "IO_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(AppError::Configuration(String::new()).exit_code(), 78);
        assert_eq!(AppError::Validation(String::new()).exit_code(), 65);
        assert_eq!(AppError::Serialization(String::new()).exit_code(), 65);
        assert_eq!(AppError::NotFound(String::new()).exit_code(), 66);
        assert_eq!(AppError::Io(String::new()).exit_code(), 74);
        assert_eq!(AppError::InvariantViolation(String::new()).exit_code(), 70);
        assert_eq!(AppError::Internal(String::new()).exit_code(), 70);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Configuration(String::new()).error_code(),
            "CONFIGURATION_ERROR"
        );
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
        assert_eq!(
            AppError::InvariantViolation(String::new()).error_code(),
            "INVARIANT_VIOLATION"
        );
        assert_eq!(AppError::Io(String::new()).error_code(), "IO_ERROR");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Configuration("closing day 0".into()).to_string(),
            "Configuration error: closing day 0"
        );
        assert_eq!(
            AppError::NotFound("account".into()).to_string(),
            "Not found: account"
        );
    }

    #[test]
    fn test_from_json_error() {
        let err = serde_json::from_str::<u8>("nope").unwrap_err();
        let app: AppError = err.into();
        assert_eq!(app.error_code(), "SERIALIZATION_ERROR");
    }
}
