//! [`AppError`] and how each variant is shown to clients.
//!
//! With the `sqlx` feature off, `Database` carries a plain message instead of
//! the driver error.

use std::io;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Level an error is logged at when it reaches the response layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected errors such as validation failures
    Debug,
    /// Unexpected failures
    Error,
}

/// What the response layer needs to render an error envelope.
pub trait ErrorMetadata {
    fn http_status_code(&self) -> u16;

    /// Stable `SCREAMING_CASE` code, e.g. `BAD_REQUEST`.
    fn error_code(&self) -> &'static str;

    /// The `message` field. Backend failures get a generic text here.
    fn client_message(&self) -> String;

    /// Sensitive errors never expose `details`, even outside production.
    fn is_sensitive(&self) -> bool;

    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Media processing error: {0}")]
    MediaProcessing(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Client error carrying the exact message shown to the caller.
    #[error("{0}")]
    BadRequest(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl AppError {
    /// Shorthand for the 400 responses raised by resource handlers.
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(message.into())
    }
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        match crate::validation::first_message(&err) {
            Some(message) => AppError::BadRequest(message),
            None => AppError::InvalidInput(format!("Validation error: {}", err)),
        }
    }
}

/// How one [`AppError`] variant is presented and logged.
struct Presentation {
    status: u16,
    code: &'static str,
    kind: &'static str,
    sensitive: bool,
    level: LogLevel,
}

impl AppError {
    fn presentation(&self) -> Presentation {
        // Client mistakes are logged at debug; backend failures hide their details.
        let client = |status, code, kind| Presentation {
            status,
            code,
            kind,
            sensitive: false,
            level: LogLevel::Debug,
        };
        let backend = |code, kind| Presentation {
            status: 500,
            code,
            kind,
            sensitive: true,
            level: LogLevel::Error,
        };

        match self {
            AppError::Database(_) => backend("DATABASE_ERROR", "Database"),
            AppError::Storage(_) => backend("STORAGE_ERROR", "Storage"),
            AppError::MediaProcessing(_) => backend("MEDIA_PROCESSING_ERROR", "MediaProcessing"),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                backend("INTERNAL_ERROR", "Internal")
            }
            AppError::InvalidInput(_) => client(400, "INVALID_INPUT", "InvalidInput"),
            AppError::BadRequest(_) => client(400, "BAD_REQUEST", "BadRequest"),
            AppError::PayloadTooLarge(_) => client(413, "PAYLOAD_TOO_LARGE", "PayloadTooLarge"),
            AppError::Unauthorized(_) => client(401, "UNAUTHORIZED", "Unauthorized"),
        }
    }

    /// Variant name, shown as `errorType` outside production.
    pub fn error_type(&self) -> &'static str {
        self.presentation().kind
    }

    /// Display text followed by the `source()` chain, capped at five causes.
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();
        let mut causes = std::iter::successors(self.source(), |&e| e.source());
        for cause in causes.by_ref().take(5) {
            details.push_str(&format!("\n  Caused by: {}", cause));
        }
        if causes.next().is_some() {
            details.push_str("\n  ... (truncated)");
        }
        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        self.presentation().status
    }

    fn error_code(&self) -> &'static str {
        self.presentation().code
    }

    fn is_sensitive(&self) -> bool {
        self.presentation().sensitive
    }

    fn log_level(&self) -> LogLevel {
        self.presentation().level
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "Failed to access database".to_string(),
            AppError::Storage(_) => "Failed to access media storage".to_string(),
            AppError::MediaProcessing(_) => "Failed to read media metadata".to_string(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Internal server error".to_string()
            }
            AppError::InvalidInput(msg)
            | AppError::BadRequest(msg)
            | AppError::PayloadTooLarge(msg)
            | AppError::Unauthorized(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_error_metadata_database() {
        #[cfg(feature = "sqlx")]
        let err = AppError::from(sqlx::Error::PoolClosed);
        #[cfg(not(feature = "sqlx"))]
        let err = AppError::Database("pool closed".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "DATABASE_ERROR");
        assert_eq!(err.client_message(), "Failed to access database");
        assert!(err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_bad_request_keeps_message_verbatim() {
        let err = AppError::bad_request("Invalid video Id");
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "BAD_REQUEST");
        assert_eq!(err.client_message(), "Invalid video Id");
        assert_eq!(err.to_string(), "Invalid video Id");
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_unauthorized_and_media_processing() {
        let err = AppError::Unauthorized("Unauthorized request".to_string());
        assert_eq!(err.http_status_code(), 401);

        let err = AppError::MediaProcessing("ffprobe exited with 1".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.client_message(), "Failed to read media metadata");
        assert!(err.is_sensitive());
    }

    #[derive(Validate)]
    struct Body {
        #[validate(required(message = "Comment is required"))]
        content: Option<String>,
    }

    #[test]
    fn test_validation_errors_become_bad_request() {
        let err: AppError = Body { content: None }.validate().unwrap_err().into();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Comment is required"));
    }

    #[test]
    fn test_detailed_message_includes_source_chain() {
        let err = AppError::from(anyhow::anyhow!("outer").context("wrapped"));
        let details = err.detailed_message();
        assert!(details.starts_with("Internal error with source"));
        assert!(details.contains("Caused by: wrapped"));
        assert!(details.contains("Caused by: outer"));
        assert!(!details.contains("truncated"));
    }
}
