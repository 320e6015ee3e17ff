//! Error types and Result alias for the check-in runner

use thiserror::Error;

/// Main error type for the check-in runner
#[derive(Error, Debug)]
pub enum Error {
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("HTTP status {status}")]
    HttpStatus { status: u16 },

    #[error("All {attempts} HTTP requests failed: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },

    #[error("API rejected request (retcode {retcode}): {message}")]
    ApiRejected { retcode: i64, message: String },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Notification failed: {0}")]
    NotificationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

// Request URLs can carry credentials (the bot token is part of the path),
// so they never make it into the error text.
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Error::HttpStatus {
                status: status.as_u16(),
            };
        }

        let err = err.without_url();
        let mut text = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            text.push_str(": ");
            text.push_str(&cause.to_string());
            source = std::error::Error::source(cause);
        }
        Error::NetworkError(text)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidData(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err.to_string())
    }
}
