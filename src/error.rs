//! Session error types

use thiserror::Error;

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Session error types
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error("analysis service error: {message}")]
    Service { message: String },

    #[error("transport error: {message}")]
    Transport { message: String },

    #[error("geocoding error: {message}")]
    Geocoding { message: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("task join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}

impl SessionError {
    /// Create an invalid-input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a service error (the reply carried an `error` field)
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service {
            message: message.into(),
        }
    }

    /// Create a transport error (network or decode failure)
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a geocoding error
    pub fn geocoding(message: impl Into<String>) -> Self {
        Self::Geocoding {
            message: message.into(),
        }
    }
}
