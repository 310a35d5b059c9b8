//! Error types for Coach Carter.

use std::time::Duration;

/// Top-level error type for the client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// A rejected intake answer.
///
/// The `Display` text is shown to the user as the corrective half of a
/// re-prompt, so it is phrased for people rather than logs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("I didn't catch that. Please type an answer.")]
    Empty,

    #[error("Your {field} should be a whole number.")]
    NotAnInteger { field: &'static str },

    #[error("Your {field} should be a number.")]
    NotANumber { field: &'static str },

    #[error("Your {field} should be between {min} and {max}.")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("Please choose Male, Female or Other.")]
    UnknownGender,

    #[error("I don't know the sport \"{0}\". Pick one from the list or choose Other Sport.")]
    UnknownSport(String),

    #[error("\"{0}\" isn't one of the goals I can plan for. Pick one from the list.")]
    UnknownGoal(String),

    #[error("Please pick one of the options below.")]
    UnknownChoice,

    #[error("Pick at least one goal before finishing.")]
    NoGoalsSelected,

    #[error("The profile is missing your {0}.")]
    Incomplete(&'static str),
}

/// Backend gateway errors.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Request to {endpoint} timed out after {timeout:?}")]
    Timeout { endpoint: String, timeout: Duration },

    #[error("Request to {endpoint} failed: {reason}")]
    Transport { endpoint: String, reason: String },

    #[error("{endpoint} returned HTTP {status}: {detail}")]
    Status {
        endpoint: String,
        status: u16,
        detail: String,
    },

    #[error("Invalid response from {endpoint}: {reason}")]
    InvalidResponse { endpoint: String, reason: String },
}

impl BackendError {
    /// Human-readable detail for the chat log.
    ///
    /// Prefers the backend's own `detail` message, then the transport error.
    pub fn detail(&self) -> String {
        match self {
            Self::Timeout { .. } => "Coach Carter took too long to answer.".to_string(),
            Self::Transport { reason, .. } => reason.clone(),
            Self::Status { detail, .. } => detail.clone(),
            Self::InvalidResponse { reason, .. } => reason.clone(),
        }
    }
}

/// Result type alias for the client.
pub type Result<T> = std::result::Result<T, Error>;
