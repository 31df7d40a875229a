// Typed errors with thiserror. Surface meaningful messages to JS.

use thiserror::Error;

/// Studio error types.
#[derive(Error, Debug)]
pub enum StudioError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown subject: {0}")]
    UnknownSubject(String),

    #[error("Unknown camera preset: {0}")]
    UnknownPreset(String),

    #[error("Unknown health action: {0}")]
    UnknownAction(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StudioError {
    fn from(err: serde_json::Error) -> Self {
        StudioError::Serialization(err.to_string())
    }
}
