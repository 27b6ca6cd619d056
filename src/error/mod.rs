//! Error types for dialectic.

use thiserror::Error;

/// Phrase every fail-soft diagnostic reply starts with.
pub const ERROR_MARKER: &str = "An error occurred";

/// Primary error type for all dialectic operations.
///
/// [`DialecticError::Configuration`] and [`DialecticError::InvalidState`] are raised
/// before or around a run and are fatal. Every other variant comes out of a single
/// backend exchange and is absorbed by the session as a diagnostic reply.
#[derive(Error, Debug)]
pub enum DialecticError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed response from {provider}: {message}")]
    MalformedResponse { provider: String, message: String },

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl DialecticError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn malformed(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Whether this error must stop the program instead of becoming a dialogue turn.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::InvalidState(_))
    }

    /// The reply text a session substitutes for a failed exchange.
    pub fn diagnostic_reply(&self) -> String {
        format!("{ERROR_MARKER}: {self}")
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, DialecticError>;
