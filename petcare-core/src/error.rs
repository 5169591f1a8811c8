//! Error types for petcare.

use thiserror::Error;

/// Errors that can occur in petcare operations.
#[derive(Error, Debug)]
pub enum PetcareError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Non-2xx reply. `message` is the server's `{message}` or a fallback.
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Validation(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD or an ISO 8601 timestamp")]
    InvalidDate(String),

    #[error("Invalid month {0}. Expected 0-11")]
    InvalidMonth(u32),

    #[error("{0}")]
    InvalidState(String),

    #[error("Not logged in. Run `petcare login` first")]
    NotLoggedIn,

    #[error("Session error: {0}")]
    Session(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PetcareError {
    /// True for failures caught before anything was sent to the server.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            PetcareError::Validation(_)
                | PetcareError::InvalidDate(_)
                | PetcareError::InvalidMonth(_)
                | PetcareError::InvalidState(_)
        )
    }
}

impl From<serde_json::Error> for PetcareError {
    fn from(e: serde_json::Error) -> Self {
        PetcareError::Serialization(e.to_string())
    }
}

/// Result type alias for petcare operations.
pub type PetcareResult<T> = Result<T, PetcareError>;
