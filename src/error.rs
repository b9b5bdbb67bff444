//! Error types for the finance advisor

use thiserror::Error;

/// Result type alias for advisor operations
pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {

    // =============================
    // Simulation / Report Errors
    // =============================

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported projection horizon: {months} months (supported: 1-{max})")]
    UnsupportedHorizon { months: u32, max: u32 },

    // =============================
    // Backend / Session Errors
    // =============================

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session store error: {0}")]
    SessionStore(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AdvisorError {
    /// True for errors caused by the caller's input rather than the environment
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AdvisorError::InvalidInput(_) | AdvisorError::UnsupportedHorizon { .. }
        )
    }
}
