//! Error types for Voyage core operations.
//!
//! Errors are descriptive at the core level; the unlock orchestrator and the
//! CLI map them to the short status messages a traveller sees.

use thiserror::Error;

/// Result type alias for Voyage operations.
pub type Result<T> = std::result::Result<T, VoyageError>;

/// Core error type for Voyage operations.
#[derive(Debug, Error)]
pub enum VoyageError {
    /// Text contained characters outside the Base64 alphabet
    #[error("Malformed Base64 encoding")]
    MalformedEncoding,

    /// Key derivation parameters out of range
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Envelope is structurally broken (missing or empty fields)
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Envelope could not be fetched
    #[error("Payload unavailable: {0}")]
    PayloadUnavailable(String),

    /// Wrong passphrase, or the decrypted bytes were not a trip document.
    ///
    /// The two cases are deliberately indistinguishable.
    #[error("Incorrect passphrase")]
    IncorrectPassphrase,

    /// Trip calendar or config values are inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// Persisted state could not be written
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl VoyageError {
    /// Status line shown to the user when an unlock attempt fails.
    pub fn user_message(&self) -> &'static str {
        match self {
            VoyageError::PayloadUnavailable(_) => "Could not load encrypted trip data.",
            VoyageError::InvalidPayload(_) => "Encrypted payload is invalid.",
            VoyageError::IncorrectPassphrase => "Incorrect passphrase.",
            _ => "Unlock failed.",
        }
    }
}
