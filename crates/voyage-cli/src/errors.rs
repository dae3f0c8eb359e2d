//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use voyage_core::VoyageError;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config, day in the itinerary)
    NotFound { message: String, hint: String },

    /// Authentication failed (wrong passphrase, too many attempts)
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),

    /// Envelope unavailable or invalid
    Payload {
        message: String,
        hint: Option<String>,
    },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hint() {
            Some(hint) => write!(f, "{}\n{}", self.message(), hint),
            None => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an AuthFailed error without a hint.
    pub fn auth_failed(message: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: None,
        }
    }

    /// Create an AuthFailed error with message and hint.
    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Map a failed unlock attempt to a user-facing error.
    ///
    /// The message is the same status line the unlock screen shows.
    pub fn from_unlock(err: &VoyageError) -> Self {
        match err {
            VoyageError::IncorrectPassphrase => CliError::auth_failed(err.user_message()),
            VoyageError::PayloadUnavailable(detail) | VoyageError::InvalidPayload(detail) => {
                CliError::Payload {
                    message: format!("{} ({})", err.user_message(), detail),
                    hint: None,
                }
            }
            other => CliError::Payload {
                message: format!("{} ({})", other.user_message(), other),
                hint: None,
            },
        }
    }

    /// Attach a hint to an error that can carry one.
    pub fn with_hint(mut self, text: impl Into<String>) -> Self {
        match &mut self {
            CliError::NotFound { hint, .. } => *hint = text.into(),
            CliError::AuthFailed { hint, .. } | CliError::Payload { hint, .. } => {
                *hint = Some(text.into())
            }
            CliError::InvalidInput(_) => {}
        }
        self
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        use super::constants::exit_codes;
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::Payload { .. } => exit_codes::PAYLOAD,
        }
    }

    /// Main message, without the hint.
    pub fn message(&self) -> &str {
        match self {
            CliError::NotFound { message, .. }
            | CliError::AuthFailed { message, .. }
            | CliError::Payload { message, .. } => message,
            CliError::InvalidInput(message) => message,
        }
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            CliError::NotFound { hint, .. } => Some(hint),
            CliError::AuthFailed { hint, .. } | CliError::Payload { hint, .. } => hint.as_deref(),
            CliError::InvalidInput(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::not_found("x", "y").exit_code(), 3);
        assert_eq!(CliError::invalid_input("x").exit_code(), 4);
        assert_eq!(CliError::auth_failed("x").exit_code(), 5);
        let payload = CliError::from_unlock(&VoyageError::InvalidPayload("no iv".to_string()));
        assert_eq!(payload.exit_code(), 6);
    }

    #[test]
    fn test_from_unlock_uses_status_lines() {
        let err = CliError::from_unlock(&VoyageError::IncorrectPassphrase);
        assert_eq!(err.to_string(), "Incorrect passphrase.");
        assert_eq!(err.exit_code(), 5);

        let err = CliError::from_unlock(&VoyageError::PayloadUnavailable("HTTP 404".to_string()));
        assert_eq!(err.to_string(), "Could not load encrypted trip data. (HTTP 404)");
        assert_eq!(err.exit_code(), 6);
    }

    #[test]
    fn test_hint_on_second_line() {
        let err = CliError::auth_failed_with_hint("Too many attempts.", "Hint: ask the organiser");
        assert_eq!(err.to_string(), "Too many attempts.\nHint: ask the organiser");
        assert_eq!(err.message(), "Too many attempts.");
        assert_eq!(err.hint(), Some("Hint: ask the organiser"));
    }

    #[test]
    fn test_with_hint() {
        let err = CliError::from_unlock(&VoyageError::PayloadUnavailable("gone".to_string()))
            .with_hint("Hint: Source is /srv/trip.enc.json");
        assert_eq!(err.hint(), Some("Hint: Source is /srv/trip.enc.json"));

        let err = CliError::invalid_input("bad").with_hint("ignored");
        assert_eq!(err.hint(), None);
    }
}
