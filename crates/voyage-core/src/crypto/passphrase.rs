//! Passphrase validation.
//!
//! Unlocking accepts whatever the publisher chose, so only sealing a new
//! envelope enforces a minimum strength.

use crate::error::{Result, VoyageError};

/// Minimum passphrase length in characters when sealing an envelope.
const MIN_PASSPHRASE_LENGTH: usize = 8;

/// Validate a passphrase chosen for a new envelope.
///
/// # Requirements
///
/// - At least 8 characters long
/// - Not empty or only whitespace
///
/// # Examples
///
/// ```
/// use voyage_core::crypto::validate_passphrase;
///
/// assert!(validate_passphrase("sunset-over-the-aegean").is_ok());
/// assert!(validate_passphrase("short").is_err());
/// ```
pub fn validate_passphrase(passphrase: &str) -> Result<()> {
    if passphrase.trim().is_empty() {
        return Err(VoyageError::InvalidParameters(
            "Passphrase cannot be empty".to_string(),
        ));
    }

    let length = passphrase.chars().count();
    if length < MIN_PASSPHRASE_LENGTH {
        return Err(VoyageError::InvalidParameters(format!(
            "Passphrase must be at least {} characters (got {})",
            MIN_PASSPHRASE_LENGTH, length
        )));
    }

    Ok(())
}
