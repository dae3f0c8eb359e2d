//! Base64 text to bytes and back.
//!
//! Envelope fields travel as standard (RFC 4648, padded) Base64.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{Result, VoyageError};

/// Decode standard Base64 into raw bytes.
///
/// Surrounding ASCII whitespace is ignored. Anything else outside the
/// alphabet fails with `VoyageError::MalformedEncoding`.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(text.trim_matches(|c: char| c.is_ascii_whitespace()))
        .map_err(|_| VoyageError::MalformedEncoding)
}

/// Encode bytes as standard Base64.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
