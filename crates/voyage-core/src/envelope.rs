//! The encrypted envelope as published next to the app.
//!
//! Wire shape: `{"salt": b64, "iv": b64, "ciphertext": b64, "iterations": n}`.
//! Structural validation here happens before any cryptography and is the
//! only place `InvalidPayload` is produced.

use serde_json::{json, Value};

use crate::error::{Result, VoyageError};

/// A structurally valid envelope. Field contents are still untrusted.
#[derive(Debug, Clone, PartialEq)]
pub struct EncryptedEnvelope {
    pub salt: String,
    pub iv: String,
    pub ciphertext: String,
    /// Finite, but not yet checked to be a usable round count.
    pub iterations: f64,
}

impl EncryptedEnvelope {
    /// Validate a parsed JSON body.
    ///
    /// `iterations` may be a number or a numeric string.
    ///
    /// # Errors
    ///
    /// Returns `VoyageError::InvalidPayload` if the body is not an object,
    /// or any of the four fields is missing, empty, or non-finite.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            VoyageError::InvalidPayload("Envelope must be a JSON object".to_string())
        })?;

        let text_field = |name: &str| -> Result<String> {
            match object.get(name).and_then(Value::as_str) {
                Some(text) if !text.is_empty() => Ok(text.to_string()),
                _ => Err(VoyageError::InvalidPayload(format!(
                    "Missing or empty field: {}",
                    name
                ))),
            }
        };

        let salt = text_field("salt")?;
        let iv = text_field("iv")?;
        let ciphertext = text_field("ciphertext")?;

        let iterations = match object.get("iterations") {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|n| n.is_finite())
        .ok_or_else(|| {
            VoyageError::InvalidPayload("Missing or non-numeric field: iterations".to_string())
        })?;

        Ok(Self {
            salt,
            iv,
            ciphertext,
            iterations,
        })
    }

    /// Wire representation.
    pub fn to_json(&self) -> Value {
        let iterations = if self.iterations.fract() == 0.0
            && self.iterations >= 0.0
            && self.iterations <= u32::MAX as f64
        {
            json!(self.iterations as u32)
        } else {
            json!(self.iterations)
        };
        json!({
            "salt": self.salt,
            "iv": self.iv,
            "ciphertext": self.ciphertext,
            "iterations": iterations,
        })
    }
}
