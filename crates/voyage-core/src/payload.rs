//! Envelope decryption and sealing.
//!
//! Everything that can go wrong after structural validation collapses into
//! `VoyageError::IncorrectPassphrase`. Callers cannot tell a bad tag from bad
//! Base64 or bad JSON, so a guessed passphrase learns nothing beyond "no".

use tracing::debug;
use zeroize::Zeroizing;

use crate::codec;
use crate::crypto::key::{derive_key, derive_sealing_key, iterations_from_f64, NONCE_LENGTH};
use crate::envelope::EncryptedEnvelope;
use crate::error::{Result, VoyageError};
use crate::model::TripDocument;

/// Salt length for newly sealed envelopes.
const SALT_LENGTH: usize = 16;

/// Default PBKDF2 rounds for newly sealed envelopes.
pub const DEFAULT_SEAL_ITERATIONS: u32 = 250_000;

/// Which step of the decrypt pipeline failed. Never leaves this module.
#[derive(Debug, Clone, Copy)]
enum DecryptStep {
    Encoding,
    Parameters,
    Authentication,
    Document,
}

impl DecryptStep {
    fn classify(err: &VoyageError) -> Self {
        match err {
            VoyageError::MalformedEncoding => Self::Encoding,
            VoyageError::InvalidParameters(_) => Self::Parameters,
            VoyageError::IncorrectPassphrase => Self::Authentication,
            _ => Self::Document,
        }
    }
}

/// Decrypt an envelope into a trip document.
///
/// # Errors
///
/// Returns `VoyageError::IncorrectPassphrase` for every failure: malformed
/// field encoding, unusable iteration count or IV, authentication failure,
/// and plaintext that is not a trip document.
pub fn decrypt(envelope: &EncryptedEnvelope, passphrase: &str) -> Result<TripDocument> {
    open(envelope, passphrase).map_err(|err| {
        debug!(step = ?DecryptStep::classify(&err), "envelope did not open");
        VoyageError::IncorrectPassphrase
    })
}

fn open(envelope: &EncryptedEnvelope, passphrase: &str) -> Result<TripDocument> {
    let salt = codec::decode(&envelope.salt)?;
    let iv = codec::decode(&envelope.iv)?;
    let ciphertext = codec::decode(&envelope.ciphertext)?;
    let iterations = iterations_from_f64(envelope.iterations)?;

    let key = derive_key(passphrase, &salt, iterations)?;
    let plaintext = key.decrypt(&iv, &ciphertext)?;

    Ok(serde_json::from_slice(&plaintext)?)
}

/// Encrypt a trip document into a fresh envelope.
///
/// A new random salt and IV are drawn for every call.
pub fn seal_document(
    document: &TripDocument,
    passphrase: &str,
    iterations: u32,
) -> Result<EncryptedEnvelope> {
    let mut salt = [0u8; SALT_LENGTH];
    let mut iv = [0u8; NONCE_LENGTH];
    getrandom::getrandom(&mut salt)
        .map_err(|e| VoyageError::InvalidParameters(format!("RNG failure: {}", e)))?;
    getrandom::getrandom(&mut iv)
        .map_err(|e| VoyageError::InvalidParameters(format!("RNG failure: {}", e)))?;

    let plaintext = Zeroizing::new(serde_json::to_vec(document)?);
    let key = derive_sealing_key(passphrase, &salt, iterations)?;
    let ciphertext = key.encrypt(&iv, &plaintext)?;

    Ok(EncryptedEnvelope {
        salt: codec::encode(&salt),
        iv: codec::encode(&iv),
        ciphertext: codec::encode(&ciphertext),
        iterations: f64::from(iterations),
    })
}
