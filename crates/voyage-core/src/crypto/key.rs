//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! The envelope format pins the KDF: the publisher stretches the passphrase
//! with PBKDF2 over SHA-256 using the salt and iteration count stored next to
//! the ciphertext, producing a 256-bit AES-GCM key.

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{Zeroizing, ZeroizeOnDrop};

use crate::error::{Result, VoyageError};

/// Length of derived key in bytes (32 bytes = 256 bits for AES-256-GCM).
const KEY_LENGTH: usize = 32;

/// AES-GCM nonce length in bytes.
pub const NONCE_LENGTH: usize = 12;

/// A key that can only decrypt.
///
/// There is no accessor for the raw bytes and no encrypt operation; the key
/// material is zeroized when the value is dropped.
#[derive(ZeroizeOnDrop)]
pub struct DecryptionKey {
    key: [u8; KEY_LENGTH],
}

impl DecryptionKey {
    /// Decrypt and authenticate `ciphertext` (tag appended) under `nonce`.
    ///
    /// # Errors
    ///
    /// Returns `VoyageError::InvalidParameters` for a nonce that is not
    /// 12 bytes, and `VoyageError::IncorrectPassphrase` when the
    /// authentication tag does not verify.
    pub fn decrypt(&self, nonce: &[u8], ciphertext: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        let cipher = cipher_for(&self.key)?;
        let nonce = checked_nonce(nonce)?;
        cipher
            .decrypt(nonce, ciphertext)
            .map(Zeroizing::new)
            .map_err(|_| VoyageError::IncorrectPassphrase)
    }
}

impl std::fmt::Debug for DecryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecryptionKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Encrypt-only counterpart used when publishing an envelope.
#[derive(ZeroizeOnDrop)]
pub(crate) struct SealingKey {
    key: [u8; KEY_LENGTH],
}

impl SealingKey {
    pub(crate) fn encrypt(&self, nonce: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        let cipher = cipher_for(&self.key)?;
        let nonce = checked_nonce(nonce)?;
        cipher
            .encrypt(nonce, plaintext)
            .map_err(|_| VoyageError::InvalidParameters("Encryption failed".to_string()))
    }
}

/// Derive a decrypt-only key from a passphrase.
///
/// # Arguments
///
/// * `passphrase` - The passphrase typed by the traveller
/// * `salt` - Public salt from the envelope
/// * `iterations` - PBKDF2 round count from the envelope
///
/// # Errors
///
/// Returns `VoyageError::InvalidParameters` if `iterations` is zero or the
/// salt is empty.
///
/// # Examples
///
/// ```
/// use voyage_core::crypto::derive_key;
///
/// let key = derive_key("correct horse", b"0123456789abcdef", 1_000).unwrap();
/// assert!(format!("{:?}", key).contains("REDACTED"));
/// ```
pub fn derive_key(passphrase: &str, salt: &[u8], iterations: u32) -> Result<DecryptionKey> {
    Ok(DecryptionKey {
        key: *stretch(passphrase, salt, iterations)?,
    })
}

pub(crate) fn derive_sealing_key(
    passphrase: &str,
    salt: &[u8],
    iterations: u32,
) -> Result<SealingKey> {
    Ok(SealingKey {
        key: *stretch(passphrase, salt, iterations)?,
    })
}

/// Convert an envelope's numeric iteration count into PBKDF2 rounds.
///
/// Accepts only positive whole numbers that fit in a `u32`.
pub fn iterations_from_f64(value: f64) -> Result<u32> {
    if !value.is_finite() || value.fract() != 0.0 || value < 1.0 || value > u32::MAX as f64 {
        return Err(VoyageError::InvalidParameters(format!(
            "Iteration count must be a positive integer (got {})",
            value
        )));
    }
    Ok(value as u32)
}

fn stretch(passphrase: &str, salt: &[u8], iterations: u32) -> Result<Zeroizing<[u8; KEY_LENGTH]>> {
    if iterations == 0 {
        return Err(VoyageError::InvalidParameters(
            "Iteration count must be positive".to_string(),
        ));
    }
    if salt.is_empty() {
        return Err(VoyageError::InvalidParameters(
            "Salt cannot be empty".to_string(),
        ));
    }

    let mut key = Zeroizing::new([0u8; KEY_LENGTH]);
    pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), salt, iterations, &mut *key);
    Ok(key)
}

fn cipher_for(key: &[u8; KEY_LENGTH]) -> Result<Aes256Gcm> {
    Aes256Gcm::new_from_slice(key)
        .map_err(|_| VoyageError::InvalidParameters("Invalid key length".to_string()))
}

fn checked_nonce(nonce: &[u8]) -> Result<&Nonce<aes_gcm::aead::consts::U12>> {
    if nonce.len() != NONCE_LENGTH {
        return Err(VoyageError::InvalidParameters(format!(
            "IV must be {} bytes (got {})",
            NONCE_LENGTH,
            nonce.len()
        )));
    }
    Ok(Nonce::from_slice(nonce))
}
