//! Cryptographic operations for Voyage.
//!
//! - **PBKDF2-HMAC-SHA256**: stretches the trip passphrase into a key
//! - **AES-256-GCM**: authenticated decryption of the trip envelope
//!
//! ## Threat Model
//!
//! We defend against:
//! - Reading the published envelope without the passphrase
//! - Tampering with the envelope (the GCM tag fails)
//! - Learning which decrypt step failed for a guessed passphrase
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - Access to the unlocked cache on disk

pub mod key;
pub mod passphrase;

pub use key::{derive_key, iterations_from_f64, DecryptionKey, NONCE_LENGTH};
pub use passphrase::validate_passphrase;
