//! # Voyage Core
//!
//! Core library for Voyage - an offline-capable, passphrase-protected trip
//! itinerary viewer.
//!
//! The trip is published as an AES-256-GCM envelope. This crate fetches and
//! opens it, caches the decrypted trip, and derives what to show for a given
//! day, independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **codec**: Base64 text to bytes and back
//! - **crypto**: PBKDF2 key derivation and the decrypt-only key
//! - **envelope** / **payload**: envelope validation, decryption, sealing
//! - **source**: envelope fetch over HTTP(S) or from a local file
//! - **store**: cached trip and remember-me expiry
//! - **stage**: trip phase and countdown for a day
//! - **itinerary**: legacy migration and date ordering
//! - **unlock**: the unlock state machine

pub mod codec;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod fs;
pub mod itinerary;
pub mod model;
pub mod payload;
pub mod source;
pub mod stage;
pub mod store;
pub mod unlock;

pub use envelope::EncryptedEnvelope;
pub use error::{Result, VoyageError};
pub use model::{DayPlan, Entry, LegacyDay, LegacyItem, TripDocument};
pub use source::{EnvelopeSource, FileEnvelopeSource, HttpEnvelopeSource, SourceLocation};
pub use stage::{stage, Leg, StageTag, StageView, TripCalendar};
pub use store::{FileStore, KeyValueStore, MemoryStore, SessionStore};
pub use unlock::{SubmitOutcome, UnlockObserver, UnlockState, Unlocker};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
