//! Persisted session state: the last decrypted trip and the remember-me expiry.
//!
//! `SessionStore` is the only owner of these two slots. The raw key-value
//! capability is injected so the CLI uses files and tests use memory.

pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::KeyValueStore;

use chrono::{DateTime, Duration, Utc};
use tracing::warn;

use crate::error::Result;
use crate::model::TripDocument;

/// Slot holding the last decrypted `TripDocument` as JSON.
pub const TRIP_CACHE_KEY: &str = "voyage_trip_cache_v2";

/// Slot holding the remember-me expiry in epoch milliseconds.
pub const AUTH_EXPIRY_KEY: &str = "voyage_auth_expiry_v1";

/// Default remember-me lifetime in days.
pub const DEFAULT_REMEMBER_DAYS: u32 = 30;

pub struct SessionStore<S> {
    slots: S,
    ttl: Duration,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(slots: S) -> Self {
        Self::with_ttl(slots, Duration::days(i64::from(DEFAULT_REMEMBER_DAYS)))
    }

    pub fn with_ttl(slots: S, ttl: Duration) -> Self {
        Self { slots, ttl }
    }

    /// Overwrite the cached document.
    pub fn save(&self, document: &TripDocument) -> Result<()> {
        let json = serde_json::to_string(document)?;
        self.slots.set(TRIP_CACHE_KEY, &json)
    }

    /// The cached document, or `None` if it is missing or unreadable.
    pub fn load(&self) -> Option<TripDocument> {
        let raw = match self.slots.get(TRIP_CACHE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "trip cache unreadable");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(document) => Some(document),
            Err(e) => {
                warn!(error = %e, "trip cache corrupt, ignoring");
                None
            }
        }
    }

    /// Drop the cached document.
    pub fn clear_cache(&self) -> Result<()> {
        self.slots.remove(TRIP_CACHE_KEY)
    }

    /// Start a remembered session lasting `ttl` from `now`, or end it.
    pub fn set_remembered(&self, enabled: bool, now: DateTime<Utc>) -> Result<()> {
        if enabled {
            let expires_at = (now + self.ttl).timestamp_millis();
            self.slots.set(AUTH_EXPIRY_KEY, &expires_at.to_string())
        } else {
            self.slots.remove(AUTH_EXPIRY_KEY)
        }
    }

    /// Whether a remembered session is still valid at `now`.
    ///
    /// The stored value must be a finite number strictly after `now`.
    pub fn is_remembered(&self, now: DateTime<Utc>) -> bool {
        self.expires_at()
            .is_some_and(|expires_at| expires_at > now.timestamp_millis() as f64)
    }

    /// Stored expiry in epoch milliseconds, if present and numeric.
    pub fn expires_at(&self) -> Option<f64> {
        let raw = match self.slots.get(AUTH_EXPIRY_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "session expiry unreadable");
                return None;
            }
        };
        raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap()
    }

    fn session() -> (SessionStore<MemoryStore>, MemoryStore) {
        let slots = MemoryStore::new();
        (SessionStore::new(slots.clone()), slots)
    }

    #[test]
    fn test_remembered_until_expiry() {
        let (session, _) = session();
        session.set_remembered(true, now()).unwrap();

        assert!(session.is_remembered(now()));
        assert!(session.is_remembered(now() + Duration::days(30) - Duration::milliseconds(1)));
        assert!(!session.is_remembered(now() + Duration::days(30)));
        assert!(!session.is_remembered(now() + Duration::days(31)));
    }

    #[test]
    fn test_not_remembered_after_disable() {
        let (session, slots) = session();
        session.set_remembered(true, now()).unwrap();
        session.set_remembered(false, now()).unwrap();

        assert!(!session.is_remembered(now()));
        assert_eq!(slots.get(AUTH_EXPIRY_KEY).unwrap(), None);
    }

    #[test]
    fn test_garbage_expiry_is_not_remembered() {
        let (session, slots) = session();
        for raw in ["soon", "", "NaN", "inf"] {
            slots.set(AUTH_EXPIRY_KEY, raw).unwrap();
            assert!(!session.is_remembered(now()), "{:?} counted as remembered", raw);
        }
    }

    #[test]
    fn test_expiry_written_as_epoch_millis() {
        let (session, slots) = session();
        session.set_remembered(true, now()).unwrap();
        let expected = (now() + Duration::days(30)).timestamp_millis().to_string();
        assert_eq!(slots.get(AUTH_EXPIRY_KEY).unwrap(), Some(expected));
    }

    #[test]
    fn test_custom_ttl() {
        let session = SessionStore::with_ttl(MemoryStore::new(), Duration::days(1));
        session.set_remembered(true, now()).unwrap();
        assert!(session.is_remembered(now() + Duration::hours(23)));
        assert!(!session.is_remembered(now() + Duration::hours(25)));
    }

    #[test]
    fn test_save_load_clear() {
        let (session, _) = session();
        assert!(session.load().is_none());

        let doc = TripDocument {
            trip_title: "Honeymoon".to_string(),
            ..Default::default()
        };
        session.save(&doc).unwrap();
        assert_eq!(session.load(), Some(doc));

        session.clear_cache().unwrap();
        assert!(session.load().is_none());
    }

    #[test]
    fn test_corrupt_cache_loads_as_none() {
        let (session, slots) = session();
        slots.set(TRIP_CACHE_KEY, "{not json").unwrap();
        assert!(session.load().is_none());
        slots.set(TRIP_CACHE_KEY, "[1,2,3]").unwrap();
        assert!(session.load().is_none());
    }
}
