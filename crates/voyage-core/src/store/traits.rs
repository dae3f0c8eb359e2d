//! Key-value capability behind the session store.

use crate::error::Result;

/// String slots addressed by a fixed key.
///
/// Implementations must replace a slot's value wholesale: a reader never sees
/// a partially written value.
pub trait KeyValueStore: Send + Sync {
    /// Read a slot. `Ok(None)` when the slot has never been written or was removed.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a slot.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a slot. Removing a missing slot is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
