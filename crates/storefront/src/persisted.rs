//! A value mirrored into a single key-value slot.
//!
//! [`Persisted`] reads its slot once on construction and writes the JSON
//! encoding back every time the value changes. The slot is the only durable
//! artifact; the in-memory copy is authoritative for reads.
//!
//! A slot that is missing, unreadable, or holds JSON that does not decode as
//! `T` yields the initial value instead. Corrupt contents are logged and then
//! overwritten by the initial write-back.
//!
//! # Example
//!
//! ```rust
//! use shopping_cart_storefront::{MemoryStore, Persisted};
//!
//! let store = MemoryStore::new();
//! let mut counter = Persisted::load(&store, "visits", 0_u32);
//! counter.update(|n| n + 1);
//!
//! let reloaded = Persisted::load(&store, "visits", 0_u32);
//! assert_eq!(*reloaded.get(), 1);
//! ```

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::storage::{KeyValueStore, StorageError};

/// Errors from an explicit [`Persisted::save`].
#[derive(Debug, Error)]
pub enum PersistError {
    /// The value could not be encoded as JSON.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The backend rejected the write.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// In-memory value kept in sync with one named slot.
#[derive(Debug)]
pub struct Persisted<T, S> {
    store: S,
    key: String,
    value: T,
}

impl<T, S> Persisted<T, S>
where
    T: Serialize + DeserializeOwned + PartialEq,
    S: KeyValueStore,
{
    /// Restore from the slot, falling back to `initial`.
    pub fn load(store: S, key: impl Into<String>, initial: T) -> Self {
        Self::load_with(store, key, || initial)
    }

    /// Restore from the slot, calling `init` only if no stored value is usable.
    pub fn load_with(store: S, key: impl Into<String>, init: impl FnOnce() -> T) -> Self {
        let key = key.into();
        let value = read_slot(&store, &key).unwrap_or_else(init);
        let persisted = Self { store, key, value };
        persisted.save_or_warn();
        persisted
    }

    /// Current value.
    #[must_use]
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Slot key this value is mirrored into.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Backend the value is mirrored into.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Replace the value, writing the slot if it changed.
    ///
    /// Write failures are logged, not returned: the in-memory value is
    /// updated either way.
    pub fn set(&mut self, value: T) {
        if value == self.value {
            return;
        }
        self.value = value;
        self.save_or_warn();
    }

    /// Replace the value with one computed from the current value.
    pub fn update(&mut self, f: impl FnOnce(&T) -> T) {
        let next = f(&self.value);
        self.set(next);
    }

    /// Write the current value to the slot.
    ///
    /// # Errors
    ///
    /// Returns `PersistError` if encoding or the backend write fails.
    pub fn save(&self) -> Result<(), PersistError> {
        let json = serde_json::to_string(&self.value)?;
        self.store.set(&self.key, &json)?;
        Ok(())
    }

    /// Consume the mirror, returning the backend.
    pub fn into_store(self) -> S {
        self.store
    }

    fn save_or_warn(&self) {
        if let Err(e) = self.save() {
            tracing::warn!(key = %self.key, error = %e, "Failed to write persisted value");
        }
    }
}

/// Read and decode a slot, treating every failure as "no value".
fn read_slot<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read persisted value");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding corrupt persisted value");
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::storage::MemoryStore;

    /// Store whose writes always fail.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::InvalidKey(key.to_string()))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_absent_slot_uses_initial_and_writes_it() {
        let store = MemoryStore::new();
        let persisted = Persisted::load(&store, "list", vec![1, 2]);

        assert_eq!(persisted.get(), &vec![1, 2]);
        assert_eq!(store.get("list").unwrap().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_present_slot_wins_over_initial() {
        let store = MemoryStore::with_slot("list", "[7]");
        let persisted = Persisted::load(&store, "list", vec![1, 2]);
        assert_eq!(persisted.get(), &vec![7]);
    }

    #[test]
    fn test_producer_only_called_without_stored_value() {
        let calls = Cell::new(0);
        let producer = || {
            calls.set(calls.get() + 1);
            vec![0_u8]
        };

        let store = MemoryStore::with_slot("list", "[9]");
        let persisted = Persisted::load_with(&store, "list", producer);
        assert_eq!(persisted.get(), &vec![9]);
        assert_eq!(calls.get(), 0);

        let empty = MemoryStore::new();
        let persisted = Persisted::load_with(&empty, "list", producer);
        assert_eq!(persisted.get(), &vec![0]);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_corrupt_slot_falls_back_and_is_overwritten() {
        let store = MemoryStore::with_slot("list", "{not json");
        let persisted = Persisted::load(&store, "list", Vec::<u32>::new());

        assert!(persisted.get().is_empty());
        assert_eq!(store.get("list").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_wrong_shape_falls_back() {
        let store = MemoryStore::with_slot("list", r#"{"id": 1}"#);
        let persisted = Persisted::load(&store, "list", vec![3_u32]);
        assert_eq!(persisted.get(), &vec![3]);
    }

    #[test]
    fn test_set_and_update_write_through() {
        let store = MemoryStore::new();
        let mut persisted = Persisted::load(&store, "n", 1_i32);

        persisted.set(5);
        assert_eq!(store.get("n").unwrap().as_deref(), Some("5"));

        persisted.update(|n| n * 2);
        assert_eq!(*persisted.get(), 10);
        assert_eq!(store.get("n").unwrap().as_deref(), Some("10"));
    }

    #[test]
    fn test_unchanged_value_skips_write() {
        let store = MemoryStore::new();
        let mut persisted = Persisted::load(&store, "n", 1_i32);

        store.set("n", "changed elsewhere").unwrap();
        persisted.set(1);
        assert_eq!(store.get("n").unwrap().as_deref(), Some("changed elsewhere"));
    }

    #[test]
    fn test_write_failure_keeps_in_memory_value() {
        let mut persisted = Persisted::load(ReadOnlyStore, "n", 1_i32);
        persisted.set(2);

        assert_eq!(*persisted.get(), 2);
        assert!(matches!(persisted.save(), Err(PersistError::Storage(_))));
    }
}
