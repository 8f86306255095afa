//! Key-value storage backends for persisted cart state.
//!
//! A store holds named string slots, the same shape as browser local storage.
//! Values are opaque here; JSON encoding happens in [`crate::persisted`].
//!
//! # Backends
//!
//! - [`MemoryStore`] - In-process map, for tests and throwaway sessions
//! - [`FileStore`] - One file per slot under a directory

mod file;
mod memory;

use std::sync::Arc;

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors that can occur when reading or writing a slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Slot key contains characters the backend cannot address.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// A previous writer panicked while holding the store lock.
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Abstraction over slot-addressed string storage.
///
/// Methods take `&self`; backends handle their own interior mutability so a
/// store can be shared between the cart and whoever inspects it.
pub trait KeyValueStore: Send + Sync {
    /// Read a slot. Returns `None` if it has never been written or was removed.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a slot.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a slot. Succeeds if the slot does not exist.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Check that a key is non-empty and limited to `[A-Za-z0-9._-]`.
///
/// Keys double as file names in [`FileStore`], so path separators and
/// leading dots are rejected.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_accepts_default_slot() {
        assert!(validate_key("shopping-cart").is_ok());
        assert!(validate_key("cart_v2.backup").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_paths() {
        for key in ["", "../cart", "a/b", ".hidden", "with space"] {
            assert!(
                matches!(validate_key(key), Err(StorageError::InvalidKey(_))),
                "{key:?} should be rejected"
            );
        }
    }
}
