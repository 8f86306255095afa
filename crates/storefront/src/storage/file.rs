//! Directory-backed key-value store.
//!
//! Each slot lives in `<dir>/<key>.json`. Writes go to a sibling temp file
//! first and are renamed into place, so a crash mid-write leaves the previous
//! value intact.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError, validate_key};

const SLOT_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "json.tmp";

/// Durable slot storage on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        tracing::debug!(dir = %dir.display(), "Opened file store");
        Ok(Self { dir })
    }

    /// Directory holding the slot files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.{SLOT_EXTENSION}")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        let tmp = path.with_extension(TEMP_EXTENSION);
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("carts");
        let store = FileStore::open(&dir).unwrap();
        assert!(store.dir().is_dir());
    }

    #[test]
    fn test_set_get_remove() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::open(tmp.path()).unwrap();

        assert_eq!(store.get("shopping-cart").unwrap(), None);

        store.set("shopping-cart", "[]").unwrap();
        assert_eq!(store.get("shopping-cart").unwrap().as_deref(), Some("[]"));
        assert!(tmp.path().join("shopping-cart.json").is_file());
        assert!(!tmp.path().join("shopping-cart.json.tmp").exists());

        store.remove("shopping-cart").unwrap();
        store.remove("shopping-cart").unwrap();
        assert_eq!(store.get("shopping-cart").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        FileStore::open(tmp.path())
            .unwrap()
            .set("cart", r#"[{"id":2,"quantity":4}]"#)
            .unwrap();

        let reopened = FileStore::open(tmp.path()).unwrap();
        assert_eq!(
            reopened.get("cart").unwrap().as_deref(),
            Some(r#"[{"id":2,"quantity":4}]"#)
        );
    }

    #[test]
    fn test_rejects_path_traversal_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileStore::open(tmp.path()).unwrap();
        assert!(matches!(
            store.set("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
