//! Filesystem key-value store

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::KeyValueStore;
use crate::error::{Error, Result};

/// Stores each key as `<dir>/<key>.json`
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the target, so a reader sees either the old blob or the new one.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a file store rooted at `dir`
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();

        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| {
                Error::Storage(format!(
                    "Failed to create store directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
            info!("Created store directory: {}", dir.display());
        }

        Ok(Self { dir })
    }

    /// Get the store directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty()
        || key == "."
        || key == ".."
        || key.contains(|c| c == '/' || c == '\\')
        || key.chars().any(char::is_control)
    {
        return Err(Error::InvalidData(format!("Invalid store key: {:?}", key)));
    }
    Ok(())
}

impl KeyValueStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!(path = %path.display(), bytes = content.len(), "Read blob");
                Ok(Some(content))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path)?;

        debug!(path = %path.display(), bytes = value.len(), "Wrote blob");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_store() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("store")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_new_creates_directory() {
        let dir = TempDir::new().unwrap();
        let store_dir = dir.path().join("nested").join("store");
        assert!(!store_dir.exists());

        let _store = FileStore::new(&store_dir).unwrap();
        assert!(store_dir.exists());
    }

    #[test]
    fn test_get_missing_key() {
        let (_dir, store) = setup_test_store();
        assert!(store.get("finance_history").unwrap().is_none());
    }

    #[test]
    fn test_set_and_get() {
        let (_dir, store) = setup_test_store();
        store.set("finance_history", "[]").unwrap();

        assert_eq!(store.get("finance_history").unwrap().as_deref(), Some("[]"));
        assert!(store.dir().join("finance_history.json").exists());
    }

    #[test]
    fn test_set_replaces_whole_blob() {
        let (_dir, store) = setup_test_store();
        store.set("k", "a much longer first value").unwrap();
        store.set("k", "short").unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some("short"));
    }

    #[test]
    fn test_set_leaves_no_temp_files() {
        let (_dir, store) = setup_test_store();
        store.set("k", "v").unwrap();
        store.set("k", "w").unwrap();

        let files: Vec<_> = fs::read_dir(store.dir()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let (_dir, store) = setup_test_store();
        assert!(store.get("../escape").is_err());
        assert!(store.set("a/b", "v").is_err());
        assert!(store.set("", "v").is_err());
        assert!(store.set("..", "v").is_err());
    }
}
