//! Key-value persistence
//!
//! Every piece of wardrobe state lives under a string key as one whole
//! document. Two backends:
//! - `FileStore` - one `<key>.json` file per key in the data directory
//! - `MemoryStore` - process-local map, used by tests

pub mod document;

use eyre::{Context, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Synchronous string-keyed document store
pub trait KvStore {
    /// Read the raw value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing an absent key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// File-backed store rooted at a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let content =
            fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        log::debug!("Read {} bytes from {}", content.len(), path.display());
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create data directory {}", self.root.display()))?;

        // Write next to the target so the rename stays on one filesystem
        let mut tmp = tempfile::NamedTempFile::new_in(&self.root).context("Failed to create temp file")?;
        tmp.write_all(value.as_bytes()).context("Failed to write temp file")?;
        tmp.as_file().sync_all().context("Failed to sync temp file")?;

        let path = self.key_path(key);
        tmp.persist(&path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        log::debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path).with_context(|| format!("Failed to remove {}", path.display()))?;
            log::debug!("Removed {}", path.display());
        }
        Ok(())
    }
}

/// In-memory store
#[allow(dead_code)] // production always runs on FileStore
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

#[allow(dead_code)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_missing_key() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().to_path_buf());
        assert!(store.get("users").unwrap().is_none());
    }

    #[test]
    fn test_file_store_set_creates_directory() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("nested").join("data");
        let store = FileStore::new(root.clone());

        store.set("session", "\"alice\"").unwrap();

        assert!(root.join("session.json").exists());
        assert_eq!(store.get("session").unwrap().as_deref(), Some("\"alice\""));
    }

    #[test]
    fn test_file_store_overwrite_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().to_path_buf());

        store.set("items", "{}").unwrap();
        store.set("items", "{\"a\":[]}").unwrap();

        assert_eq!(store.get("items").unwrap().as_deref(), Some("{\"a\":[]}"));
        let files: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_file_store_remove_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().to_path_buf());

        store.set("session", "\"bob\"").unwrap();
        store.remove("session").unwrap();
        store.remove("session").unwrap();

        assert!(store.get("session").unwrap().is_none());
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
    }
}
