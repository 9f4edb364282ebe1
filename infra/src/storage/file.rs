//! JSON file key-value store
//!
//! Keeps every key in one JSON object on disk, the way a browser keeps
//! local storage per origin.

use async_trait::async_trait;
use raseed_core::services::verification::KeyValueStore;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::InfrastructureError;

type Entries = BTreeMap<String, String>;

/// Store persisted as a JSON object file
///
/// Writes go through a temporary file and a rename. A file that does not
/// parse is treated as empty and replaced on the next write.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<Entries, InfrastructureError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Entries::new());
        }

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Storage file is not a JSON object of strings, treating as empty"
                );
                Ok(Entries::new())
            }
        }
    }

    async fn write_entries(&self, entries: &Entries) -> Result<(), InfrastructureError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), keys = entries.len(), "Storage file written");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        let _guard = self.lock.lock().await;
        self.read_entries()
            .await
            .map(|mut entries| entries.remove(key))
            .map_err(|e| e.to_string())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await.map_err(|e| e.to_string())?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries).await.map_err(|e| e.to_string())
    }

    async fn remove(&self, key: &str) -> Result<(), String> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await.map_err(|e| e.to_string())?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.write_entries(&entries).await.map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("storage.json"));

        assert_eq!(store.get("raseed_2fa_codes").await.unwrap(), None);
        store.remove("raseed_2fa_codes").await.unwrap();
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_values_survive_new_instance() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        FileStore::new(&path).set("a", "1").await.unwrap();
        FileStore::new(&path).set("b", "2").await.unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("b").await.unwrap().as_deref(), Some("2"));

        store.remove("a").await.unwrap();
        assert_eq!(FileStore::new(&path).get("a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.get("k").await.unwrap(), None);

        store.set("k", "v").await.unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["k"], "v");
    }
}
