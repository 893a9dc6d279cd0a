//! File-backed [`KeyValueStore`].
//!
//! All keys live in one JSON object file. Every `set` rewrites the whole
//! file through a sibling temp file and a rename, so readers never observe
//! a half-written value.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::kv::KeyValueStore;

/// Persistent key-value store backed by a single JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Create a store at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => serde_json::from_str(&text).map_err(|source| StoreError::Corrupt {
                path: self.path.display().to_string(),
                source,
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn temp_path(&self) -> PathBuf {
        self.sibling_path(".tmp")
    }

    fn corrupt_path(&self) -> PathBuf {
        self.sibling_path(".corrupt")
    }

    fn sibling_path(&self, suffix: &str) -> PathBuf {
        let mut sibling = self.path.clone().into_os_string();
        sibling.push(suffix);
        PathBuf::from(sibling)
    }

    /// Move an unreadable store file out of the way so the next write
    /// starts from an empty map. The old contents are kept for inspection.
    async fn set_aside_corrupt(&self, path: &str, source: &serde_json::Error) {
        let backup = self.corrupt_path();
        tracing::warn!(path, error = %source, backup = %backup.display(), "Store file is corrupt, starting over");
        if let Err(e) = tokio::fs::rename(&self.path, &backup).await {
            tracing::warn!(path, error = %e, "Could not keep a copy of the corrupt store file");
        }
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut map = self.read_map().await?;
        Ok(map.remove(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut map = match self.read_map().await {
            Ok(map) => map,
            Err(StoreError::Corrupt { path, source }) => {
                self.set_aside_corrupt(&path, &source).await;
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        map.insert(key.to_string(), value);
        let body = serde_json::to_string_pretty(&map)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::debug!(path = %self.path.display(), key, "Store file written");
        Ok(())
    }
}
