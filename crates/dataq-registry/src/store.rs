//! Asynchronous key-value store contract and backends.
//!
//! The registry persists through the same minimal contract the browser
//! store exposes: get an item, set an item, remove an item, each keyed by a
//! string and carrying an arbitrary JSON value.

use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::debug;

use dataq_core::{Error, Result};

/// Asynchronous key-value store.
///
/// Defines the persistence seam for per-page explorer state. Implementations
/// must serialize their own internal access; callers sequence their own
/// read-then-write cycles and never hold locks across awaits.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under a key, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageError`] when the backend cannot be read.
    async fn get_item(&self, key: &str) -> Result<Option<Value>>;

    /// Store a value under a key, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageError`] when the backend cannot be written.
    async fn set_item(&self, key: &str, value: Value) -> Result<()>;

    /// Remove the value stored under a key, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageError`] when the backend cannot be written.
    async fn remove_item(&self, key: &str) -> Result<()>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<Value>> {
        let items = self
            .items
            .read()
            .map_err(|_| Error::StorageError("memory store lock poisoned".to_string()))?;
        Ok(items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: Value) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|_| Error::StorageError("memory store lock poisoned".to_string()))?;
        items.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|_| Error::StorageError("memory store lock poisoned".to_string()))?;
        items.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON document on disk.
///
/// Every mutation reads the whole document and rewrites it, mirroring the
/// full-rewrite persistence model of the browser store the explorer uses.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given file path.
    ///
    /// The file is created on first write; a missing file reads as empty.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing document.
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    async fn load_document(&self) -> Result<serde_json::Map<String, Value>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "store document absent, reading as empty");
                return Ok(serde_json::Map::new());
            }
            Err(err) => {
                return Err(Error::StorageError(format!(
                    "failed to read {}: {err}",
                    self.path.display()
                )))
            }
        };

        serde_json::from_str(&raw).map_err(|err| {
            Error::StorageError(format!(
                "store document {} is not valid JSON: {err}",
                self.path.display()
            ))
        })
    }

    async fn write_document(&self, document: &serde_json::Map<String, Value>) -> Result<()> {
        let raw = serde_json::to_string_pretty(document)?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|err| {
                Error::StorageError(format!(
                    "failed to create {}: {err}",
                    parent.display()
                ))
            })?;
        }
        tokio::fs::write(&self.path, raw).await.map_err(|err| {
            Error::StorageError(format!(
                "failed to write {}: {err}",
                self.path.display()
            ))
        })
    }
}

#[async_trait::async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get_item(&self, key: &str) -> Result<Option<Value>> {
        let document = self.load_document().await?;
        Ok(document.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: Value) -> Result<()> {
        let mut document = self.load_document().await?;
        document.insert(key.to_string(), value);
        debug!(path = %self.path.display(), key, "rewriting store document");
        self.write_document(&document).await
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let mut document = self.load_document().await?;
        document.remove(key);
        debug!(path = %self.path.display(), key, "rewriting store document");
        self.write_document(&document).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get_item("/explore/orders").await.unwrap(), None);

        store
            .set_item("/explore/orders", json!({"q": "n"}))
            .await
            .unwrap();
        assert_eq!(
            store.get_item("/explore/orders").await.unwrap(),
            Some(json!({"q": "n"}))
        );
    }

    #[tokio::test]
    async fn memory_store_set_replaces() {
        let store = MemoryStore::new();
        store.set_item("k", json!(1)).await.unwrap();
        store.set_item("k", json!(2)).await.unwrap();
        assert_eq!(store.get_item("k").await.unwrap(), Some(json!(2)));
    }

    #[tokio::test]
    async fn memory_store_remove_is_tolerant() {
        let store = MemoryStore::new();
        store.remove_item("missing").await.unwrap();

        store.set_item("k", json!(1)).await.unwrap();
        store.remove_item("k").await.unwrap();
        assert_eq!(store.get_item("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_store_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));
        assert_eq!(store.get_item("anything").await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("state.json"));

        store.set_item("/explore/orders", json!({"a": 1})).await.unwrap();
        store.set_item("/explore/users", json!({"b": 2})).await.unwrap();
        store.remove_item("/explore/users").await.unwrap();

        assert_eq!(
            store.get_item("/explore/orders").await.unwrap(),
            Some(json!({"a": 1}))
        );
        assert_eq!(store.get_item("/explore/users").await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_store_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested/deep/state.json"));
        store.set_item("k", json!(true)).await.unwrap();
        assert_eq!(store.get_item("k").await.unwrap(), Some(json!(true)));
    }

    #[tokio::test]
    async fn file_store_corrupt_document_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let store = JsonFileStore::new(&path);
        let err = store.get_item("k").await.unwrap_err();
        assert!(matches!(err, Error::StorageError(_)));
    }

    #[tokio::test]
    async fn mock_store_surfaces_read_failures() {
        let mut mock = MockKeyValueStore::new();
        mock.expect_get_item()
            .returning(|_| Err(Error::StorageError("backend offline".to_string())));

        let err = mock.get_item("k").await.unwrap_err();
        assert!(err.should_log());
    }
}
