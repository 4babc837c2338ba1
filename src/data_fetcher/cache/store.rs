//! Persisted key-value store behind a narrow get/set interface.
//!
//! Values are whole-value text or integers; there is no sub-field mutation.
//! `set_entries` writes several keys in one operation so readers never see
//! half of a related pair.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, instrument, warn};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredValue {
    Integer(i64),
    Text(String),
}

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<StoredValue>, AppError>> + Send;

    fn set_entries(
        &self,
        entries: Vec<(String, StoredValue)>,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    fn get_text(&self, key: &str) -> impl Future<Output = Result<Option<String>, AppError>> + Send {
        async move {
            match self.get(key).await? {
                Some(StoredValue::Text(text)) => Ok(Some(text)),
                Some(StoredValue::Integer(_)) => Err(AppError::store_error(format!(
                    "Key '{key}' holds an integer, expected text"
                ))),
                None => Ok(None),
            }
        }
    }

    fn get_integer(&self, key: &str) -> impl Future<Output = Result<Option<i64>, AppError>> + Send {
        async move {
            match self.get(key).await? {
                Some(StoredValue::Integer(value)) => Ok(Some(value)),
                Some(StoredValue::Text(_)) => Err(AppError::store_error(format!(
                    "Key '{key}' holds text, expected an integer"
                ))),
                None => Ok(None),
            }
        }
    }

    fn set_text(&self, key: &str, value: &str) -> impl Future<Output = Result<(), AppError>> + Send {
        self.set_entries(vec![(key.to_string(), StoredValue::Text(value.to_string()))])
    }

    fn set_integer(&self, key: &str, value: i64) -> impl Future<Output = Result<(), AppError>> + Send {
        self.set_entries(vec![(key.to_string(), StoredValue::Integer(value))])
    }
}

/// Store kept in a single TOML file.
///
/// Writes go to a sibling temporary file that is renamed over the original,
/// so a reader sees either the old document or the new one.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<BTreeMap<String, StoredValue>, AppError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<StoredValue>, AppError> {
        let mut document = self.read_document().await?;
        Ok(document.remove(key))
    }

    #[instrument(skip(self, entries), fields(path = %self.path.display()))]
    async fn set_entries(&self, entries: Vec<(String, StoredValue)>) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;

        let mut document = match self.read_document().await {
            Ok(document) => document,
            Err(AppError::TomlDeserialize(e)) => {
                warn!("Store document is unreadable, replacing it: {e}");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        for (key, value) in entries {
            document.insert(key, value);
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }

        let content = toml::to_string(&document)?;
        let temp_path = self.path.with_extension("toml.tmp");
        fs::write(&temp_path, content.as_bytes()).await?;
        fs::rename(&temp_path, &self.path).await?;

        debug!("Store written: {} keys", document.len());
        Ok(())
    }
}

/// In-process store, used in tests and wherever persistence is not wanted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, StoredValue>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<StoredValue>, AppError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set_entries(&self, entries: Vec<(String, StoredValue)>) -> Result<(), AppError> {
        let mut map = self.entries.write().await;
        map.extend(entries);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_memory_store_text_and_integer() {
        let store = MemoryStore::new();
        assert_eq!(store.get("favorite_team").await.unwrap(), None);

        store.set_text("favorite_team", "Boston Red Sox").await.unwrap();
        store.set_integer("last_update", 1_700_000_000_000).await.unwrap();

        assert_eq!(
            store.get_text("favorite_team").await.unwrap().as_deref(),
            Some("Boston Red Sox")
        );
        assert_eq!(
            store.get_integer("last_update").await.unwrap(),
            Some(1_700_000_000_000)
        );
        assert_eq!(store.get_text("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_type_mismatch_is_an_error() {
        let store = MemoryStore::new();
        store.set_integer("last_update", 5).await.unwrap();

        let error = store.get_text("last_update").await.unwrap_err();
        assert!(matches!(error, AppError::Store(_)));
    }

    #[tokio::test]
    async fn test_file_store_persists_across_instances() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("store.toml");

        let store = FileStore::new(&path);
        assert_eq!(store.get_text("favorite_team").await.unwrap(), None);

        store
            .set_entries(vec![
                (
                    "cached_standings".to_string(),
                    StoredValue::Text(r#"{"records":[]}"#.to_string()),
                ),
                ("last_update".to_string(), StoredValue::Integer(42)),
            ])
            .await
            .unwrap();
        store.set_text("favorite_team", "Seattle Mariners").await.unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get_text("cached_standings").await.unwrap().as_deref(),
            Some(r#"{"records":[]}"#)
        );
        assert_eq!(reopened.get_integer("last_update").await.unwrap(), Some(42));
        assert_eq!(
            reopened.get_text("favorite_team").await.unwrap().as_deref(),
            Some("Seattle Mariners")
        );
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[tokio::test]
    async fn test_file_store_overwrites_whole_value() {
        let temp_dir = tempdir().unwrap();
        let store = FileStore::new(temp_dir.path().join("store.toml"));

        store.set_text("favorite_team", "Chicago Cubs").await.unwrap();
        store.set_text("favorite_team", "Chicago White Sox").await.unwrap();

        assert_eq!(
            store.get_text("favorite_team").await.unwrap().as_deref(),
            Some("Chicago White Sox")
        );
    }

    #[tokio::test]
    async fn test_file_store_corrupt_document() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("store.toml");
        tokio::fs::write(&path, "this is = = not toml").await.unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(
            store.get("anything").await,
            Err(AppError::TomlDeserialize(_))
        ));
    }

    #[tokio::test]
    async fn test_file_store_write_replaces_corrupt_document() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("store.toml");
        tokio::fs::write(&path, "half-written = = garbage").await.unwrap();

        let store = FileStore::new(&path);
        store.set_text("favorite_team", "Texas Rangers").await.unwrap();
        store.set_integer("last_update", 7).await.unwrap();

        assert_eq!(
            store.get_text("favorite_team").await.unwrap().as_deref(),
            Some("Texas Rangers")
        );
        assert_eq!(store.get_integer("last_update").await.unwrap(), Some(7));
    }
}
