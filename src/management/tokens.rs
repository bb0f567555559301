use std::{collections::BTreeMap, io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    api::{StoreError, TokenStore},
    config,
};

/// Token store persisted as a small JSON document on disk.
///
/// The whole document is loaded once when the store is opened and rewritten on
/// every change, so reads never touch the filesystem.
pub struct FileTokenStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileTokenStore {
    /// Opens the store at the configured location.
    pub async fn open() -> Result<Self, StoreError> {
        Self::open_at(config::token_path()).await
    }

    pub async fn open_at(path: PathBuf) -> Result<Self, StoreError> {
        let entries = match async_fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(StoreError::Io(e)),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    async fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if entries.is_empty() {
            return match async_fs::remove_file(&self.path).await {
                Err(e) if e.kind() != ErrorKind::NotFound => Err(StoreError::Io(e)),
                _ => Ok(()),
            };
        }

        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn get(&self, name: &str) -> Option<String> {
        self.entries.lock().await.get(name).cloned()
    }

    async fn set(&self, name: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;
        entries.insert(name.to_string(), value.to_string());
        self.persist(&entries).await
    }

    async fn clear(&self, name: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;
        if entries.remove(name).is_none() {
            return Ok(());
        }
        self.persist(&entries).await
    }
}
