use std::{collections::HashMap, io};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::types::TokenPair;

/// Storage key holding the current access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Storage key holding the current refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("token storage I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("token storage is corrupt: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Durable key-value capability holding the access/refresh token pair.
///
/// Values are overwritten, never appended: a key holds at most one token.
/// Reads are infallible; implementations backed by slow or fallible storage
/// are expected to serve reads from memory.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn get(&self, name: &str) -> Option<String>;

    async fn set(&self, name: &str, value: &str) -> Result<(), StoreError>;

    async fn clear(&self, name: &str) -> Result<(), StoreError>;

    /// Returns both tokens when both are present.
    async fn pair(&self) -> Option<TokenPair> {
        let access = self.get(ACCESS_TOKEN_KEY).await?;
        let refresh = self.get(REFRESH_TOKEN_KEY).await?;
        Some(TokenPair { access, refresh })
    }
}

/// Process-local token store, used by default and in tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(pair: &TokenPair) -> Self {
        let mut entries = HashMap::new();
        entries.insert(ACCESS_TOKEN_KEY.to_string(), pair.access.clone());
        entries.insert(REFRESH_TOKEN_KEY.to_string(), pair.refresh.clone());
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self, name: &str) -> Option<String> {
        self.entries.read().await.get(name).cloned()
    }

    async fn set(&self, name: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    async fn clear(&self, name: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_overwrites_previous_value() {
        let store = MemoryTokenStore::new();
        store.set(ACCESS_TOKEN_KEY, "A1").await.unwrap();
        store.set(ACCESS_TOKEN_KEY, "A2").await.unwrap();

        assert_eq!(store.get(ACCESS_TOKEN_KEY).await.as_deref(), Some("A2"));
    }

    #[tokio::test]
    async fn pair_requires_both_tokens() {
        let store = MemoryTokenStore::new();
        store.set(ACCESS_TOKEN_KEY, "A1").await.unwrap();
        assert!(store.pair().await.is_none());

        store.set(REFRESH_TOKEN_KEY, "R1").await.unwrap();
        let pair = store.pair().await.unwrap();
        assert_eq!(pair.access, "A1");
        assert_eq!(pair.refresh, "R1");
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let store = MemoryTokenStore::with_tokens(&TokenPair {
            access: "A1".into(),
            refresh: "R1".into(),
        });
        store.clear(REFRESH_TOKEN_KEY).await.unwrap();
        store.clear(REFRESH_TOKEN_KEY).await.unwrap();

        assert!(store.get(REFRESH_TOKEN_KEY).await.is_none());
        assert_eq!(store.get(ACCESS_TOKEN_KEY).await.as_deref(), Some("A1"));
    }
}
