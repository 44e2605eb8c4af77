use super::{MemoryTokenStore, StoreError, TokenStore};
use crate::types::TokenPair;
use std::sync::Arc;

pub const KEY_ACCESS_TOKEN: &str = "access_token";
pub const KEY_REFRESH_TOKEN: &str = "refresh_token";

fn normalize(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim().to_string();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    })
}

/// The single access/refresh pair held by this client.
///
/// Both entries are absent while logged out and present while logged in;
/// `store_pair` and `clear` always touch both keys.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    pub async fn access_token(&self) -> Result<Option<String>, StoreError> {
        Ok(normalize(self.store.get(KEY_ACCESS_TOKEN).await?))
    }

    pub async fn refresh_token(&self) -> Result<Option<String>, StoreError> {
        Ok(normalize(self.store.get(KEY_REFRESH_TOKEN).await?))
    }

    pub async fn store_pair(&self, pair: &TokenPair) -> Result<(), StoreError> {
        self.store.set(KEY_ACCESS_TOKEN, pair.access.trim()).await?;
        self.store.set(KEY_REFRESH_TOKEN, pair.refresh.trim()).await
    }

    pub async fn store_access(&self, access: &str) -> Result<(), StoreError> {
        self.store.set(KEY_ACCESS_TOKEN, access.trim()).await
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        let access = self.store.remove(KEY_ACCESS_TOKEN).await;
        let refresh = self.store.remove(KEY_REFRESH_TOKEN).await;
        access.and(refresh)
    }

    /// Presence check only; the token is not validated locally.
    pub async fn is_authenticated(&self) -> bool {
        matches!(self.access_token().await, Ok(Some(_)))
    }
}
