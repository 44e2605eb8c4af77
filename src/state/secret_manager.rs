use super::{StoreError, TokenStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

const KEYRING_SERVICE: &str = "com.saxansaxo.console";

/// Token store backed by the OS keychain / secret service, one entry per key.
#[derive(Clone, Default)]
pub struct SecretManager {
    in_memory: Arc<Mutex<HashMap<String, String>>>,
}

impl SecretManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry, keyring::Error> {
        keyring::Entry::new(KEYRING_SERVICE, key)
    }

    pub fn is_available(&self) -> bool {
        let Ok(entry) = self.entry(super::session::KEY_ACCESS_TOKEN) else {
            return false;
        };

        match entry.get_password() {
            Ok(_) => true,
            Err(keyring::Error::NoEntry) => true,
            Err(keyring::Error::BadEncoding(_)) => true,
            Err(keyring::Error::Ambiguous(_)) => true,
            Err(keyring::Error::NoStorageAccess(_)) => false,
            Err(keyring::Error::PlatformFailure(_)) => false,
            Err(_) => false,
        }
    }
}

#[async_trait]
impl TokenStore for SecretManager {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if let Some(value) = self.in_memory.lock().await.get(key).cloned() {
            return Ok(Some(value));
        }

        match self.entry(key)?.get_password() {
            Ok(pwd) => {
                let trimmed = pwd.trim().to_string();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                self.in_memory
                    .lock()
                    .await
                    .insert(key.to_string(), trimmed.clone());
                Ok(Some(trimmed))
            }
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err @ keyring::Error::NoStorageAccess(_)) => Err(err.into()),
            Err(err @ keyring::Error::PlatformFailure(_)) => Err(err.into()),
            Err(_) => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entry(key)?.set_password(value)?;
        self.in_memory
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.in_memory.lock().await.remove(key);
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
