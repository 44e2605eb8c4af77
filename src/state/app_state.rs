use super::{MemoryTokenStore, NavBus, SecretManager, Session, StoreError, TokenStore};
use crate::api::{ApiClient, ApiError};
use crate::auth::AuthService;
use crate::cms::Cms;
use crate::routes::Route;
use crate::settings::{Settings, SettingsStore, TokenStorage};
use std::sync::Arc;
use tokio::sync::mpsc;

fn open_token_store(settings: &Settings) -> Result<Arc<dyn TokenStore>, StoreError> {
    match settings.token_storage {
        TokenStorage::Memory => Ok(Arc::new(MemoryTokenStore::new())),
        TokenStorage::Keyring => {
            let secrets = SecretManager::new();
            if secrets.is_available() {
                return Ok(Arc::new(secrets));
            }
            tracing::warn!(
                path = %settings.session_file().display(),
                "OS keychain unavailable; keeping tokens in the session file"
            );
            Ok(Arc::new(SettingsStore::open(&settings.session_file())?))
        }
        TokenStorage::File => Ok(Arc::new(SettingsStore::open(&settings.session_file())?)),
    }
}

/// Everything a command needs: one client, one session, one auth service.
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub client: Arc<ApiClient>,
    pub auth: Arc<AuthService>,
    pub cms: Cms,
}

impl AppState {
    /// Builds the state and hands back the receiving end of the navigation bus.
    pub fn new(settings: Settings) -> Result<(Self, mpsc::UnboundedReceiver<Route>), ApiError> {
        let store = open_token_store(&settings)?;
        Self::with_store(settings, store)
    }

    pub fn with_store(
        settings: Settings,
        store: Arc<dyn TokenStore>,
    ) -> Result<(Self, mpsc::UnboundedReceiver<Route>), ApiError> {
        let (nav, nav_rx) = NavBus::channel();
        let client = Arc::new(ApiClient::new(&settings.api_url, Session::new(store), nav)?);
        tracing::debug!(
            api_url = client.base_url(),
            token_storage = %settings.token_storage,
            "client ready"
        );

        let state = Self {
            auth: Arc::new(AuthService::new(client.clone())),
            cms: Cms::new(client.clone()),
            client,
            settings,
        };
        Ok((state, nav_rx))
    }

    pub fn session(&self) -> &Session {
        self.client.session()
    }
}
