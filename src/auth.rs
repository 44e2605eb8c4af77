use crate::api::{ApiClient, ApiError};
use crate::types::{RegisterPayload, TokenPair, User};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;

pub const LOGIN_PATH: &str = "/auth/login/";
pub const REGISTER_PATH: &str = "/auth/register/";
pub const ME_PATH: &str = "/auth/me/";

/// Login, registration and the cached current user.
pub struct AuthService {
    client: Arc<ApiClient>,
    user: Mutex<Option<User>>,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            user: Mutex::new(None),
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<User, ApiError> {
        let pair: TokenPair = self
            .client
            .post(LOGIN_PATH, &json!({ "username": username, "password": password }))
            .await?;
        self.client.session().store_pair(&pair).await?;
        tracing::info!(username, "logged in");
        self.current_user().await
    }

    /// Rejects mismatched passwords locally; nothing is sent in that case.
    pub async fn register(&self, payload: &RegisterPayload) -> Result<User, ApiError> {
        payload.validate().map_err(ApiError::Validation)?;

        let pair: TokenPair = self.client.post(REGISTER_PATH, payload).await?;
        self.client.session().store_pair(&pair).await?;
        tracing::info!(username = %payload.username, "registered");
        self.current_user().await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        *self.user.lock().await = None;
        self.client.session().clear().await?;
        tracing::info!("logged out");
        Ok(())
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        let user: User = self.client.get(ME_PATH).await?;
        *self.user.lock().await = Some(user.clone());
        Ok(user)
    }

    /// Resolves the user behind stored tokens, signing out if that fails.
    pub async fn bootstrap(&self) -> Option<User> {
        if !self.is_authenticated().await {
            return None;
        }
        match self.current_user().await {
            Ok(user) => Some(user),
            Err(err) => {
                tracing::warn!(error = %err, "stored session is no longer valid");
                if let Err(clear_err) = self.logout().await {
                    tracing::warn!(error = %clear_err, "failed to clear stored tokens");
                }
                None
            }
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.client.session().is_authenticated().await
    }

    pub async fn user(&self) -> Option<User> {
        self.user.lock().await.clone()
    }

    pub async fn is_admin(&self) -> bool {
        self.user().await.is_some_and(|u| u.is_admin())
    }
}
