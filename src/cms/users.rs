use super::fetch_list;
use crate::api::{ApiClient, ApiError};
use crate::types::{User, UserUpdate};
use std::sync::Arc;

#[derive(Clone)]
pub struct Users {
    client: Arc<ApiClient>,
}

impl Users {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        fetch_list(&self.client, "/users/").await
    }

    pub async fn update(&self, id: i64, update: &UserUpdate) -> Result<User, ApiError> {
        self.client.patch(&format!("/users/{id}/"), update).await
    }
}
