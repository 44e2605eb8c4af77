use super::fetch_list;
use crate::api::{ApiClient, ApiError};
use crate::types::{Ack, ContactMessage, Health, Service};
use std::sync::Arc;

/// Public pages: services, the contact form and the health probe.
#[derive(Clone)]
pub struct Site {
    client: Arc<ApiClient>,
}

impl Site {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn services(&self) -> Result<Vec<Service>, ApiError> {
        fetch_list(&self.client, "/services/").await
    }

    pub async fn contact(&self, message: &ContactMessage) -> Result<Ack, ApiError> {
        let blank = [&message.name, &message.email, &message.message]
            .iter()
            .any(|v| v.trim().is_empty());
        if blank {
            return Err(ApiError::Validation("Please fill in all fields".to_string()));
        }
        self.client.post("/contact/", message).await
    }

    pub async fn health(&self) -> Result<Health, ApiError> {
        self.client.get("/health/").await
    }
}
