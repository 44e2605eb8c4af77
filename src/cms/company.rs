use crate::api::{ApiClient, ApiError};
use crate::types::{CompanyInfo, CompanyUpdate};
use serde_json::Value;
use std::sync::Arc;

const DEFAULT_COMPANY_ID: i64 = 1;
const COMPANY_PATH: &str = "/company/";

/// Picks the company record out of whatever the list endpoint returned.
fn first_company(value: Value) -> Result<CompanyInfo, ApiError> {
    let record = match value {
        Value::Array(items) => items.into_iter().next(),
        Value::Object(map) => match map.get("results") {
            Some(Value::Array(items)) => items.first().cloned(),
            _ => Some(Value::Object(map)),
        },
        _ => None,
    };
    let record =
        record.ok_or_else(|| ApiError::Malformed("no company information".to_string()))?;
    Ok(serde_json::from_value(record)?)
}

#[derive(Clone)]
pub struct Company {
    client: Arc<ApiClient>,
}

impl Company {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Reads the singleton record, falling back to the list endpoint.
    pub async fn get(&self) -> Result<CompanyInfo, ApiError> {
        let path = format!("{COMPANY_PATH}{DEFAULT_COMPANY_ID}/");
        match self.client.get::<CompanyInfo>(&path).await {
            Ok(company) => Ok(company),
            Err(err) if err.is_unauthorized() => Err(err),
            Err(err) => {
                tracing::debug!(error = %err, "company detail unavailable; trying list");
                first_company(self.client.get(COMPANY_PATH).await?)
            }
        }
    }

    pub async fn update(&self, id: Option<i64>, update: &CompanyUpdate) -> Result<CompanyInfo, ApiError> {
        let id = id.unwrap_or(DEFAULT_COMPANY_ID);
        self.client.patch(&format!("{COMPANY_PATH}{id}/"), update).await
    }
}
