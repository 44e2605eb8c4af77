use super::fetch_list;
use crate::api::{ApiClient, ApiError};
use crate::types::{Job, JobInput};
use std::sync::Arc;

const JOBS_PATH: &str = "/jobs/";

fn job_path(id: i64) -> String {
    format!("{JOBS_PATH}{id}/")
}

#[derive(Clone)]
pub struct Jobs {
    client: Arc<ApiClient>,
}

impl Jobs {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Job>, ApiError> {
        fetch_list(&self.client, JOBS_PATH).await
    }

    pub async fn get(&self, id: i64) -> Result<Job, ApiError> {
        self.client.get(&job_path(id)).await
    }

    pub async fn create(&self, input: &JobInput) -> Result<Job, ApiError> {
        if input.title.as_deref().map_or(true, |t| t.trim().is_empty()) {
            return Err(ApiError::Validation("Job title is required".to_string()));
        }
        self.client.post(JOBS_PATH, input).await
    }

    pub async fn update(&self, id: i64, input: &JobInput) -> Result<Job, ApiError> {
        self.client.patch(&job_path(id), input).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&job_path(id)).await
    }
}
