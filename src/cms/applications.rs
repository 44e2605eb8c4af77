use super::fetch_list;
use crate::api::{ApiClient, ApiError, ApiRequest, MultipartForm};
use crate::types::{
    Ack, ApplicationSubmission, JobApplication, StatusUpdate, StatusUpdateResponse,
};
use std::sync::Arc;

const APPLICATIONS_PATH: &str = "/applications/";

fn submission_form(submission: &ApplicationSubmission) -> Result<MultipartForm, ApiError> {
    let resume = submission.validate().map_err(ApiError::Validation)?;
    Ok(MultipartForm::new()
        .text("job", submission.job.to_string())
        .text("first_name", submission.first_name.trim())
        .text("last_name", submission.last_name.trim())
        .text("email", submission.email.trim())
        .text("phone", submission.phone.trim())
        .text_if_present("cover_letter", Some(submission.cover_letter.as_str()))
        .file("resume", resume.clone()))
}

/// Job applications. Admins see every application, other users only their own.
#[derive(Clone)]
pub struct Applications {
    client: Arc<ApiClient>,
}

impl Applications {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<JobApplication>, ApiError> {
        fetch_list(&self.client, APPLICATIONS_PATH).await
    }

    pub async fn submit(&self, submission: &ApplicationSubmission) -> Result<Ack, ApiError> {
        let form = submission_form(submission)?;
        let request = ApiRequest::post(APPLICATIONS_PATH).multipart(form);
        let ack: Ack = self.client.send_json(request).await?;
        tracing::info!(job = submission.job, "application submitted");
        Ok(ack)
    }

    pub async fn update_status(
        &self,
        id: i64,
        update: &StatusUpdate,
    ) -> Result<StatusUpdateResponse, ApiError> {
        self.client
            .patch(&format!("{APPLICATIONS_PATH}{id}/update_status/"), update)
            .await
    }
}
