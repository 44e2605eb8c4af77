use super::fetch_list;
use crate::api::{ApiClient, ApiError, ApiRequest, MultipartForm};
use crate::types::{TeamMember, TeamMemberInput};
use std::sync::Arc;

const TEAM_PATH: &str = "/team/";

fn bool_text(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Blank text fields are left out so a PATCH does not wipe them.
fn team_form(input: &TeamMemberInput) -> MultipartForm {
    let mut form = MultipartForm::new()
        .text_if_present("name", input.name.as_deref())
        .text_if_present("position", input.position.as_deref())
        .text_if_present("bio", input.bio.as_deref())
        .text_if_present("email", input.email.as_deref())
        .text_if_present("linkedin", input.linkedin.as_deref())
        .text_if_present("twitter", input.twitter.as_deref())
        .text_if_present("github", input.github.as_deref());
    if let Some(active) = input.is_active {
        form = form.text("is_active", bool_text(active));
    }
    if let Some(order) = input.order {
        form = form.text("order", order.to_string());
    }
    form.file_if_present("image", input.image.as_ref())
}

#[derive(Clone)]
pub struct Team {
    client: Arc<ApiClient>,
}

impl Team {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<TeamMember>, ApiError> {
        fetch_list(&self.client, TEAM_PATH).await
    }

    pub async fn create(&self, input: &TeamMemberInput) -> Result<TeamMember, ApiError> {
        if input.name.as_deref().map_or(true, |n| n.trim().is_empty()) {
            return Err(ApiError::Validation("Name is required".to_string()));
        }
        let request = ApiRequest::post(TEAM_PATH).multipart(team_form(input));
        self.client.send_json(request).await
    }

    pub async fn update(&self, id: i64, input: &TeamMemberInput) -> Result<TeamMember, ApiError> {
        let request = ApiRequest::patch(format!("{TEAM_PATH}{id}/")).multipart(team_form(input));
        self.client.send_json(request).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("{TEAM_PATH}{id}/")).await
    }
}
