use super::fetch_list;
use crate::api::{ApiClient, ApiError, ApiRequest, MultipartForm};
use crate::types::{ProfileUpdate, UserProfile};
use serde_json::json;
use std::sync::Arc;

const PROFILES_PATH: &str = "/profiles/";

fn profile_form(update: &ProfileUpdate) -> MultipartForm {
    let mut form = MultipartForm::new();
    if let Some(phone) = update.phone.as_deref() {
        form = form.text("phone", phone.trim());
    }
    if let Some(bio) = update.bio.as_deref() {
        form = form.text("bio", bio.trim());
    }
    form.file_if_present("resume", update.resume.as_ref())
        .file_if_present("avatar", update.avatar.as_ref())
}

#[derive(Clone)]
pub struct Profiles {
    client: Arc<ApiClient>,
}

impl Profiles {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// The signed-in user's profile, created empty on first access.
    pub async fn mine(&self) -> Result<UserProfile, ApiError> {
        match fetch_list::<UserProfile>(&self.client, PROFILES_PATH).await {
            Ok(profiles) => {
                if let Some(profile) = profiles.into_iter().next() {
                    return Ok(profile);
                }
            }
            Err(err) if err.is_not_found() => {}
            Err(err) => return Err(err),
        }

        tracing::info!("no profile yet; creating one");
        self.client
            .post(PROFILES_PATH, &json!({ "phone": "", "bio": "" }))
            .await
    }

    pub async fn update(&self, id: i64, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        let request =
            ApiRequest::patch(format!("{PROFILES_PATH}{id}/")).multipart(profile_form(update));
        self.client.send_json(request).await
    }
}
