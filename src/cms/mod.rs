mod applications;
mod company;
mod jobs;
mod profiles;
mod site;
mod team;
mod users;

pub use applications::Applications;
pub use company::Company;
pub use jobs::Jobs;
pub use profiles::Profiles;
pub use site::Site;
pub use team::Team;
pub use users::Users;

use crate::api::{ApiClient, ApiError};
use crate::types::ListResponse;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// GETs a list endpoint, accepting both paginated and bare-array answers.
pub(crate) async fn fetch_list<T: DeserializeOwned>(
    client: &ApiClient,
    path: &str,
) -> Result<Vec<T>, ApiError> {
    let list: ListResponse<T> = client.get(path).await?;
    Ok(list.into_vec())
}

/// Resource clients for the site and its CMS, all sharing one `ApiClient`.
#[derive(Clone)]
pub struct Cms {
    pub jobs: Jobs,
    pub team: Team,
    pub applications: Applications,
    pub users: Users,
    pub company: Company,
    pub profiles: Profiles,
    pub site: Site,
}

impl Cms {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            jobs: Jobs::new(client.clone()),
            team: Team::new(client.clone()),
            applications: Applications::new(client.clone()),
            users: Users::new(client.clone()),
            company: Company::new(client.clone()),
            profiles: Profiles::new(client.clone()),
            site: Site::new(client),
        }
    }
}
