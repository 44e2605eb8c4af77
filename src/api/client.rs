use super::request::{ApiRequest, Body};
use super::ApiError;
use crate::redact::redact_secrets;
use crate::routes::Route;
use crate::state::{NavBus, Session};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const REFRESH_PATH: &str = "/auth/refresh/";

const CLIENT_USER_AGENT: &str = concat!("saxansaxo-console/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct RefreshResponse {
  #[serde(default)]
  access: Option<String>,
}

fn build_headers() -> HeaderMap {
  let mut headers = HeaderMap::new();
  headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
  headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
  headers
}

fn bearer(token: &str) -> Option<HeaderValue> {
  match HeaderValue::from_str(&format!("Bearer {token}")) {
    Ok(mut value) => {
      value.set_sensitive(true);
      Some(value)
    }
    Err(_) => {
      tracing::warn!(
        token_len = token.len(),
        "stored access token is not a valid header value; sending request without it"
      );
      None
    }
  }
}

fn normalize_base_url(base_url: &str) -> String {
  let trimmed = base_url.trim().trim_end_matches('/');
  if trimmed.is_empty() {
    DEFAULT_BASE_URL.to_string()
  } else {
    trimmed.to_string()
  }
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
  if response.status().is_success() {
    Ok(response)
  } else {
    Err(ApiError::from_response(response).await)
  }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
  let text = response.text().await?;
  Ok(serde_json::from_str(&text)?)
}

/// HTTP client for the site API.
///
/// Every request carries `Authorization: Bearer <access>` when an access token
/// is stored. A 401 is answered once per request by exchanging the refresh
/// token and replaying; if that exchange fails the session is cleared and the
/// login page is requested over the navigation bus.
pub struct ApiClient {
  http: reqwest::Client,
  base_url: String,
  session: Session,
  nav: NavBus,
}

impl ApiClient {
  pub fn new(base_url: &str, session: Session, nav: NavBus) -> Result<Self, ApiError> {
    Ok(Self {
      http: reqwest::Client::builder()
        .default_headers(build_headers())
        .build()?,
      base_url: normalize_base_url(base_url),
      session,
      nav,
    })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  pub fn session(&self) -> &Session {
    &self.session
  }

  fn url(&self, path: &str) -> String {
    if path.starts_with('/') {
      format!("{}{path}", self.base_url)
    } else {
      format!("{}/{path}", self.base_url)
    }
  }

  pub async fn send(&self, mut request: ApiRequest) -> Result<Response, ApiError> {
    loop {
      let access = self.session.access_token().await?;
      let response = self.dispatch(&request, access.as_deref()).await?;

      if response.status() != StatusCode::UNAUTHORIZED || request.is_retried() {
        return ensure_success(response).await;
      }
      request.mark_retried();

      let Some(refresh) = self.session.refresh_token().await? else {
        tracing::debug!(path = request.path(), "401 without a refresh token");
        return Err(ApiError::from_response(response).await);
      };

      match self.exchange_refresh(&refresh).await {
        Ok(access) => {
          self.session.store_access(&access).await?;
          tracing::info!(path = request.path(), "access token refreshed; replaying request");
        }
        Err(err) => {
          tracing::warn!(
            path = request.path(),
            error = %redact_secrets(&err.to_string()),
            "token refresh failed; signing out"
          );
          if let Err(clear_err) = self.session.clear().await {
            tracing::warn!(error = %clear_err, "failed to clear stored tokens");
          }
          self.nav.redirect(Route::Login);
          return Err(ApiError::from_response(response).await);
        }
      }
    }
  }

  async fn dispatch(&self, request: &ApiRequest, access: Option<&str>) -> Result<Response, ApiError> {
    let mut builder = self.http.request(request.method().clone(), self.url(request.path()));
    if let Some(value) = access.and_then(bearer) {
      builder = builder.header(AUTHORIZATION, value);
    }
    builder = match request.body() {
      Body::Empty => builder,
      Body::Json(value) => builder.json(value),
      Body::Multipart(form) => builder.multipart(form.to_reqwest()?),
    };

    let response = builder.send().await?;
    tracing::debug!(
      method = %request.method(),
      path = request.path(),
      status = response.status().as_u16(),
      retried = request.is_retried(),
      "api request"
    );
    Ok(response)
  }

  /// Plain POST to the refresh endpoint, deliberately without the bearer header.
  async fn exchange_refresh(&self, refresh: &str) -> Result<String, ApiError> {
    let response = self
      .http
      .post(self.url(REFRESH_PATH))
      .json(&json!({ "refresh": refresh }))
      .send()
      .await?;
    let response = ensure_success(response).await?;
    let body: RefreshResponse = decode(response).await?;
    body
      .access
      .map(|s| s.trim().to_string())
      .filter(|s| !s.is_empty())
      .ok_or_else(|| ApiError::Malformed("refresh response has no access token".to_string()))
  }

  pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
    let response = self.send(request).await?;
    decode(response).await
  }

  pub async fn send_empty(&self, request: ApiRequest) -> Result<(), ApiError> {
    self.send(request).await?;
    Ok(())
  }

  pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
    self.send_json(ApiRequest::get(path)).await
  }

  pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
  where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
  {
    self.send_json(ApiRequest::post(path).json(body)?).await
  }

  pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
  where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
  {
    self.send_json(ApiRequest::patch(path).json(body)?).await
  }

  pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
    self.send_empty(ApiRequest::delete(path)).await
  }
}
