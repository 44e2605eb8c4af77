mod client;
mod error;
mod request;

pub use client::{ApiClient, DEFAULT_BASE_URL, REFRESH_PATH};
pub use error::{extract_message, ApiError};
pub use request::{ApiRequest, Body, MultipartForm};
