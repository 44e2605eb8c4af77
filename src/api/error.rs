use crate::redact::redact_secrets;
use crate::state::StoreError;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Longest slice of a non-JSON error body that is kept as the message.
const MAX_TEXT_MESSAGE: usize = 300;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {}", redact_secrets(&.0.to_string()))]
    Network(#[from] reqwest::Error),
    #[error("{message}")]
    Status { status: StatusCode, message: String },
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected response: {0}")]
    Malformed(String),
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(err) => err.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Text suitable for showing to whoever triggered the call.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        Self::from_body(status, &text)
    }

    pub(crate) fn from_body(status: StatusCode, text: &str) -> Self {
        let text = redact_secrets(text);
        let message = match serde_json::from_str::<Value>(&text) {
            Ok(json) => extract_message(&json),
            Err(_) => {
                let trimmed = text.trim();
                (!trimmed.is_empty() && !trimmed.starts_with('<'))
                    .then(|| trimmed.chars().take(MAX_TEXT_MESSAGE).collect::<String>())
            }
        }
        .unwrap_or_else(|| default_message(status));

        Self::Status {
            status,
            message: redact_secrets(&message).into_owned(),
        }
    }
}

fn default_message(status: StatusCode) -> String {
    match status.as_u16() {
        400 => "The request was rejected. Please check your input.".to_string(),
        401 => "Authentication required.".to_string(),
        403 => "You do not have permission to perform this action.".to_string(),
        404 => "Not found.".to_string(),
        429 => "Rate limited. Please try again later.".to_string(),
        code => format!("API error ({code})"),
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(value_text).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        Value::Null => None,
        Value::Object(_) => flatten_fields(value),
        other => Some(other.to_string()),
    }
}

/// `{"field": ["a", "b"]}` becomes `field: a, b`, one line per field.
fn flatten_fields(value: &Value) -> Option<String> {
    let obj = value.as_object()?;
    let lines: Vec<String> = obj
        .iter()
        .filter_map(|(field, messages)| {
            let text = value_text(messages)?;
            Some(if field == "non_field_errors" {
                text
            } else {
                format!("{field}: {text}")
            })
        })
        .collect();
    (!lines.is_empty()).then(|| lines.join("\n"))
}

/// Picks the message a user should see out of an API error body.
pub fn extract_message(body: &Value) -> Option<String> {
    if let Some(errors) = body.get("errors").filter(|v| v.is_object()) {
        if let Some(text) = flatten_fields(errors) {
            return Some(text);
        }
    }

    for key in ["detail", "error", "message"] {
        if let Some(text) = body.get(key).and_then(value_text) {
            return Some(text);
        }
    }

    match body {
        Value::Object(_) => flatten_fields(body),
        Value::Array(_) | Value::String(_) => value_text(body),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_message_prefers_field_errors() {
        let body = json!({
            "errors": { "username": ["A user with that username already exists."] },
            "message": "Validation failed. Please check your input."
        });
        assert_eq!(
            extract_message(&body).as_deref(),
            Some("username: A user with that username already exists.")
        );
    }

    #[test]
    fn extract_message_uses_detail_then_error_then_message() {
        assert_eq!(
            extract_message(&json!({ "detail": "No active account found with the given credentials" }))
                .as_deref(),
            Some("No active account found with the given credentials")
        );
        assert_eq!(
            extract_message(&json!({ "error": "Invalid status" })).as_deref(),
            Some("Invalid status")
        );
        assert_eq!(
            extract_message(&json!({ "message": "Failed to create user." })).as_deref(),
            Some("Failed to create user.")
        );
    }

    #[test]
    fn extract_message_flattens_serializer_errors() {
        let body = json!({
            "email": ["Enter a valid email address."],
            "order": ["A valid integer is required.", "Too large."]
        });
        let text = extract_message(&body).unwrap();
        assert!(text.contains("email: Enter a valid email address."));
        assert!(text.contains("order: A valid integer is required., Too large."));
    }

    #[test]
    fn from_body_falls_back_to_status_text() {
        let err = ApiError::from_body(StatusCode::FORBIDDEN, "<html>nope</html>");
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
        assert_eq!(
            err.user_message(),
            "You do not have permission to perform this action."
        );

        let err = ApiError::from_body(StatusCode::BAD_GATEWAY, "");
        assert_eq!(err.user_message(), "API error (502)");
    }

    #[test]
    fn from_body_never_echoes_tokens() {
        let err = ApiError::from_body(
            StatusCode::BAD_REQUEST,
            r#"{"refresh": ["Token is blacklisted"], "access": "abc.def"}"#,
        );
        let text = err.user_message();
        assert!(text.contains("refresh: Token is blacklisted"));
        assert!(!text.contains("abc.def"));
    }
}
