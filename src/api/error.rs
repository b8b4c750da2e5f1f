#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub const REQUEST_FAILED: &str = "Request failed";
pub const LOGIN_FAILED: &str = "Login failed";
pub const UPLOAD_FAILED: &str = "Upload failed";

/// A non-2xx response from the backend.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Build the error from a raw response body, using the backend's
    /// `detail` when there is one and `fallback` otherwise.
    pub fn from_body(status: u16, body: &str, fallback: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.detail)
            .and_then(|detail| detail_message(&detail))
            .unwrap_or_else(|| fallback.to_string());
        Self::new(status, message)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
}

/// FastAPI reports plain errors as a string and validation errors as a list
/// of `{loc, msg, type}` objects.
fn detail_message(detail: &Value) -> Option<String> {
    let message = match detail {
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.to_string()),
                Value::Object(obj) => obj.get("msg").and_then(Value::as_str).map(str::to_string),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("; "),
        Value::Null => String::new(),
        other => other.to_string(),
    };

    if message.is_empty() { None } else { Some(message) }
}
