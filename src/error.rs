//! Error type for the REST boundary.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Failure of a single API call.
///
/// Every failure is ultimately surfaced to the state layer as its message
/// string; the variants exist so the dispatcher can tell an expired session
/// apart from everything else.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: StatusCode, message: String },
}

impl ApiError {
    /// Builds an API error from a non-success response status and body.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        ApiError::Api {
            status,
            message: extract_message(status, body),
        }
    }

    /// The human-readable message attached to failure actions.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Api { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }
}

/// Pulls a message out of the common error-body shapes:
/// `{"error": "..."}`, `{"error": {"message": "..."}}` and
/// `{"message": "..."}`. Falls back to the status line.
fn extract_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(msg) = value.get("error").and_then(Value::as_str) {
            return msg.to_string();
        }
        if let Some(msg) = value
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
        {
            return msg.to_string();
        }
        if let Some(msg) = value.get("message").and_then(Value::as_str) {
            return msg.to_string();
        }
    }

    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => format!("HTTP {}", status.as_u16()),
    }
}
