use clinproto_auth::error::AuthError;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The refresh token was missing or rejected. Stored credentials have
    /// already been cleared; the caller must sign in again.
    #[error("session expired")]
    SessionExpired,

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("credential store error: {0}")]
    Credentials(#[from] AuthError),
}

impl ApiError {
    pub(crate) fn from_response(status: StatusCode, body: &str) -> Self {
        ApiError::Status {
            status: status.as_u16(),
            message: detail_message(status, body),
        }
    }

    /// One-line message for an error banner.
    pub fn user_message(&self) -> String {
        match self {
            Self::SessionExpired => "Your session has expired. Please sign in again.".to_string(),
            Self::Status { message, .. } => message.clone(),
            Self::Network(_) => {
                "Unable to reach the server. Please check your connection and try again."
                    .to_string()
            }
            Self::Decode(_) | Self::InvalidUrl(_) | Self::Credentials(_) => {
                "An unexpected error occurred.".to_string()
            }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Pull the human-readable message out of an error body.
///
/// The server answers `{"detail": "..."}`, or `{"detail": [{"msg": ...}]}`
/// for request validation failures.
pub fn detail_message(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("detail").cloned());

    let message = match detail {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::Array(items)) => items
            .first()
            .and_then(|item| item.get("msg"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    };

    message.unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    })
}
