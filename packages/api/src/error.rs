use reqwest::StatusCode;
use serde::Deserialize;
use store::StorageError;

use crate::validation::ValidationError;

/// Every way a client operation can fail.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A form field failed a client-side check; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The server answered with a non-2xx status other than 401.
    #[error("request failed with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Request { status: u16, message: Option<String> },

    /// The server rejected the token (401). The session has already been
    /// cleared by the time the caller sees this.
    #[error("session expired: {}", .message.as_deref().unwrap_or("unauthorized"))]
    AuthExpired { message: Option<String> },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The configured base URL cannot have paths appended to it.
    #[error("invalid base url: {0}")]
    BaseUrl(String),

    /// A path segment, usually an id, that would not name a single resource.
    #[error("invalid path segment {0:?}")]
    PathSegment(String),

    /// An operation needs the signed-in user but none is stored.
    #[error("not signed in")]
    NotAuthenticated,

    #[error("unexpected response body: {0}")]
    Decode(#[source] serde_json::Error),
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiError {
    /// Build the error for a non-success response from its status and raw body.
    pub(crate) fn from_response(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty());
        if status == StatusCode::UNAUTHORIZED {
            ApiError::AuthExpired { message }
        } else {
            ApiError::Request {
                status: status.as_u16(),
                message,
            }
        }
    }

    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            ApiError::AuthExpired { .. } => Some(StatusCode::UNAUTHORIZED.as_u16()),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ApiError::AuthExpired { .. })
    }

    /// Message to show the user: the server's `message` when it sent one,
    /// the validation message for form errors, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Validation(e) => e.message.to_string(),
            ApiError::Request {
                message: Some(message),
                ..
            }
            | ApiError::AuthExpired {
                message: Some(message),
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}
