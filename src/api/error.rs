//! Normalized errors returned by every [`ApiClient`](super::ApiClient) call.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Message used when a failed response carries no usable `error` or `detail`.
pub const GENERIC_FAILURE: &str = "Request failed";

#[derive(Debug, Error)]
pub enum ApiError {
    /// No HTTP response was obtained (connection refused, DNS failure, timeout).
    #[error("could not reach server: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Status {
        status: StatusCode,
        message: String,
        data: Value,
    },

    /// A 401 could not be recovered by refreshing the access token. Stored
    /// tokens have been cleared and the session-expired notifier has fired.
    #[error("Session expired")]
    SessionExpired,

    #[error("invalid client configuration: {0}")]
    Configuration(String),

    #[error("request body is not serializable: {0}")]
    Serialization(#[source] serde_json::Error),

    /// A successful response did not have the shape the caller asked for.
    #[error("unexpected response body: {0}")]
    UnexpectedBody(#[source] serde_json::Error),
}

impl ApiError {
    /// Builds the error for a non-2xx response from its decoded body.
    pub fn from_response(status: StatusCode, data: Value) -> Self {
        let message = failure_message(&data);
        ApiError::Status {
            status,
            message,
            data,
        }
    }

    /// HTTP status of the failed response, `None` when no response was obtained.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Decoded body of the failed response (`Null` when it was not JSON).
    pub fn data(&self) -> Option<&Value> {
        match self {
            ApiError::Status { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired)
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

fn failure_message(data: &Value) -> String {
    ["error", "detail"]
        .iter()
        .filter_map(|field| data.get(field).and_then(Value::as_str))
        .find(|text| !text.is_empty())
        .unwrap_or(GENERIC_FAILURE)
        .to_string()
}
