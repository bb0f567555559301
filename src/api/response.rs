use reqwest::Response;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ApiError;

/// Successful outcome of a call: the decoded body and the HTTP status.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// Decoded JSON body, `Null` when the body was empty or not JSON.
    pub data: Value,
    pub status: u16,
}

impl ApiResponse {
    /// Decodes `data` into a typed value.
    pub fn json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        serde_json::from_value(self.data).map_err(ApiError::UnexpectedBody)
    }
}

/// Turns one HTTP response into the call outcome.
///
/// A body that cannot be read or decoded becomes `Null`; that alone is never an
/// error. Non-2xx statuses become [`ApiError::Status`].
pub async fn normalize(response: Response) -> Result<ApiResponse, ApiError> {
    let status = response.status();
    let data = match response.bytes().await {
        Ok(body) => decode_body(&body),
        Err(e) => {
            log::debug!("failed to read response body: {e}");
            Value::Null
        }
    };

    if status.is_success() {
        Ok(ApiResponse {
            data,
            status: status.as_u16(),
        })
    } else {
        Err(ApiError::from_response(status, data))
    }
}

fn decode_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}
