//! Shared plumbing for the Google REST surfaces (response decoding, error
//! envelope). Both service clients funnel their responses through here.

use crate::{Error, Result};
use serde::Deserialize;

/// Standard Google API error envelope (`{"error": {"code", "message", ...}}`).
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Decode a response body, turning non-2xx statuses into [`Error::Api`]
/// with the message from the Google error envelope when one is present.
pub(crate) async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(Into::into);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    Err(Error::Api {
        status: status.as_u16(),
        message,
    })
}
