//! Deadline-bound HTTP exchange
//!
//! Every pipeline step follows the same shape: build a request, send it,
//! read the body, check the status, decode. This module owns the middle
//! part so each client only builds requests and decodes replies.

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::{ApiError, Deadline};

/// Raw reply from one exchange: status plus the full body text
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: StatusCode,
    pub body: String,
}

impl HttpReply {
    /// Require exactly `200 OK`, carrying the body into the error otherwise
    pub fn require_ok(self) -> Result<Self, ApiError> {
        if self.status != StatusCode::OK {
            return Err(ApiError::Status {
                status: self.status.as_u16(),
                body: self.body,
            });
        }
        Ok(self)
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body)
            .map_err(|e| ApiError::Decode(format!("{}: {:?}", e, self.body)))
    }
}

/// Send `request` and read its body, bounded by `deadline`.
pub async fn execute(deadline: &Deadline, request: RequestBuilder) -> Result<HttpReply, ApiError> {
    deadline
        .run(async move {
            let response = request.send().await.map_err(transport_error)?;
            let status = response.status();
            let body = response.text().await.map_err(transport_error)?;
            tracing::debug!(status = %status, body_len = body.len(), "HTTP exchange completed");
            Ok(HttpReply { status, body })
        })
        .await
}

fn transport_error(err: reqwest::Error) -> ApiError {
    // reqwest's Display omits the underlying cause; render the chain without the URL,
    // which may carry an access token in its query string.
    let err = err.without_url();
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    ApiError::Transport(message)
}
