//! Error taxonomy for proxied operations.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors a proxy operation can surface to the caller.
///
/// Every variant maps onto exactly one HTTP response; nothing is retried
/// or swallowed.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Store URL or API key was absent at startup. No upstream call is
    /// attempted; requests fail until the operator fixes the environment.
    #[error("Missing Supabase config")]
    MissingConfig,

    /// The upstream exchange failed below HTTP (connect, timeout, read).
    #[error("{0}")]
    Transport(String),

    /// Upstream answered 200 with a body that is not JSON. The body is
    /// logged but never forwarded.
    #[error("Invalid JSON from Supabase")]
    InvalidUpstreamJson,

    /// Upstream rejected a write; its status and body are passed through.
    #[error("upstream rejected request with status {status}")]
    UpstreamRejection { status: StatusCode, body: String },
}

/// Result type for proxy operations.
pub type ProxyResult<T> = Result<T, ProxyError>;

impl ProxyError {
    /// Status code the variant maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingConfig | ProxyError::InvalidUpstreamJson => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ProxyError::Transport(_) => StatusCode::BAD_GATEWAY,
            ProxyError::UpstreamRejection { status, .. } => *status,
        }
    }

    pub(crate) fn transport(err: reqwest::Error) -> Self {
        ProxyError::Transport(err.to_string())
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        // InvalidUpstreamJson keeps the `error` envelope the dashboard
        // expects; everything else uses the `detail` envelope.
        let body = match &self {
            ProxyError::InvalidUpstreamJson => json!({ "error": self.to_string() }),
            ProxyError::UpstreamRejection { body, .. } => json!({ "detail": body }),
            other => json!({ "detail": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
