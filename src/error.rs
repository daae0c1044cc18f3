//! Client error type.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is terminal for the call that raised it. Nothing here is
//! retried; `Unauthorized` additionally means the session has already been
//! cleared by the request augmenter.

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (connect, TLS, body read).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered 401; the local session was cleared.
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// The backend answered with any other non-success status.
    #[error("server returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// A response body did not match the expected shape.
    #[error("invalid JSON payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The bearer token cannot be carried in an HTTP header.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ClientError {
    /// Stable machine-readable code for logs and CLI output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Http(_) => "E_HTTP",
            Self::Unauthorized { .. } => "E_UNAUTHORIZED",
            Self::Status { .. } => "E_STATUS",
            Self::Decode(_) => "E_DECODE",
            Self::InvalidHeader(_) => "E_INVALID_HEADER",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    /// HTTP status carried by the error, if the backend answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Status { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Pull the human-readable message out of a backend error body.
///
/// The backend wraps failures as `{"error": "..."}`; anything else is passed
/// through as raw text.
#[must_use]
pub fn error_message_from_body(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(serde_json::Value::as_str).map(ToOwned::to_owned))
        .unwrap_or_else(|| body.trim().to_owned())
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
