//! Slack Web API error types

use thiserror::Error;

/// Errors from Slack Web API calls
///
/// Slack reports logical failures as HTTP 200 with `{"ok": false}`, so a
/// dedicated `Api` variant carries the error code from the body while
/// `Http` covers non-2xx transport responses.
#[derive(Debug, Error)]
pub enum SlackError {
    /// Connection-level failure (connect, timeout, TLS, body read)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx HTTP status
    #[error("HTTP {status} from {method}")]
    Http { method: &'static str, status: u16 },

    /// Slack accepted the request but returned ok:false
    #[error("Slack API error from {method}: {code}")]
    Api { method: &'static str, code: String },

    /// Response body did not match the expected shape
    #[error("Invalid response from {method}: {message}")]
    InvalidResponse { method: &'static str, message: String },
}
