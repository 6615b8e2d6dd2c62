// ── Core error types ──
//
// User-facing errors from zheye-core. Consumers never see raw reqwest or
// serde failures; the `From<zheye_api::Error>` impl translates them. The
// server's own message is carried through untouched so it can be shown
// to the user verbatim.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to server at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    Timeout,

    // ── Server errors ────────────────────────────────────────────────
    /// 401 from the server: bad credentials or a stale token.
    #[error("{message}")]
    AuthenticationFailed { message: String },

    #[error("{message}")]
    NotFound { message: String },

    /// Any other server-reported failure.
    #[error("{message}")]
    Rejected {
        message: String,
        /// HTTP status, or `None` for a 2xx envelope with a non-zero code.
        status: Option<u16>,
    },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Unexpected response from server: {message}")]
    InvalidResponse { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The server's message for a server-reported failure.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::AuthenticationFailed { message }
            | Self::NotFound { message }
            | Self::Rejected { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::AuthenticationFailed { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<zheye_api::Error> for CoreError {
    fn from(err: zheye_api::Error) -> Self {
        match err {
            zheye_api::Error::Api { status: 401, message } => {
                CoreError::AuthenticationFailed { message }
            }
            zheye_api::Error::Api { status: 404, message } => CoreError::NotFound { message },
            zheye_api::Error::Api { status, message } => CoreError::Rejected {
                message,
                status: Some(status),
            },
            zheye_api::Error::Rejected { message, .. } => CoreError::Rejected {
                message,
                status: None,
            },
            zheye_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Rejected {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            zheye_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            zheye_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            zheye_api::Error::Deserialization { message, body: _ } => {
                CoreError::InvalidResponse { message }
            }
        }
    }
}
