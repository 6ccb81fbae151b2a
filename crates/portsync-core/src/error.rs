// ── Core error types ──
//
// What the sync runner and its callers see. HTTP details from
// `portsync_api` are folded into these variants by the `From` impl below.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to {service} at {url}: {reason}")]
    ConnectionFailed {
        service: &'static str,
        url: String,
        reason: String,
    },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Ambiguous result: {message}")]
    Ambiguous { message: String },

    /// Caller-supplied value that cannot be used (bad IP, bad payload).
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// `true` for "nothing there" results that the sync treats as empty input.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Api { status: Some(404), .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<portsync_api::Error> for CoreError {
    fn from(err: portsync_api::Error) -> Self {
        use portsync_api::Error as ApiError;

        match err {
            ApiError::Authentication { message } => Self::AuthenticationFailed { message },
            ApiError::Transport(ref e) => {
                if e.is_timeout() {
                    Self::Timeout
                } else if e.is_connect() {
                    Self::ConnectionFailed {
                        service: "server",
                        url: e.url().map(ToString::to_string).unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    Self::Api {
                        message: e.to_string(),
                        status: e.status().map(u16::from),
                    }
                }
            }
            ApiError::InvalidUrl(e) => Self::Config {
                message: format!("Invalid URL: {e}"),
            },
            ApiError::Tls(msg) => Self::ConnectionFailed {
                service: "server",
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            ApiError::NotFound { resource } => Self::NotFound { resource },
            ApiError::Api { status, message } => Self::Api {
                message,
                status: Some(status),
            },
            ApiError::Ambiguous { what, id } => Self::Ambiguous {
                message: format!("more than one of {what} for id {id}"),
            },
            ApiError::Deserialization { message, body: _ } => {
                Self::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
