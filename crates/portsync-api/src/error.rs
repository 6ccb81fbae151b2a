use thiserror::Error;

/// Top-level error type for the `portsync-api` crate.
///
/// Covers transport, authentication, and response-level failures for both
/// the NetBox and LibreNMS clients. `portsync-core` maps these into
/// domain-level errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Token rejected (HTTP 401/403) or unusable as a header value.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Responses ───────────────────────────────────────────────────
    /// The requested object does not exist (HTTP 404 or an empty result).
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// Non-success status or a `status != "ok"` envelope.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// A lookup by id returned more than one object.
    #[error("Too many {what} found for id {id}")]
    Ambiguous { what: &'static str, id: i64 },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } | Self::Api { status: 404, .. } => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_variants() {
        assert!(
            Error::NotFound {
                resource: "/api/v0/devices/1".into()
            }
            .is_not_found()
        );
        assert!(
            Error::Api {
                status: 404,
                message: String::new()
            }
            .is_not_found()
        );
        assert!(
            !Error::Api {
                status: 500,
                message: String::new()
            }
            .is_not_found()
        );
    }
}
