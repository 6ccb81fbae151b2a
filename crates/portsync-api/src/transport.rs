// Shared transport configuration for building reqwest::Client instances.
//
// NetBox and LibreNMS clients share TLS and timeout settings through this
// module; each injects its own auth header via `build_client`.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::Error;

/// TLS verification mode (api-level mirror of core's `TlsVerification`).
#[derive(Debug, Clone)]
pub enum TlsMode {
    /// Use the system certificate store.
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (for self-signed deployments).
    DangerAcceptInvalid,
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` with the given default headers.
    pub fn build_client(&self, headers: HeaderMap) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("portsync/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers);

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

/// Build a single-entry header map carrying an auth token.
///
/// The value is marked sensitive so it never shows up in debug output.
pub(crate) fn auth_headers(name: &'static str, value: &str) -> Result<HeaderMap, Error> {
    let mut header = HeaderValue::from_str(value).map_err(|_| Error::Authentication {
        message: "API token contains characters not allowed in an HTTP header".into(),
    })?;
    header.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static(name), header);
    Ok(headers)
}

/// Join `path` onto `base`, keeping any path prefix the base already has
/// (NetBox and LibreNMS are often served under a sub-path).
pub(crate) fn join_path(base: &url::Url, path: &str) -> Result<url::Url, Error> {
    let full = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Ok(url::Url::parse(&full)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn join_path_keeps_prefix() {
        let base = url::Url::parse("https://nms.example.net/librenms/").unwrap();
        let url = join_path(&base, "/api/v0/devices/4").unwrap();
        assert_eq!(url.as_str(), "https://nms.example.net/librenms/api/v0/devices/4");
    }

    #[test]
    fn auth_header_rejects_newlines() {
        let err = auth_headers("x-auth-token", "abc\ndef").unwrap_err();
        assert!(matches!(err, Error::Authentication { .. }));
    }

    #[test]
    fn auth_header_is_sensitive() {
        let headers = auth_headers("authorization", "Token abc").unwrap();
        assert!(headers["authorization"].is_sensitive());
    }
}
