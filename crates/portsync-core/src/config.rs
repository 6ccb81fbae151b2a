// ── Runtime connection configuration ──
//
// How to reach NetBox and LibreNMS. These types carry credentials and
// transport tuning but never touch disk: the CLI resolves profiles and
// hands a `SyncConfig` in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed certs).
    DangerAcceptInvalid,
}

/// One REST service: base URL plus API token.
#[derive(Debug, Clone)]
pub struct ServiceEndpoint {
    /// Base URL without the `/api` suffix, e.g. `https://netbox.example.com`.
    pub url: Url,
    pub token: SecretString,
}

impl ServiceEndpoint {
    pub fn new(url: Url, token: impl Into<String>) -> Self {
        Self {
            url,
            token: SecretString::from(token.into()),
        }
    }
}

/// Everything a sync needs to talk to both systems.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub netbox: ServiceEndpoint,
    pub librenms: ServiceEndpoint,
    /// Applies to both services.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Plan and report without writing to NetBox.
    pub dry_run: bool,
}

impl SyncConfig {
    pub fn new(netbox: ServiceEndpoint, librenms: ServiceEndpoint) -> Self {
        Self {
            netbox,
            librenms,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            dry_run: false,
        }
    }
}
