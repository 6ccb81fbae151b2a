//! Configuration for the portsync CLI.
//!
//! TOML profiles naming a NetBox and a LibreNMS endpoint, token
//! resolution (env + keyring + plaintext), and translation to
//! `portsync_core::SyncConfig`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use portsync_core::{ServiceEndpoint, SyncConfig, TlsVerification};

/// Keyring service name; entries are keyed `{profile}/{service}-token`.
pub const KEYRING_SERVICE: &str = "portsync";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found")]
    ProfileNotFound { name: String },

    #[error("no {service} token configured for profile '{profile}'")]
    NoCredentials { profile: String, service: Service },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Services ────────────────────────────────────────────────────────

/// The two systems a profile points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Netbox,
    Librenms,
}

impl Service {
    fn key(self) -> &'static str {
        match self {
            Self::Netbox => "netbox",
            Self::Librenms => "librenms",
        }
    }

    /// Unprefixed variables read when no profile provides a value.
    fn legacy_env(self) -> (&'static str, &'static str) {
        match self {
            Self::Netbox => ("NETBOX_URL", "NETBOX_TOKEN"),
            Self::Librenms => ("LIBRENMS_URL", "LIBRENMS_TOKEN"),
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Netbox => "NetBox",
            Self::Librenms => "LibreNMS",
        })
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// Where to reach one service.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServiceProfile {
    /// Base URL without the `/api` suffix.
    pub url: String,

    /// API token (plaintext; prefer keyring or env var).
    pub token: Option<String>,

    /// Environment variable name containing the token.
    pub token_env: Option<String>,
}

/// A named pair of endpoints.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    pub netbox: ServiceProfile,

    pub librenms: ServiceProfile,

    /// Path to custom CA certificate (both services).
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,
}

impl Profile {
    pub fn service(&self, service: Service) -> &ServiceProfile {
        match service {
            Service::Netbox => &self.netbox,
            Service::Librenms => &self.librenms,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "portsync", "portsync").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("portsync");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file; a missing file yields the defaults.
///
/// `PORTSYNC_`-prefixed variables override file values, with `__` as the
/// nesting separator (`PORTSYNC_PROFILES__LAB__NETBOX__URL`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("PORTSYNC_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Profile selection ───────────────────────────────────────────────

/// Pick the requested profile, falling back to the legacy
/// `NETBOX_URL` / `LIBRENMS_URL` variables when the config has none.
pub fn select_profile(config: &Config, requested: Option<&str>) -> Result<(String, Profile), ConfigError> {
    select_profile_with(config, requested, |name| std::env::var(name).ok())
}

fn select_profile_with(
    config: &Config,
    requested: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<(String, Profile), ConfigError> {
    let name = requested
        .map(str::to_owned)
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into());

    if let Some(profile) = config.profiles.get(&name) {
        return Ok((name, profile.clone()));
    }

    // An explicitly requested profile must exist.
    if requested.is_some() {
        return Err(ConfigError::ProfileNotFound { name });
    }

    match (env(Service::Netbox.legacy_env().0), env(Service::Librenms.legacy_env().0)) {
        (Some(netbox), Some(librenms)) => {
            debug!("using NETBOX_URL / LIBRENMS_URL from the environment");
            let profile = Profile {
                netbox: ServiceProfile {
                    url: netbox,
                    ..ServiceProfile::default()
                },
                librenms: ServiceProfile {
                    url: librenms,
                    ..ServiceProfile::default()
                },
                ..Profile::default()
            };
            Ok((name, profile))
        }
        _ => Err(ConfigError::ProfileNotFound { name }),
    }
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve a service token from the credential chain.
///
/// Order: the profile's `token_env` variable, the legacy unprefixed
/// variable, the system keyring, then plaintext in the config.
pub fn resolve_token(
    profile: &Profile,
    profile_name: &str,
    service: Service,
) -> Result<SecretString, ConfigError> {
    resolve_token_with(
        profile,
        profile_name,
        service,
        |name| std::env::var(name).ok(),
        |account| {
            keyring::Entry::new(KEYRING_SERVICE, account)
                .and_then(|entry| entry.get_password())
                .ok()
        },
    )
}

fn resolve_token_with(
    profile: &Profile,
    profile_name: &str,
    service: Service,
    env: impl Fn(&str) -> Option<String>,
    keyring: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, ConfigError> {
    let endpoint = profile.service(service);

    // 1. Profile's token_env → env var lookup
    if let Some(val) = endpoint.token_env.as_deref().and_then(&env) {
        return Ok(SecretString::from(val));
    }

    // 2. Legacy variable
    if let Some(val) = env(service.legacy_env().1) {
        return Ok(SecretString::from(val));
    }

    // 3. System keyring
    if let Some(secret) = keyring(&keyring_account(profile_name, service)) {
        return Ok(SecretString::from(secret));
    }

    // 4. Plaintext in config
    if let Some(ref token) = endpoint.token {
        return Ok(SecretString::from(token.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
        service,
    })
}

/// Keyring account name for a profile's token.
pub fn keyring_account(profile_name: &str, service: Service) -> String {
    format!("{profile_name}/{}-token", service.key())
}

// ── Translation ─────────────────────────────────────────────────────

fn parse_url(service: Service, raw: &str) -> Result<url::Url, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Validation {
        field: format!("{}.url", service.key()),
        reason: format!("invalid URL: {raw}"),
    })
}

/// Build a `SyncConfig` from a profile, using `defaults` for anything the
/// profile doesn't override.
pub fn profile_to_sync_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<SyncConfig, ConfigError> {
    let endpoint = |service: Service| -> Result<ServiceEndpoint, ConfigError> {
        Ok(ServiceEndpoint {
            url: parse_url(service, &profile.service(service).url)?,
            token: resolve_token(profile, profile_name, service)?,
        })
    };
    let mut config = SyncConfig::new(endpoint(Service::Netbox)?, endpoint(Service::Librenms)?);
    config.tls = tls_for(profile, defaults);
    config.timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));
    Ok(config)
}

fn tls_for(profile: &Profile, defaults: &Defaults) -> TlsVerification {
    if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    }
}
