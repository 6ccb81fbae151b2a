//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use portsync_config::ConfigError;
use portsync_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to {service} at {url}")]
    #[diagnostic(
        code(portsync::connection_failed),
        help(
            "Check that the service is running and reachable.\n\
             Reason: {reason}\n\
             Self-signed certificate? Try --insecure (-k) or set ca_cert in your profile."
        )
    )]
    ConnectionFailed {
        service: String,
        url: String,
        reason: String,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(portsync::timeout),
        help("Increase the timeout with --timeout or check server responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(portsync::auth_failed),
        help(
            "Verify the NetBox and LibreNMS API tokens for this profile.\n\
             NetBox tokens need write access to the objects being changed and to extras.journalentry."
        )
    )]
    AuthFailed { message: String },

    #[error("No {service} token configured for profile '{profile}'")]
    #[diagnostic(
        code(portsync::no_credentials),
        help(
            "Set token or token_env under [profiles.{profile}.{key}],\n\
             store it in the keyring as portsync/{profile}/{key}-token,\n\
             or export {env}."
        )
    )]
    NoCredentials {
        profile: String,
        service: String,
        key: String,
        env: String,
    },

    // ── Resources ────────────────────────────────────────────────────
    #[error("Not found: {resource}")]
    #[diagnostic(
        code(portsync::not_found),
        help("Check the NetBox and LibreNMS device ids, and that the object's monitoring_id is set.")
    )]
    NotFound { resource: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(portsync::api_error))]
    ApiError { message: String },

    #[error("{failed} of {total} edits failed")]
    #[diagnostic(
        code(portsync::partial_failure),
        help("See the report above and the NetBox journal for details.")
    )]
    PartialFailure { failed: usize, total: usize },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(portsync::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(portsync::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No configuration found")]
    #[diagnostic(
        code(portsync::no_config),
        help(
            "Create {path} with a [profiles.default] section,\n\
             or export NETBOX_URL, NETBOX_TOKEN, LIBRENMS_URL and LIBRENMS_TOKEN."
        )
    )]
    NoConfig { path: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(portsync::config))]
    Config { message: String },

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed {
                service,
                url,
                reason,
            } => CliError::ConnectionFailed {
                service: service.into(),
                url,
                reason,
            },
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },
            CoreError::Timeout => CliError::Timeout,
            CoreError::NotFound { resource } => CliError::NotFound { resource },
            CoreError::Api { message, status: _ } => CliError::ApiError { message },
            CoreError::Ambiguous { message } | CoreError::Internal(message) => {
                CliError::ApiError { message }
            }
            CoreError::Config { message } => CliError::Config { message },
            CoreError::InvalidInput { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile, service } => {
                let key = service.to_string().to_lowercase();
                CliError::NoCredentials {
                    env: format!("{}_TOKEN", key.to_uppercase()),
                    profile,
                    service: service.to_string(),
                    key,
                }
            }
            ConfigError::ProfileNotFound { name } => CliError::ProfileNotFound {
                name,
                available: String::new(),
            },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}
