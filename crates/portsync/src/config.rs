//! CLI-side configuration: applies `GlobalOpts` overrides on top of the
//! profile and defaults resolved by `portsync_config`.

use std::time::Duration;

use clap::ValueEnum;

use portsync_config::{Config, ConfigError, Defaults};
use portsync_core::{SyncConfig, TlsVerification};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

pub use portsync_config::config_path;

/// How a command renders its result.
#[derive(Debug, Clone)]
pub struct OutputSettings {
    pub format: OutputFormat,
    pub color: ColorMode,
    pub quiet: bool,
}

/// Load the config file and environment. Parse errors are returned, not defaulted.
pub fn load() -> Result<Config, CliError> {
    Ok(portsync_config::load_config()?)
}

/// Output format and color: the flag if given, else `[defaults]`.
pub fn output_settings(global: &GlobalOpts, defaults: &Defaults) -> Result<OutputSettings, CliError> {
    let format = match global.output {
        Some(ref format) => format.clone(),
        None => parse_default("defaults.output", &defaults.output)?,
    };
    let color = match global.color {
        Some(ref color) => color.clone(),
        None => parse_default("defaults.color", &defaults.color)?,
    };
    Ok(OutputSettings {
        format,
        color,
        quiet: global.quiet,
    })
}

fn parse_default<T: ValueEnum>(field: &str, raw: &str) -> Result<T, CliError> {
    T::from_str(raw, true).map_err(|reason| CliError::Validation {
        field: field.into(),
        reason,
    })
}

/// Build a `SyncConfig` from the loaded config, profile, and CLI overrides.
pub fn build_sync_config(
    global: &GlobalOpts,
    cfg: &Config,
    dry_run: bool,
) -> Result<SyncConfig, CliError> {
    let (profile_name, profile) = portsync_config::select_profile(cfg, global.profile.as_deref())
        .map_err(|err| match err {
            ConfigError::ProfileNotFound { name } if cfg.profiles.is_empty() && global.profile.is_none() => {
                tracing::debug!(profile = %name, "no profiles configured");
                CliError::NoConfig {
                    path: config_path().display().to_string(),
                }
            }
            ConfigError::ProfileNotFound { name } => CliError::ProfileNotFound {
                name,
                available: available_profiles(cfg),
            },
            other => other.into(),
        })?;

    let mut sync = portsync_config::profile_to_sync_config(&profile, &profile_name, &cfg.defaults)?;
    if global.insecure {
        sync.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        sync.timeout = Duration::from_secs(secs);
    }
    sync.dry_run = dry_run;
    Ok(sync)
}

fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
    names.sort_unstable();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}
