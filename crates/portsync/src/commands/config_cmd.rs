//! Config subcommand handlers.

use std::fmt::Write;

use portsync_config::{Config, ServiceProfile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let rendered = match args.command {
        ConfigCommand::Path => config::config_path().display().to_string(),
        ConfigCommand::Show => format_config_redacted(&config::load()?),
    };
    output::print_output(&rendered, global.quiet);
    Ok(())
}

fn write_service(out: &mut String, profile: &str, key: &str, service: &ServiceProfile) {
    let _ = writeln!(out);
    let _ = writeln!(out, "[profiles.{profile}.{key}]");
    let _ = writeln!(out, "url = \"{}\"", service.url);
    if service.token.is_some() {
        let _ = writeln!(out, "token = \"****\"");
    }
    if let Some(ref env) = service.token_env {
        let _ = writeln!(out, "token_env = \"{env}\"");
    }
}

/// Format config for display, masking tokens.
fn format_config_redacted(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
        write_service(&mut out, name, "netbox", &p.netbox);
        write_service(&mut out, name, "librenms", &p.librenms);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use portsync_config::Profile;

    #[test]
    fn tokens_are_masked() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "lab".into(),
            Profile {
                netbox: ServiceProfile {
                    url: "https://nb".into(),
                    token: Some("super-secret".into()),
                    token_env: None,
                },
                librenms: ServiceProfile {
                    url: "https://lnms".into(),
                    token: None,
                    token_env: Some("LNMS_TOKEN".into()),
                },
                ..Profile::default()
            },
        );
        let text = format_config_redacted(&cfg);
        assert!(!text.contains("super-secret"));
        assert!(text.contains("[profiles.lab.netbox]\nurl = \"https://nb\"\ntoken = \"****\""));
        assert!(text.contains("token_env = \"LNMS_TOKEN\""));
    }
}
