//! `device-down`: apply a LibreNMS alert transport payload.

use std::io::Read;

use portsync_core::{Alert, DeviceSync};

use crate::cli::{DeviceDownArgs, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub async fn handle(args: DeviceDownArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let payload = if args.payload == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        args.payload
    };
    let alert = parse_alert(&payload)?;

    let cfg = config::load()?;
    let settings = config::output_settings(global, &cfg.defaults)?;
    let sync_config = config::build_sync_config(global, &cfg, false)?;
    let (netbox, librenms) = portsync_core::connect(&sync_config)?;

    let report = DeviceSync::new(&librenms, &netbox, &netbox)
        .device_down(&alert)
        .await?;

    let rendered = output::render_alert_report(&settings.format, &report);
    output::print_output(&rendered, settings.quiet);
    Ok(())
}

fn parse_alert(payload: &str) -> Result<Alert, CliError> {
    Alert::from_json(payload).map_err(|e| CliError::Validation {
        field: "alert payload".into(),
        reason: e.to_string(),
    })
}
