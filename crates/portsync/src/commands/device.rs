//! Device-level handlers: `update-device`, `update-by-ip`,
//! `missing-report` and `add-device`.

use std::fs::File;
use std::io::BufWriter;

use tracing::{debug, info};

use portsync_core::{AssetObject, DeviceReport, DeviceSync};

use crate::cli::{AddDeviceArgs, GlobalOpts, MissingReportArgs, UpdateByIpArgs, UpdateDeviceArgs};
use crate::config::{self, OutputSettings};
use crate::error::CliError;
use crate::output;

pub async fn update_device(args: UpdateDeviceArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load()?;
    let settings = config::output_settings(global, &cfg.defaults)?;
    let sync_config = config::build_sync_config(global, &cfg, args.dry_run)?;
    let (netbox, librenms) = portsync_core::connect(&sync_config)?;
    debug!(librenms = %args.librenms_id, dry_run = args.dry_run, "updating device");

    let report = DeviceSync::new(&librenms, &netbox, &netbox)
        .dry_run(sync_config.dry_run)
        .update_device(args.librenms_id)
        .await?;

    let title = format!("Updating from LibreNMS device {}", args.librenms_id);
    finish(&report, &settings, args.html, &title)
}

pub async fn update_by_ip(args: UpdateByIpArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load()?;
    let settings = config::output_settings(global, &cfg.defaults)?;
    let sync_config = config::build_sync_config(global, &cfg, args.dry_run)?;
    let (netbox, librenms) = portsync_core::connect(&sync_config)?;
    debug!(ip = %args.ip, dry_run = args.dry_run, "updating device by IP");

    let report = DeviceSync::new(&librenms, &netbox, &netbox)
        .dry_run(sync_config.dry_run)
        .update_by_ip(&args.ip)
        .await?;

    let title = format!("Updating from LibreNMS IP {}", args.ip);
    finish(&report, &settings, args.html, &title)
}

fn finish(
    report: &DeviceReport,
    settings: &OutputSettings,
    html: bool,
    title: &str,
) -> Result<(), CliError> {
    let color = !html && output::should_color(&settings.color);
    let mut rendered = output::render_device_report(&settings.format, report, color);
    if html {
        rendered = output::wrap_html(title, &rendered);
    }
    output::print_output(&rendered, settings.quiet);

    if report.is_failed() {
        return Err(CliError::PartialFailure { failed: 1, total: 1 });
    }
    Ok(())
}

pub async fn missing_report(args: MissingReportArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load()?;
    let settings = config::output_settings(global, &cfg.defaults)?;
    let sync_config = config::build_sync_config(global, &cfg, args.dry_run)?;
    let (netbox, librenms) = portsync_core::connect(&sync_config)?;

    let report = DeviceSync::new(&librenms, &netbox, &netbox)
        .dry_run(sync_config.dry_run)
        .missing_report()
        .await?;
    info!(
        missing = report.missing.len(),
        linked = report.linked.len(),
        "missing-device report complete"
    );

    if let Some(ref path) = args.file {
        let file = File::create(path)?;
        output::write_missing_csv(&report, BufWriter::new(file))?;
        debug!(path = %path.display(), "wrote CSV report");
    }
    let rendered = output::render_missing_report(&settings.format, &report)?;
    output::print_output(&rendered, settings.quiet);

    match report.failed() {
        0 => Ok(()),
        failed => Err(CliError::PartialFailure {
            failed,
            total: report.linked.len(),
        }),
    }
}

pub async fn add_device(args: AddDeviceArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load()?;
    let settings = config::output_settings(global, &cfg.defaults)?;
    let sync_config = config::build_sync_config(global, &cfg, false)?;
    let (netbox, librenms) = portsync_core::connect(&sync_config)?;
    let object = AssetObject::new(args.model, args.id);

    let id = DeviceSync::new(&librenms, &netbox, &netbox)
        .add_device(&args.ip, object)
        .await?;

    let rendered = format!(
        "added {} to LibreNMS as device {id}, linked to NetBox {} {}",
        args.ip, object.kind, object.id
    );
    output::print_output(&rendered, settings.quiet);
    Ok(())
}
