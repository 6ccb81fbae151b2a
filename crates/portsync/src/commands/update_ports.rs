//! `update-ports`: one reconciliation pass for a device pair.

use tracing::debug;

use portsync_core::PortSync;

use crate::cli::{GlobalOpts, UpdatePortsArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

pub async fn handle(args: UpdatePortsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load()?;
    let settings = config::output_settings(global, &cfg.defaults)?;
    let sync_config = config::build_sync_config(global, &cfg, args.dry_run)?;
    let (netbox, librenms) = portsync_core::connect(&sync_config)?;
    debug!(
        netbox = %args.netbox_id,
        librenms = %args.librenms_id,
        dry_run = args.dry_run,
        "starting port sync"
    );

    let report = PortSync::new(&librenms, &netbox, &netbox)
        .dry_run(sync_config.dry_run)
        .sync_device(args.netbox_id, args.librenms_id)
        .await?;

    let color = !args.html && output::should_color(&settings.color);
    let mut rendered = output::render_report(&settings.format, &report, color);
    if args.html {
        let title = format!("portsync: NetBox device {}", report.device);
        rendered = output::wrap_html(&title, &rendered);
    }
    output::print_output(&rendered, settings.quiet);

    match report.failed() {
        0 => Ok(()),
        failed => Err(CliError::PartialFailure {
            failed,
            total: report.outcomes.len(),
        }),
    }
}
