//! `ip-dns-update`: PTR lookup into the NetBox IP address's `dns_name`.

use portsync_core::SystemResolver;

use crate::cli::{GlobalOpts, IpDnsUpdateArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

pub async fn handle(args: IpDnsUpdateArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load()?;
    let settings = config::output_settings(global, &cfg.defaults)?;
    let sync_config = config::build_sync_config(global, &cfg, false)?;
    let (netbox, _librenms) = portsync_core::connect(&sync_config)?;
    let resolver = SystemResolver::from_system_conf()?;

    let report = portsync_core::update_ip_dns(&netbox, &resolver, &args.ip).await?;

    let rendered = output::render_dns_report(&settings.format, &report);
    output::print_output(&rendered, settings.quiet);
    Ok(())
}
