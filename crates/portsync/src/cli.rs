//! Clap derive structures for the `portsync` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use portsync_core::{DeviceId, MonitoredDeviceId, SubjectType};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// portsync -- bring NetBox interfaces in line with what LibreNMS discovered
#[derive(Debug, Parser)]
#[command(
    name = "portsync",
    version,
    about = "Sync LibreNMS ports into NetBox interfaces",
    long_about = "Reads the ports LibreNMS discovered on a device and creates or\n\
        updates the matching NetBox interfaces, inferring interface types and\n\
        VLAN sub-interface parents. Device facts, alert status and PTR names\n\
        flow the same way. Every change is recorded as a NetBox journal entry.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "PORTSYNC_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Output format [default: defaults.output, else table]
    #[arg(long, short = 'o', env = "PORTSYNC_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: defaults.color, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "PORTSYNC_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "PORTSYNC_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one line per edit (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Reconcile one device's NetBox interfaces with its LibreNMS ports
    #[command(alias = "sync")]
    UpdatePorts(UpdatePortsArgs),

    /// Update the NetBox device linked to a LibreNMS device with its discovered facts
    #[command(alias = "updatedevice")]
    UpdateDevice(UpdateDeviceArgs),

    /// Update the NetBox device owning an IP from the LibreNMS device carrying it
    #[command(alias = "updatebyip")]
    UpdateByIp(UpdateByIpArgs),

    /// List active NetBox devices with a primary IP that LibreNMS does not monitor
    #[command(alias = "libreMissingReport")]
    MissingReport(MissingReportArgs),

    /// Apply a LibreNMS alert to the linked NetBox device's status
    #[command(alias = "devicedown")]
    DeviceDown(DeviceDownArgs),

    /// Add an IP to LibreNMS and link the new device to a NetBox object
    #[command(alias = "addLibreDevice")]
    AddDevice(AddDeviceArgs),

    /// Set the DNS name of a NetBox IP address from its PTR record
    #[command(alias = "ipdnsupdate")]
    IpDnsUpdate(IpDnsUpdateArgs),

    /// Inspect configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct UpdatePortsArgs {
    /// NetBox device id
    pub netbox_id: DeviceId,

    /// LibreNMS device id
    pub librenms_id: MonitoredDeviceId,

    /// Compute and show the plan without changing NetBox
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Wrap the report in an HTML document
    #[arg(long)]
    pub html: bool,
}

#[derive(Debug, Args)]
pub struct UpdateDeviceArgs {
    /// LibreNMS device id (the NetBox monitoring_id)
    pub librenms_id: MonitoredDeviceId,

    /// Compute and show the update without changing NetBox
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Wrap the report in an HTML document
    #[arg(long, short = 'x')]
    pub html: bool,
}

#[derive(Debug, Args)]
pub struct UpdateByIpArgs {
    /// IP address, with or without prefix length
    pub ip: String,

    /// Compute and show the update without changing NetBox
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Wrap the report in an HTML document
    #[arg(long, short = 'x')]
    pub html: bool,
}

#[derive(Debug, Args)]
pub struct MissingReportArgs {
    /// Also write the Name,IP CSV to this file
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// Report only; do not link devices LibreNMS already knows
    #[arg(long, short = 'n')]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct DeviceDownArgs {
    /// Alert JSON from the LibreNMS API transport, or - to read stdin
    pub payload: String,
}

#[derive(Debug, Args)]
pub struct AddDeviceArgs {
    /// IP address to monitor, with or without prefix length
    pub ip: String,

    /// NetBox model: device, virtualmachine, location or ipaddress
    pub model: SubjectType,

    /// NetBox object id
    pub id: i64,
}

#[derive(Debug, Args)]
pub struct IpDnsUpdateArgs {
    /// IP address, with or without prefix length
    pub ip: String,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current configuration (tokens redacted)
    Show,

    /// Print the config file path
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
