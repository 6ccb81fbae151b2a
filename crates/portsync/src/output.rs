//! Output formatting: table, JSON, YAML, plain, optionally wrapped in HTML.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use portsync_core::{
    AlertReport, DeviceEdit, DeviceReport, DnsReport, EditOutcome, InterfaceEdit, MissingReport,
    MonitoredDeviceId, OutcomeStatus, SyncReport,
};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

fn paint_status(status: &OutcomeStatus, color: bool) -> String {
    let label = status.label();
    if !color {
        return label.to_owned();
    }
    match status {
        OutcomeStatus::Planned => label.cyan().to_string(),
        OutcomeStatus::Unchanged => label.dimmed().to_string(),
        OutcomeStatus::Applied => label.green().to_string(),
        OutcomeStatus::Failed { .. } => label.red().to_string(),
    }
}

// ── Report rendering ─────────────────────────────────────────────────

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Interface")]
    interface: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Changes")]
    changes: String,
}

/// `field=value` pairs for every populated field of an edit.
fn describe_edit(edit: &InterfaceEdit) -> String {
    let mut parts = Vec::new();
    if let Some(kind) = edit.interface_type {
        parts.push(format!("type={kind}"));
    }
    if let Some(parent) = edit.parent {
        parts.push(format!("parent={parent}"));
    }
    if let Some(ref description) = edit.description {
        parts.push(format!("description={description:?}"));
    }
    if let Some(duplex) = edit.duplex {
        parts.push(format!("duplex={duplex}"));
    }
    if let Some(speed) = edit.speed {
        parts.push(format!("speed={speed}"));
    }
    if let Some(ref mac) = edit.mac_address {
        parts.push(format!("mac={mac:?}"));
    }
    parts.join(" ")
}

fn to_row(outcome: &EditOutcome, color: bool) -> OutcomeRow {
    let mut changes = describe_edit(&outcome.edit);
    if let OutcomeStatus::Failed { ref message } = outcome.status {
        changes = format!("{changes}\n{message}");
    }
    OutcomeRow {
        interface: outcome.interface.clone(),
        action: outcome.kind.label().into(),
        status: paint_status(&outcome.status, color),
        changes,
    }
}

fn summary_line(report: &SyncReport) -> String {
    let total = report.outcomes.len();
    if report.is_empty() {
        format!(
            "NetBox device {} is in sync with LibreNMS device {}",
            report.device, report.monitoring_device
        )
    } else if report.dry_run {
        format!("{total} edit(s) planned for NetBox device {} (dry run)", report.device)
    } else {
        format!(
            "{} of {total} edit(s) applied to NetBox device {}, {} failed",
            report.applied(),
            report.device,
            report.failed()
        )
    }
}

/// Render a sync report in the chosen format.
pub fn render_report(format: &OutputFormat, report: &SyncReport, color: bool) -> String {
    match format {
        OutputFormat::Table => {
            let summary = summary_line(report);
            if report.is_empty() {
                return summary;
            }
            let rows: Vec<OutcomeRow> = report.outcomes.iter().map(|o| to_row(o, color)).collect();
            format!("{}\n{summary}", render_table(&rows))
        }
        OutputFormat::Json => render_json_pretty(report),
        OutputFormat::JsonCompact => render_json_compact(report),
        OutputFormat::Yaml => render_yaml(report),
        OutputFormat::Plain => report
            .outcomes
            .iter()
            .map(|o| format!("{}\t{}\t{}", o.interface, o.kind.label(), o.status.label()))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

// ── Device rendering ─────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Object")]
    object: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "LibreNMS")]
    monitoring_device: MonitoredDeviceId,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Changes")]
    changes: String,
}

fn describe_device_edit(edit: &DeviceEdit) -> String {
    let mut parts = Vec::new();
    if let Some(id) = edit.monitoring_id() {
        parts.push(format!("monitoring_id={id}"));
    }
    if let Some(ref description) = edit.description {
        parts.push(format!("description={description:?}"));
    }
    if let Some(ref serial) = edit.serial {
        parts.push(format!("serial={serial:?}"));
    }
    if let Some(lat) = edit.latitude {
        parts.push(format!("latitude={lat}"));
    }
    if let Some(lng) = edit.longitude {
        parts.push(format!("longitude={lng}"));
    }
    parts.join(" ")
}

fn device_row(report: &DeviceReport, color: bool) -> DeviceRow {
    let mut changes = describe_device_edit(&report.edit);
    if let OutcomeStatus::Failed { ref message } = report.status {
        changes = format!("{changes}\n{message}");
    }
    DeviceRow {
        object: format!("{} {}", report.object.kind, report.object.id),
        name: report.name.clone(),
        monitoring_device: report.monitoring_device,
        status: paint_status(&report.status, color),
        changes,
    }
}

fn device_plain(report: &DeviceReport) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        report.object.kind,
        report.object.id,
        report.status.label(),
        describe_device_edit(&report.edit)
    )
}

/// Render one device enrichment in the chosen format.
pub fn render_device_report(format: &OutputFormat, report: &DeviceReport, color: bool) -> String {
    match format {
        OutputFormat::Table => {
            let suffix = if report.dry_run { " (dry run)" } else { "" };
            format!(
                "{}\nNetBox {} {} {} from LibreNMS device {}{suffix}",
                render_table(&[device_row(report, color)]),
                report.object.kind,
                report.object.id,
                report.status.label(),
                report.monitoring_device
            )
        }
        OutputFormat::Plain => device_plain(report),
        structured => render_structured(structured, report),
    }
}

/// Write the unmonitored devices as `Name,IP` CSV, header always included.
pub fn write_missing_csv<W: Write>(report: &MissingReport, writer: W) -> Result<(), CliError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["Name", "IP"]).map_err(io::Error::from)?;
    for device in &report.missing {
        wtr.write_record([device.name.as_str(), device.ip.as_str()])
            .map_err(io::Error::from)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render the missing-device report: CSV for table and plain, data otherwise.
pub fn render_missing_report(
    format: &OutputFormat,
    report: &MissingReport,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Table | OutputFormat::Plain => {
            let mut buf = Vec::new();
            write_missing_csv(report, &mut buf)?;
            Ok(String::from_utf8_lossy(&buf).trim_end().to_owned())
        }
        structured => Ok(render_structured(structured, report)),
    }
}

/// Render the effect of one alert.
pub fn render_alert_report(format: &OutputFormat, report: &AlertReport) -> String {
    match (format, report.object, report.status) {
        (OutputFormat::Table | OutputFormat::Plain, Some(object), Some(status)) => {
            format!("NetBox {} {} set to {status}", object.kind, object.id)
        }
        (OutputFormat::Table | OutputFormat::Plain, _, _) => format!(
            "alert for LibreNMS device {} ignored",
            report.monitoring_device
        ),
        (structured, _, _) => render_structured(structured, report),
    }
}

/// Render the result of a PTR backfill.
pub fn render_dns_report(format: &OutputFormat, report: &DnsReport) -> String {
    match (format, report.dns_name.as_deref()) {
        (OutputFormat::Table | OutputFormat::Plain, Some(name)) => {
            format!("{} -> {name} ({} record(s) updated)", report.ip, report.updated)
        }
        (OutputFormat::Table | OutputFormat::Plain, None) => {
            format!("{}: no PTR record", report.ip)
        }
        (structured, _) => render_structured(structured, report),
    }
}

/// `Json`, `JsonCompact` and `Yaml`; the other formats fall back to pretty JSON.
fn render_structured<T: Serialize + ?Sized>(format: &OutputFormat, data: &T) -> String {
    match format {
        OutputFormat::JsonCompact => render_json_compact(data),
        OutputFormat::Yaml => render_yaml(data),
        _ => render_json_pretty(data),
    }
}

/// Wrap rendered output in a minimal HTML page.
pub fn wrap_html(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n\
         <body>\n<pre>{}</pre>\n</body>\n</html>",
        escape_html(title),
        escape_html(body)
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json_pretty<T: Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|e| format!("serialization failed: {e}"))
}

fn render_json_compact<T: Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string(data).unwrap_or_else(|e| format!("serialization failed: {e}"))
}

fn render_yaml<T: Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).unwrap_or_else(|e| format!("serialization failed: {e}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use portsync_core::{
        AssetObject, AssetStatus, DeviceCustomFields, DeviceId, EditKind, InterfaceId,
        InterfaceKind, MissingDevice, SubjectType,
    };

    fn report(outcomes: Vec<EditOutcome>) -> SyncReport {
        SyncReport {
            device: DeviceId(5),
            monitoring_device: MonitoredDeviceId(42),
            dry_run: false,
            outcomes,
        }
    }

    fn created() -> EditOutcome {
        EditOutcome {
            interface: "eth0.10".into(),
            kind: EditKind::Create,
            status: OutcomeStatus::Applied,
            edit: InterfaceEdit {
                name: Some("eth0.10".into()),
                interface_type: Some(InterfaceKind::Virtual),
                parent: Some(InterfaceId(9)),
                ..InterfaceEdit::for_device(DeviceId(5))
            },
        }
    }

    #[test]
    fn empty_report_says_in_sync() {
        let text = render_report(&OutputFormat::Table, &report(vec![]), false);
        assert_eq!(text, "NetBox device 5 is in sync with LibreNMS device 42");
    }

    #[test]
    fn table_lists_edits() {
        let text = render_report(&OutputFormat::Table, &report(vec![created()]), false);
        assert!(text.contains("eth0.10"));
        assert!(text.contains("type=virtual parent=9"));
        assert!(text.contains("1 of 1 edit(s) applied"));
    }

    #[test]
    fn plain_is_tab_separated() {
        let text = render_report(&OutputFormat::Plain, &report(vec![created()]), false);
        assert_eq!(text, "eth0.10\tcreate\tapplied");
    }

    #[test]
    fn json_round_trips_through_serde() {
        let text = render_report(&OutputFormat::JsonCompact, &report(vec![created()]), false);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["outcomes"][0]["status"], "applied");
        assert_eq!(value["outcomes"][0]["edit"]["type"], "virtual");
    }

    fn strip_ansi(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut chars = text.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                chars.by_ref().find(|&c| c == 'm');
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn colored_table_keeps_column_widths() {
        let outcomes = vec![
            created(),
            EditOutcome {
                status: OutcomeStatus::Failed {
                    message: "boom".into(),
                },
                ..created()
            },
        ];
        let plain = render_report(&OutputFormat::Table, &report(outcomes.clone()), false);
        let colored = render_report(&OutputFormat::Table, &report(outcomes), true);
        assert_ne!(plain, colored);
        assert_eq!(strip_ansi(&colored), plain);
    }

    #[test]
    fn html_escapes_content() {
        let page = wrap_html("sync", "a <b> & \"c\"");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<pre>a &lt;b&gt; &amp; &quot;c&quot;</pre>"));
    }

    fn device_report(status: OutcomeStatus) -> DeviceReport {
        DeviceReport {
            object: AssetObject::new(SubjectType::Device, 12),
            name: "edge1".into(),
            monitoring_device: MonitoredDeviceId(42),
            dry_run: false,
            status,
            edit: DeviceEdit {
                custom_fields: Some(DeviceCustomFields {
                    monitoring_id: Some(MonitoredDeviceId(42)),
                }),
                serial: Some("FOC1234".into()),
                ..DeviceEdit::default()
            },
        }
    }

    #[test]
    fn device_report_plain() {
        let text = render_device_report(&OutputFormat::Plain, &device_report(OutcomeStatus::Applied), false);
        assert_eq!(text, "device\t12\tapplied\tmonitoring_id=42 serial=\"FOC1234\"");
    }

    #[test]
    fn device_report_table_summary() {
        let text = render_device_report(&OutputFormat::Table, &device_report(OutcomeStatus::Unchanged), false);
        assert!(text.contains("edge1"));
        assert!(text.ends_with("NetBox device 12 unchanged from LibreNMS device 42"));
    }

    #[test]
    fn missing_report_is_csv_with_header() {
        let report = MissingReport {
            missing: vec![MissingDevice {
                object: AssetObject::new(SubjectType::VirtualMachine, 30),
                name: "vm30".into(),
                ip: "10.0.0.30".into(),
            }],
            linked: Vec::new(),
        };
        let text = render_missing_report(&OutputFormat::Table, &report).unwrap();
        assert_eq!(text, "Name,IP\nvm30,10.0.0.30");

        let empty = MissingReport {
            missing: Vec::new(),
            linked: Vec::new(),
        };
        assert_eq!(render_missing_report(&OutputFormat::Plain, &empty).unwrap(), "Name,IP");

        let json = render_missing_report(&OutputFormat::JsonCompact, &report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["missing"][0]["ip"], "10.0.0.30");
    }

    #[test]
    fn alert_and_dns_lines() {
        let applied = AlertReport {
            monitoring_device: MonitoredDeviceId(42),
            object: Some(AssetObject::new(SubjectType::Device, 12)),
            status: Some(AssetStatus::Offline),
        };
        assert_eq!(render_alert_report(&OutputFormat::Table, &applied), "NetBox device 12 set to offline");

        let dns = DnsReport {
            ip: "10.0.0.1".parse().unwrap(),
            dns_name: None,
            updated: 0,
        };
        assert_eq!(render_dns_report(&OutputFormat::Plain, &dns), "10.0.0.1: no PTR record");
    }
}
