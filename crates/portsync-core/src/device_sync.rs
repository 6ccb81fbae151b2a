// ── Device-level runner ──
//
// Everything that acts on a whole device or VM rather than its
// interfaces: enrichment from monitoring, the unmonitored report, alert
// status changes, registration in monitoring, and PTR backfill. Journal
// failures are logged and never change the outcome.

use std::net::IpAddr;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::audit::{self, Severity};
use crate::enrich::{enrich, ip_from_cidr};
use crate::error::CoreError;
use crate::model::{
    Alert, AssetObject, AssetStatus, DeviceCustomFields, DeviceEdit, MonitoredDevice,
    MonitoredDeviceId,
};
use crate::sink::{AssetDirectory, AuditSink, MonitoredDevices, ReverseResolver};
use crate::sync::OutcomeStatus;

/// Outcome of enriching one asset object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceReport {
    pub object: AssetObject,
    pub name: String,
    pub monitoring_device: MonitoredDeviceId,
    pub dry_run: bool,
    #[serde(flatten)]
    pub status: OutcomeStatus,
    pub edit: DeviceEdit,
}

impl DeviceReport {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, OutcomeStatus::Failed { .. })
    }
}

/// An active asset with a primary IP that monitoring does not know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingDevice {
    pub object: AssetObject,
    pub name: String,
    /// Without prefix length.
    pub ip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingReport {
    pub missing: Vec<MissingDevice>,
    /// Unlinked assets that monitoring did know, linked during the run.
    pub linked: Vec<DeviceReport>,
}

impl MissingReport {
    pub fn failed(&self) -> usize {
        self.linked.iter().filter(|r| r.is_failed()).count()
    }
}

/// What an alert did to its device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertReport {
    pub monitoring_device: MonitoredDeviceId,
    /// `None` when the alert was ignored.
    pub object: Option<AssetObject>,
    pub status: Option<AssetStatus>,
}

/// Result of a PTR backfill for one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsReport {
    pub ip: IpAddr,
    pub dns_name: Option<String>,
    /// IP records updated in the asset system.
    pub updated: usize,
}

/// Runs device-level operations against a set of collaborators.
pub struct DeviceSync<M, D, J> {
    monitoring: M,
    directory: D,
    audit: J,
    dry_run: bool,
}

impl<M, D, J> DeviceSync<M, D, J>
where
    M: MonitoredDevices,
    D: AssetDirectory,
    J: AuditSink,
{
    pub fn new(monitoring: M, directory: D, audit: J) -> Self {
        Self {
            monitoring,
            directory,
            audit,
            dry_run: false,
        }
    }

    /// Plan enrichment only. Alerts and registration are unaffected.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Enrich the asset linked to monitoring device `device`.
    pub async fn update_device(&self, device: MonitoredDeviceId) -> Result<DeviceReport, CoreError> {
        let object = self.directory.find_monitored(device).await.inspect_err(|e| {
            error!(%device, error = %e, "could not find the linked asset");
        })?;
        let observed = self.monitoring.get_device(device).await?;
        self.enrich_object(object, &observed).await
    }

    /// Enrich the asset `addr` is assigned to from the monitored device carrying it.
    pub async fn update_by_ip(&self, addr: &str) -> Result<DeviceReport, CoreError> {
        let ip = ip_from_cidr(addr);
        let object = self.directory.find_by_ip(ip).await?;
        let observed = self.monitoring.device_by_ip(ip).await?;
        self.enrich_object(object, &observed).await
    }

    /// Report active unlinked assets that monitoring does not know, linking
    /// the ones it does.
    pub async fn missing_report(&self) -> Result<MissingReport, CoreError> {
        let candidates = self.directory.list_unmonitored().await.inspect_err(|e| {
            error!(error = %e, "could not list unmonitored assets");
        })?;
        info!(count = candidates.len(), "checking unmonitored assets");

        let mut report = MissingReport {
            missing: Vec::new(),
            linked: Vec::new(),
        };
        for asset in candidates {
            let Some(cidr) = asset.primary_ip.as_deref() else {
                continue;
            };
            let ip = ip_from_cidr(cidr).to_owned();
            match self.monitoring.device_by_ip(&ip).await {
                Ok(observed) => {
                    let edit = enrich(&asset, &observed);
                    let linked = self.apply(asset.object, asset.name, &observed, edit).await;
                    report.linked.push(linked);
                }
                Err(e) if e.is_not_found() => {
                    debug!(name = %asset.name, %ip, "not monitored");
                    report.missing.push(MissingDevice {
                        object: asset.object,
                        name: asset.name,
                        ip,
                    });
                }
                Err(e) => return Err(e),
            }
        }
        Ok(report)
    }

    /// Mirror an alert's state onto the linked asset's status.
    pub async fn device_down(&self, alert: &Alert) -> Result<AlertReport, CoreError> {
        let mut report = AlertReport {
            monitoring_device: alert.device_id,
            object: None,
            status: None,
        };
        let Some((status, severity)) = alert.transition() else {
            info!(
                device = %alert.device_id,
                state = alert.state,
                id = %alert.id,
                uid = %alert.uid,
                "alert ignored"
            );
            return Ok(report);
        };

        let object = self.directory.find_monitored(alert.device_id).await?;
        self.directory.set_status(object, status).await?;
        info!(device = %alert.device_id, object = object.id, %status, "status updated");
        self.journal(object, severity, &alert.journal_message()).await;

        report.object = Some(object);
        report.status = Some(status);
        Ok(report)
    }

    /// Register `addr` in monitoring and link `object` to the new device.
    pub async fn add_device(
        &self,
        addr: &str,
        object: AssetObject,
    ) -> Result<MonitoredDeviceId, CoreError> {
        let ip = ip_from_cidr(addr);
        let id = match self.monitoring.add_device(ip).await {
            Ok(id) => id,
            Err(e) => {
                warn!(ip, error = %e, "could not add device to monitoring");
                self.journal(object, Severity::Warning, &e.to_string()).await;
                return Err(e);
            }
        };
        self.journal(object, Severity::Info, &audit::device_added_message(id)).await;

        let link = DeviceEdit {
            custom_fields: Some(DeviceCustomFields {
                monitoring_id: Some(id),
            }),
            ..DeviceEdit::default()
        };
        self.directory.update_device(object, &link).await?;
        Ok(id)
    }

    async fn enrich_object(
        &self,
        object: AssetObject,
        observed: &MonitoredDevice,
    ) -> Result<DeviceReport, CoreError> {
        let existing = self.directory.get_device(object).await?;
        let edit = enrich(&existing, observed);
        Ok(self.apply(object, existing.name, observed, edit).await)
    }

    async fn apply(
        &self,
        object: AssetObject,
        name: String,
        observed: &MonitoredDevice,
        edit: DeviceEdit,
    ) -> DeviceReport {
        let status = if edit.is_empty() {
            OutcomeStatus::Unchanged
        } else if self.dry_run {
            OutcomeStatus::Planned
        } else {
            match self.directory.update_device(object, &edit).await {
                Ok(()) => {
                    info!(kind = %object.kind, id = object.id, "updated device from LibreNMS");
                    let audit_text = audit::device_updated_message(&edit);
                    self.journal(object, Severity::Success, &audit_text).await;
                    OutcomeStatus::Applied
                }
                Err(e) => {
                    let message = e.to_string();
                    warn!(kind = %object.kind, id = object.id, error = %message, "device update failed");
                    let audit_text = audit::device_update_failed_message(&message);
                    self.journal(object, Severity::Warning, &audit_text).await;
                    OutcomeStatus::Failed { message }
                }
            }
        };

        DeviceReport {
            object,
            name,
            monitoring_device: observed.id,
            dry_run: self.dry_run,
            status,
            edit,
        }
    }

    async fn journal(&self, object: AssetObject, severity: Severity, message: &str) {
        if let Err(e) = self.audit.record(object.kind, object.id, severity, message).await {
            error!(
                kind = %object.kind,
                id = object.id,
                %severity,
                error = %e,
                "could not write journal entry"
            );
        }
    }
}

/// Set the DNS name of every asset IP record for `addr` from its PTR record.
///
/// An address without a PTR record leaves the asset system untouched.
pub async fn update_ip_dns<D, R>(
    directory: D,
    resolver: R,
    addr: &str,
) -> Result<DnsReport, CoreError>
where
    D: AssetDirectory,
    R: ReverseResolver,
{
    let raw = ip_from_cidr(addr);
    let ip: IpAddr = raw.parse().map_err(|_| CoreError::InvalidInput {
        message: format!("'{raw}' is not an IP address"),
    })?;

    let Some(dns_name) = resolver.reverse_lookup(ip).await? else {
        info!(%ip, "no PTR record");
        return Ok(DnsReport {
            ip,
            dns_name: None,
            updated: 0,
        });
    };

    let updated = directory.set_dns_name(raw, &dns_name).await.inspect_err(|e| {
        error!(%ip, error = %e, "could not update IP address record");
    })?;
    if updated == 0 {
        warn!(%ip, %dns_name, "no IP address record to update");
    }
    Ok(DnsReport {
        ip,
        dns_name: Some(dns_name),
        updated,
    })
}
