// ── Sync runner ──
//
// One reconciliation pass for one device: fetch both sides, plan, apply
// each edit in order, journal every outcome. Individual apply failures
// and audit failures never abort the pass.

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::audit::{self, Severity, SubjectType};
use crate::error::CoreError;
use crate::model::{DeviceId, EditKind, InterfaceEdit, MonitoredDeviceId, PlannedEdit};
use crate::reconcile::reconcile;
use crate::sink::{AssetSink, AuditSink, MonitoringSource};

/// Result of applying (or planning) one edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OutcomeStatus {
    /// Dry run; nothing was sent.
    Planned,
    /// Nothing to change.
    Unchanged,
    Applied,
    Failed { message: String },
}

impl OutcomeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Unchanged => "unchanged",
            Self::Applied => "applied",
            Self::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditOutcome {
    pub interface: String,
    pub kind: EditKind,
    #[serde(flatten)]
    pub status: OutcomeStatus,
    pub edit: InterfaceEdit,
}

/// Everything one pass did, in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub device: DeviceId,
    pub monitoring_device: MonitoredDeviceId,
    pub dry_run: bool,
    pub outcomes: Vec<EditOutcome>,
}

impl SyncReport {
    pub fn applied(&self) -> usize {
        self.count(|s| matches!(s, OutcomeStatus::Applied))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, OutcomeStatus::Failed { .. }))
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    fn count(&self, pred: impl Fn(&OutcomeStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }
}

/// Runs reconciliation passes against a set of collaborators.
pub struct PortSync<M, A, J> {
    monitoring: M,
    assets: A,
    audit: J,
    dry_run: bool,
}

impl<M, A, J> PortSync<M, A, J>
where
    M: MonitoringSource,
    A: AssetSink,
    J: AuditSink,
{
    pub fn new(monitoring: M, assets: A, audit: J) -> Self {
        Self {
            monitoring,
            assets,
            audit,
            dry_run: false,
        }
    }

    /// Plan only: no creates, updates, or journal entries.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Reconcile `device`'s interfaces with the ports of `monitoring_device`.
    ///
    /// Only errors from fetching ports or interfaces (other than not-found)
    /// are returned; everything after planning is reported per edit.
    pub async fn sync_device(
        &self,
        device: DeviceId,
        monitoring_device: MonitoredDeviceId,
    ) -> Result<SyncReport, CoreError> {
        let mut report = SyncReport {
            device,
            monitoring_device,
            dry_run: self.dry_run,
            outcomes: Vec::new(),
        };

        let ports = match self.monitoring.list_ports(monitoring_device).await {
            Ok(ports) => ports,
            Err(e) if e.is_not_found() => {
                info!(%monitoring_device, "no ports discovered, nothing to sync");
                return Ok(report);
            }
            Err(e) => return Err(e),
        };

        let interfaces = match self.assets.list_interfaces(device).await {
            Ok(interfaces) => interfaces,
            Err(e) if e.is_not_found() => {
                debug!(%device, "no interfaces recorded yet");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let plan = reconcile(device, &ports, &interfaces);
        info!(
            %device,
            %monitoring_device,
            ports = ports.len(),
            interfaces = interfaces.len(),
            edits = plan.len(),
            dry_run = self.dry_run,
            "planned port sync"
        );

        for planned in plan {
            let status = if self.dry_run {
                OutcomeStatus::Planned
            } else {
                self.apply(device, &planned).await
            };
            report.outcomes.push(EditOutcome {
                interface: planned.interface,
                kind: planned.kind,
                status,
                edit: planned.edit,
            });
        }

        if !self.dry_run && !report.is_empty() {
            let summary = audit::summary_message(report.applied(), report.failed());
            self.journal(device, Severity::Info, &summary).await;
        }

        Ok(report)
    }

    async fn apply(&self, device: DeviceId, planned: &PlannedEdit) -> OutcomeStatus {
        let result = match planned.kind {
            EditKind::Create => self.assets.create_interface(device, &planned.edit).await,
            EditKind::Update { interface_id } => {
                self.assets.update_interface(interface_id, &planned.edit).await
            }
        };

        match result {
            Ok(_) => {
                debug!(interface = %planned.interface, kind = planned.kind.label(), "applied edit");
                self.journal(device, Severity::Success, &planned.audit_message).await;
                OutcomeStatus::Applied
            }
            Err(e) => {
                let message = e.to_string();
                warn!(interface = %planned.interface, kind = planned.kind.label(), error = %message, "edit failed");
                let audit_text = match planned.kind {
                    EditKind::Create => {
                        audit::create_failed_message(&planned.interface, &message, &planned.edit)
                    }
                    EditKind::Update { .. } => {
                        audit::update_failed_message(&planned.interface, &message, &planned.edit)
                    }
                };
                self.journal(device, Severity::Warning, &audit_text).await;
                OutcomeStatus::Failed { message }
            }
        }
    }

    async fn journal(&self, device: DeviceId, severity: Severity, message: &str) {
        if let Err(e) = self
            .audit
            .record(SubjectType::Device, device.get(), severity, message)
            .await
        {
            error!(%device, %severity, error = %e, "could not write journal entry");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{InterfaceId, MonitoredDeviceId};

    fn outcome(status: OutcomeStatus) -> EditOutcome {
        EditOutcome {
            interface: "eth0".into(),
            kind: EditKind::Update {
                interface_id: InterfaceId(1),
            },
            status,
            edit: InterfaceEdit::for_device(DeviceId(1)),
        }
    }

    #[test]
    fn report_counts() {
        let report = SyncReport {
            device: DeviceId(1),
            monitoring_device: MonitoredDeviceId(2),
            dry_run: false,
            outcomes: vec![
                outcome(OutcomeStatus::Applied),
                outcome(OutcomeStatus::Failed {
                    message: "boom".into(),
                }),
                outcome(OutcomeStatus::Applied),
            ],
        };
        assert_eq!(report.applied(), 2);
        assert_eq!(report.failed(), 1);
    }

    #[test]
    fn outcome_serializes_flat() {
        let value = serde_json::to_value(outcome(OutcomeStatus::Failed {
            message: "boom".into(),
        }))
        .unwrap();
        assert_eq!(value["status"], "failed");
        assert_eq!(value["message"], "boom");
        assert_eq!(value["interface"], "eth0");
    }
}
