use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::alert::IncidentName;
use crate::component::ComponentStatus;
use crate::ids::{ComponentId, IncidentId};
use crate::incident::IncidentStatus;

/// Decision points of the alert-to-incident bridge, published for observability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BridgeEvent {
    BatchReceived(BatchReceived),
    IncidentOpened(IncidentOpened),
    DuplicateSuppressed(DuplicateSuppressed),
    ResolveIgnored(ResolveIgnored),
    IncidentResolved(IncidentResolved),
    ComponentUnresolved(ComponentUnresolved),
    ComponentRestored(ComponentRestored),
    ComponentRestoreDeferred(ComponentRestoreDeferred),
    AlertFailed(AlertFailed),
}

impl BridgeEvent {
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Self::BatchReceived(e) => e.occurred_at,
            Self::IncidentOpened(e) => e.occurred_at,
            Self::DuplicateSuppressed(e) => e.occurred_at,
            Self::ResolveIgnored(e) => e.occurred_at,
            Self::IncidentResolved(e) => e.occurred_at,
            Self::ComponentUnresolved(e) => e.occurred_at,
            Self::ComponentRestored(e) => e.occurred_at,
            Self::ComponentRestoreDeferred(e) => e.occurred_at,
            Self::AlertFailed(e) => e.occurred_at,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            Self::BatchReceived(_) => "batch.received",
            Self::IncidentOpened(_) => "incident.opened",
            Self::DuplicateSuppressed(_) => "incident.duplicate_suppressed",
            Self::ResolveIgnored(_) => "incident.resolve_ignored",
            Self::IncidentResolved(_) => "incident.resolved",
            Self::ComponentUnresolved(_) => "component.unresolved",
            Self::ComponentRestored(_) => "component.restored",
            Self::ComponentRestoreDeferred(_) => "component.restore_deferred",
            Self::AlertFailed(_) => "alert.failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReceived {
    pub status: String,
    pub alert_count: usize,
    pub component: String,
    pub component_group: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncidentOpened {
    pub incident_name: IncidentName,
    pub incident_id: IncidentId,
    pub component_id: Option<ComponentId>,
    pub component_status: Option<ComponentStatus>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateSuppressed {
    pub incident_name: IncidentName,
    pub incident_id: IncidentId,
    pub incident_status: IncidentStatus,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveIgnored {
    pub incident_name: IncidentName,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncidentResolved {
    pub incident_name: IncidentName,
    pub incident_id: IncidentId,
    pub message: String,
    pub occurred_at: DateTime<Utc>,
}

/// The alert's component could not be located; the incident goes ahead without one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentUnresolved {
    pub incident_name: IncidentName,
    pub component: String,
    pub component_group: String,
    pub reason: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentRestored {
    pub component_id: ComponentId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentRestoreDeferred {
    pub component_id: ComponentId,
    pub open_incidents: usize,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertFailed {
    pub incident_name: Option<IncidentName>,
    pub reason: String,
    pub occurred_at: DateTime<Utc>,
}
