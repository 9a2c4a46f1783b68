use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use statusbridge_core::component::{ComponentRef, ComponentStatus};
use statusbridge_core::ids::{ComponentGroupId, ComponentId, IncidentId, IncidentUpdateId};
use statusbridge_core::incident::IncidentStatus;

/// Alert data from an external source, before domain validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAlert {
    pub status: String,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
}

/// One webhook delivery: the group status plus its alerts in delivery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertBatch {
    pub status: String,
    pub alerts: Vec<RawAlert>,
}

/// Where on the status page a batch of alerts should land.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRoute {
    pub component: String,
    pub component_group: String,
}

impl ComponentRoute {
    pub fn new(component: impl Into<String>, component_group: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            component_group: component_group.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub id: ComponentId,
    pub name: String,
    pub status: ComponentStatus,
}

impl Component {
    pub fn to_ref(&self) -> ComponentRef {
        ComponentRef {
            id: self.id,
            status: self.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentGroup {
    pub id: ComponentGroupId,
    pub name: String,
    pub enabled_components: Vec<Component>,
}

/// Groups matching a name lookup. `count` is the status page's own total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentGroupPage {
    pub groups: Vec<ComponentGroup>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewIncident {
    pub name: String,
    pub message: String,
    pub status: IncidentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_id: Option<ComponentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_status: Option<ComponentStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incident {
    pub id: IncidentId,
    pub name: String,
    pub status: IncidentStatus,
    pub component_id: Option<ComponentId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewIncidentUpdate {
    pub status: IncidentStatus,
    pub human_status: String,
    pub message: String,
}

impl NewIncidentUpdate {
    /// Closing update carrying the terminal incident status.
    pub fn resolved(message: impl Into<String>) -> Self {
        Self {
            status: IncidentStatus::Fixed,
            human_status: IncidentStatus::RESOLVED_HUMAN_STATUS.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentUpdate {
    pub id: IncidentUpdateId,
    pub incident_id: IncidentId,
    pub status: IncidentStatus,
    pub message: String,
}
