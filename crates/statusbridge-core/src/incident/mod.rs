pub mod status;

use serde::{Deserialize, Serialize};

use crate::alert::IncidentName;
use crate::ids::{ComponentId, IncidentId};

pub use status::IncidentStatus;

/// An incident this process opened and has not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedIncident {
    id: IncidentId,
    name: IncidentName,
    component_id: Option<ComponentId>,
    status: IncidentStatus,
}

impl TrackedIncident {
    pub fn new(
        id: IncidentId,
        name: IncidentName,
        component_id: Option<ComponentId>,
        status: IncidentStatus,
    ) -> Self {
        Self {
            id,
            name,
            component_id,
            status,
        }
    }

    pub fn id(&self) -> IncidentId {
        self.id
    }

    pub fn name(&self) -> &IncidentName {
        &self.name
    }

    pub fn component_id(&self) -> Option<ComponentId> {
        self.component_id
    }

    pub fn status(&self) -> IncidentStatus {
        self.status
    }
}
