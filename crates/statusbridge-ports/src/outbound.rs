use async_trait::async_trait;

use statusbridge_core::component::ComponentStatus;
use statusbridge_core::events::BridgeEvent;
use statusbridge_core::ids::{ComponentId, IncidentId};

use crate::error::{ParseError, PortError};
use crate::types::{
    AlertBatch, Component, ComponentGroupPage, Incident, IncidentUpdate, NewIncident,
    NewIncidentUpdate,
};

/// Capabilities the bridge needs from the status page.
#[async_trait]
pub trait StatusPage: Send + Sync {
    async fn find_component_groups_by_name(
        &self,
        name: &str,
    ) -> Result<ComponentGroupPage, PortError>;
    async fn get_component(&self, id: ComponentId) -> Result<Component, PortError>;
    async fn update_component(
        &self,
        id: ComponentId,
        status: ComponentStatus,
    ) -> Result<(), PortError>;
    async fn create_incident(&self, incident: &NewIncident) -> Result<Incident, PortError>;
    async fn create_incident_update(
        &self,
        incident_id: IncidentId,
        update: &NewIncidentUpdate,
    ) -> Result<IncidentUpdate, PortError>;
    async fn list_incidents_by_component(
        &self,
        component_id: ComponentId,
    ) -> Result<Vec<Incident>, PortError>;
}

#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, events: Vec<BridgeEvent>) -> Result<(), PortError>;
}

pub trait AlertSourceParser: Send + Sync {
    fn parse(&self, payload: &[u8]) -> Result<AlertBatch, ParseError>;
    fn source_name(&self) -> &str;
}
