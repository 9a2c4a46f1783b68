use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use statusbridge_core::component::ComponentStatus;
use statusbridge_core::events::BridgeEvent;
use statusbridge_core::ids::{ComponentGroupId, ComponentId, IncidentId, IncidentUpdateId};
use statusbridge_ports::error::PortError;
use statusbridge_ports::outbound::{EventPublisher, StatusPage};
use statusbridge_ports::types::*;

/// In-memory status page that behaves like Cachet for the calls the bridge makes.
#[derive(Default)]
pub(crate) struct MockStatusPage {
    pub groups: Mutex<Vec<(ComponentGroupId, String, Vec<ComponentId>)>>,
    pub components: Mutex<BTreeMap<ComponentId, Component>>,
    pub incidents: Mutex<Vec<Incident>>,
    pub created: Mutex<Vec<NewIncident>>,
    pub updates: Mutex<Vec<(IncidentId, NewIncidentUpdate)>>,
    pub component_updates: Mutex<Vec<(ComponentId, ComponentStatus)>>,
    pub calls: Mutex<Vec<&'static str>>,
    pub failing: Mutex<Vec<&'static str>>,
    pub missing: Mutex<Vec<&'static str>>,
    pub reported_group_count: Mutex<Option<usize>>,
}

impl MockStatusPage {
    pub fn with_component(
        self,
        group: &str,
        name: &str,
        id: u64,
        status: ComponentStatus,
    ) -> Self {
        let id = ComponentId::new(id);
        self.components.lock().unwrap().insert(
            id,
            Component {
                id,
                name: name.to_string(),
                status,
            },
        );
        {
            let mut groups = self.groups.lock().unwrap();
            match groups.iter_mut().find(|(_, g, _)| g == group) {
                Some((_, _, members)) => members.push(id),
                None => {
                    let group_id = ComponentGroupId::new(groups.len() as u64 + 1);
                    groups.push((group_id, group.to_string(), vec![id]));
                }
            }
        }
        self
    }

    /// Adds a second, distinct group under an already used name.
    pub fn with_duplicate_group(self, group: &str) -> Self {
        {
            let mut groups = self.groups.lock().unwrap();
            let group_id = ComponentGroupId::new(groups.len() as u64 + 1);
            groups.push((group_id, group.to_string(), vec![]));
        }
        self
    }

    /// Overrides the pagination count returned by group lookups.
    pub fn with_reported_group_count(self, count: usize) -> Self {
        *self.reported_group_count.lock().unwrap() = Some(count);
        self
    }

    pub fn fail_on(&self, op: &'static str) {
        self.failing.lock().unwrap().push(op);
    }

    /// Makes `op` answer as if the remote resource were gone.
    pub fn missing_on(&self, op: &'static str) {
        self.missing.lock().unwrap().push(op);
    }

    pub fn heal(&self) {
        self.failing.lock().unwrap().clear();
        self.missing.lock().unwrap().clear();
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn component_status(&self, id: u64) -> ComponentStatus {
        self.components.lock().unwrap()[&ComponentId::new(id)].status
    }

    fn call(&self, op: &'static str) -> Result<(), PortError> {
        self.calls.lock().unwrap().push(op);
        if self.failing.lock().unwrap().contains(&op) {
            return Err(PortError::Transport(format!("{op} unavailable")));
        }
        if self.missing.lock().unwrap().contains(&op) {
            return Err(PortError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl StatusPage for MockStatusPage {
    async fn find_component_groups_by_name(
        &self,
        name: &str,
    ) -> Result<ComponentGroupPage, PortError> {
        self.call("find_component_groups_by_name")?;
        let components = self.components.lock().unwrap();
        let groups: Vec<ComponentGroup> = self
            .groups
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, g, _)| g == name)
            .map(|(id, g, members)| ComponentGroup {
                id: *id,
                name: g.clone(),
                enabled_components: members.iter().map(|m| components[m].clone()).collect(),
            })
            .collect();
        let count = self
            .reported_group_count
            .lock()
            .unwrap()
            .unwrap_or(groups.len());
        Ok(ComponentGroupPage { groups, count })
    }

    async fn get_component(&self, id: ComponentId) -> Result<Component, PortError> {
        self.call("get_component")?;
        self.components
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(PortError::NotFound)
    }

    async fn update_component(
        &self,
        id: ComponentId,
        status: ComponentStatus,
    ) -> Result<(), PortError> {
        self.call("update_component")?;
        let mut components = self.components.lock().unwrap();
        let component = components.get_mut(&id).ok_or(PortError::NotFound)?;
        component.status = status;
        self.component_updates.lock().unwrap().push((id, status));
        Ok(())
    }

    async fn create_incident(&self, incident: &NewIncident) -> Result<Incident, PortError> {
        self.call("create_incident")?;
        if let (Some(id), Some(status)) = (incident.component_id, incident.component_status) {
            if let Some(component) = self.components.lock().unwrap().get_mut(&id) {
                component.status = status;
            }
        }
        self.created.lock().unwrap().push(incident.clone());
        let mut incidents = self.incidents.lock().unwrap();
        let created = Incident {
            id: IncidentId::new(incidents.len() as u64 + 1),
            name: incident.name.clone(),
            status: incident.status,
            component_id: incident.component_id,
        };
        incidents.push(created.clone());
        Ok(created)
    }

    async fn create_incident_update(
        &self,
        incident_id: IncidentId,
        update: &NewIncidentUpdate,
    ) -> Result<IncidentUpdate, PortError> {
        self.call("create_incident_update")?;
        let mut incidents = self.incidents.lock().unwrap();
        let incident = incidents
            .iter_mut()
            .find(|i| i.id == incident_id)
            .ok_or(PortError::NotFound)?;
        incident.status = update.status;
        let mut updates = self.updates.lock().unwrap();
        updates.push((incident_id, update.clone()));
        Ok(IncidentUpdate {
            id: IncidentUpdateId::new(updates.len() as u64),
            incident_id,
            status: update.status,
            message: update.message.clone(),
        })
    }

    async fn list_incidents_by_component(
        &self,
        component_id: ComponentId,
    ) -> Result<Vec<Incident>, PortError> {
        self.call("list_incidents_by_component")?;
        Ok(self
            .incidents
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.component_id == Some(component_id))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub(crate) struct MockEventPublisher {
    pub events: Mutex<Vec<BridgeEvent>>,
}

impl MockEventPublisher {
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(BridgeEvent::event_type)
            .collect()
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, events: Vec<BridgeEvent>) -> Result<(), PortError> {
        self.events.lock().unwrap().extend(events);
        Ok(())
    }
}
