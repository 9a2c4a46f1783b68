use chrono::{DateTime, Utc};

use statusbridge_core::alert::{AlertRecord, AlertStatus, IncidentName};
use statusbridge_core::component::{decide_component_status, ComponentStatus};
use statusbridge_core::events::{
    AlertFailed, BridgeEvent, ComponentRestoreDeferred, ComponentRestored, ComponentUnresolved,
    DuplicateSuppressed, IncidentOpened, IncidentResolved, ResolveIgnored,
};
use statusbridge_core::ids::{ComponentId, IncidentId};
use statusbridge_core::incident::{IncidentStatus, TrackedIncident};
use statusbridge_ports::error::PortError;
use statusbridge_ports::outbound::{EventPublisher, StatusPage};
use statusbridge_ports::types::{ComponentRoute, NewIncident, NewIncidentUpdate};

use crate::error::AppError;
use crate::resolver::resolve_component;
use crate::store::IncidentStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOutcome {
    Opened(IncidentId),
    Suppressed(IncidentId),
    Ignored,
    Resolved(IncidentId),
}

/// Turns alert transitions into incident lifecycle calls on the status page.
///
/// Per incident name the tracker moves between untracked and open. Remote
/// calls are never made while the store lock is held.
pub struct IncidentTracker<SP, EP>
where
    SP: StatusPage,
    EP: EventPublisher,
{
    status_page: SP,
    events: EP,
    store: IncidentStore,
}

impl<SP, EP> IncidentTracker<SP, EP>
where
    SP: StatusPage,
    EP: EventPublisher,
{
    pub fn new(status_page: SP, events: EP, store: IncidentStore) -> Self {
        Self {
            status_page,
            events,
            store,
        }
    }

    pub fn store(&self) -> &IncidentStore {
        &self.store
    }

    pub fn status_page(&self) -> &SP {
        &self.status_page
    }

    pub fn events(&self) -> &EP {
        &self.events
    }

    /// Processes one alert and reports any failure instead of returning it.
    pub async fn handle(&self, route: &ComponentRoute, alert: &AlertRecord, now: DateTime<Utc>) {
        if let Err(err) = self.process(route, alert, now).await {
            self.report_failure(Some(alert.incident_name().clone()), &err, now)
                .await;
        }
    }

    pub async fn process(
        &self,
        route: &ComponentRoute,
        alert: &AlertRecord,
        now: DateTime<Utc>,
    ) -> Result<TrackOutcome, AppError> {
        let name = alert.incident_name();

        match (self.store.get(name), alert.status()) {
            (None, AlertStatus::Firing) => self.open(route, alert, now).await,
            (None, AlertStatus::Resolved) => {
                self.emit(BridgeEvent::ResolveIgnored(ResolveIgnored {
                    incident_name: name.clone(),
                    occurred_at: now,
                }))
                .await;
                Ok(TrackOutcome::Ignored)
            }
            (Some(tracked), AlertStatus::Firing) => {
                self.emit(BridgeEvent::DuplicateSuppressed(DuplicateSuppressed {
                    incident_name: name.clone(),
                    incident_id: tracked.id(),
                    incident_status: tracked.status(),
                    occurred_at: now,
                }))
                .await;
                Ok(TrackOutcome::Suppressed(tracked.id()))
            }
            (Some(tracked), AlertStatus::Resolved) => self.close(tracked, alert, now).await,
        }
    }

    pub async fn report_failure(
        &self,
        incident_name: Option<IncidentName>,
        err: &AppError,
        now: DateTime<Utc>,
    ) {
        self.emit(BridgeEvent::AlertFailed(AlertFailed {
            incident_name,
            reason: err.to_string(),
            occurred_at: now,
        }))
        .await;
    }

    /// Observability must never abort alert processing, so publish errors are dropped.
    pub async fn emit(&self, event: BridgeEvent) {
        let _ = self.events.publish(vec![event]).await;
    }

    async fn open(
        &self,
        route: &ComponentRoute,
        alert: &AlertRecord,
        now: DateTime<Utc>,
    ) -> Result<TrackOutcome, AppError> {
        let name = alert.incident_name();
        let mut incident = NewIncident {
            name: name.to_string(),
            message: alert.incident_message().to_string(),
            status: IncidentStatus::Investigating,
            component_id: None,
            component_status: None,
        };

        if let Some(component_id) = self.locate_component(route, name, now).await {
            let current = self
                .status_page
                .get_component(component_id)
                .await
                .map_err(|err| match err {
                    PortError::NotFound => {
                        AppError::NotFound(format!("component {component_id}"))
                    }
                    other => AppError::Transport(other),
                })?
                .to_ref();
            let override_status = alert.component_status_override()?;
            incident.component_id = Some(current.id);
            incident.component_status = Some(decide_component_status(
                current.status,
                override_status,
            ));
        }

        let created = self.status_page.create_incident(&incident).await?;

        self.store.insert(TrackedIncident::new(
            created.id,
            name.clone(),
            incident.component_id,
            created.status,
        ));

        self.emit(BridgeEvent::IncidentOpened(IncidentOpened {
            incident_name: name.clone(),
            incident_id: created.id,
            component_id: incident.component_id,
            component_status: incident.component_status,
            occurred_at: now,
        }))
        .await;

        Ok(TrackOutcome::Opened(created.id))
    }

    /// A component that cannot be located only skips the status update; the
    /// incident itself is still opened.
    async fn locate_component(
        &self,
        route: &ComponentRoute,
        name: &IncidentName,
        now: DateTime<Utc>,
    ) -> Option<ComponentId> {
        match resolve_component(&self.status_page, route).await {
            Ok(component) => Some(component.id),
            Err(err) => {
                self.emit(BridgeEvent::ComponentUnresolved(ComponentUnresolved {
                    incident_name: name.clone(),
                    component: route.component.clone(),
                    component_group: route.component_group.clone(),
                    reason: err.to_string(),
                    occurred_at: now,
                }))
                .await;
                None
            }
        }
    }

    async fn close(
        &self,
        tracked: TrackedIncident,
        alert: &AlertRecord,
        now: DateTime<Utc>,
    ) -> Result<TrackOutcome, AppError> {
        let update = NewIncidentUpdate::resolved(alert.resolve_message());
        self.status_page
            .create_incident_update(tracked.id(), &update)
            .await?;

        // Untracked from here on, even if restoring the component fails below.
        self.store.remove(tracked.name());

        self.emit(BridgeEvent::IncidentResolved(IncidentResolved {
            incident_name: tracked.name().clone(),
            incident_id: tracked.id(),
            message: update.message,
            occurred_at: now,
        }))
        .await;

        if let Some(component_id) = tracked.component_id() {
            self.restore_component(component_id, now).await?;
        }

        Ok(TrackOutcome::Resolved(tracked.id()))
    }

    async fn restore_component(
        &self,
        component_id: ComponentId,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let open_incidents = self
            .status_page
            .list_incidents_by_component(component_id)
            .await?
            .iter()
            .filter(|i| !i.status.is_terminal())
            .count();

        if open_incidents > 0 {
            self.emit(BridgeEvent::ComponentRestoreDeferred(
                ComponentRestoreDeferred {
                    component_id,
                    open_incidents,
                    occurred_at: now,
                },
            ))
            .await;
            return Ok(());
        }

        self.status_page
            .update_component(component_id, ComponentStatus::Operational)
            .await?;

        self.emit(BridgeEvent::ComponentRestored(ComponentRestored {
            component_id,
            occurred_at: now,
        }))
        .await;

        Ok(())
    }
}
