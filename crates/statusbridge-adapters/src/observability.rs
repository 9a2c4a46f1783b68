//! Renders bridge events as structured log lines.

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use statusbridge_core::events::BridgeEvent;
use statusbridge_ports::error::PortError;
use statusbridge_ports::outbound::EventPublisher;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventPublisher;

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, events: Vec<BridgeEvent>) -> Result<(), PortError> {
        events.iter().for_each(log_event);
        Ok(())
    }
}

fn log_event(event: &BridgeEvent) {
    let kind = event.event_type();
    let at = event.occurred_at();
    match event {
        BridgeEvent::BatchReceived(e) => info!(
            event = kind,
            occurred_at = %at,
            status = %e.status,
            alerts = e.alert_count,
            component = %e.component,
            component_group = %e.component_group,
            "received alert batch"
        ),
        BridgeEvent::IncidentOpened(e) => info!(
            event = kind,
            occurred_at = %at,
            incident = %e.incident_name,
            incident_id = %e.incident_id,
            component_id = ?e.component_id.map(|id| id.get()),
            component_status = ?e.component_status.map(|s| s.code()),
            "created incident"
        ),
        BridgeEvent::DuplicateSuppressed(e) => info!(
            event = kind,
            occurred_at = %at,
            incident = %e.incident_name,
            incident_id = %e.incident_id,
            incident_status = e.incident_status.code(),
            "alert already reported, skipping incident creation"
        ),
        BridgeEvent::ResolveIgnored(e) => debug!(
            event = kind,
            occurred_at = %at,
            incident = %e.incident_name,
            "no open incident to resolve"
        ),
        BridgeEvent::IncidentResolved(e) => info!(
            event = kind,
            occurred_at = %at,
            incident = %e.incident_name,
            incident_id = %e.incident_id,
            message = %e.message,
            "resolved incident"
        ),
        BridgeEvent::ComponentUnresolved(e) => warn!(
            event = kind,
            occurred_at = %at,
            incident = %e.incident_name,
            component = %e.component,
            component_group = %e.component_group,
            reason = %e.reason,
            "component lookup failed, component status will not be updated"
        ),
        BridgeEvent::ComponentRestored(e) => info!(
            event = kind,
            occurred_at = %at,
            component_id = %e.component_id,
            "component restored to operational"
        ),
        BridgeEvent::ComponentRestoreDeferred(e) => debug!(
            event = kind,
            occurred_at = %at,
            component_id = %e.component_id,
            open_incidents = e.open_incidents,
            "component still has open incidents, leaving status"
        ),
        BridgeEvent::AlertFailed(e) => error!(
            event = kind,
            occurred_at = %at,
            incident = ?e.incident_name.as_ref().map(|n| n.as_str()),
            reason = %e.reason,
            "failed to process alert"
        ),
    }
}
