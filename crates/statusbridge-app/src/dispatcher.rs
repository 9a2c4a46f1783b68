use async_trait::async_trait;
use chrono::Utc;

use statusbridge_core::alert::{AlertRecord, IncidentName};
use statusbridge_core::events::{BatchReceived, BridgeEvent};
use statusbridge_ports::inbound::AlertReceiver;
use statusbridge_ports::outbound::{EventPublisher, StatusPage};
use statusbridge_ports::types::{AlertBatch, ComponentRoute, RawAlert};

use crate::error::AppError;
use crate::tracker::IncidentTracker;

/// Feeds webhook batches to the tracker one alert at a time, in delivery order.
pub struct AlertDispatcher<SP, EP>
where
    SP: StatusPage,
    EP: EventPublisher,
{
    tracker: IncidentTracker<SP, EP>,
}

impl<SP, EP> AlertDispatcher<SP, EP>
where
    SP: StatusPage,
    EP: EventPublisher,
{
    pub fn new(tracker: IncidentTracker<SP, EP>) -> Self {
        Self { tracker }
    }

    pub fn tracker(&self) -> &IncidentTracker<SP, EP> {
        &self.tracker
    }

    /// Each alert is processed with its own status; the batch status is only reported.
    pub async fn dispatch(&self, route: &ComponentRoute, batch: AlertBatch) {
        self.tracker
            .emit(BridgeEvent::BatchReceived(BatchReceived {
                status: batch.status,
                alert_count: batch.alerts.len(),
                component: route.component.clone(),
                component_group: route.component_group.clone(),
                occurred_at: Utc::now(),
            }))
            .await;

        for alert in batch.alerts {
            self.dispatch_one(route, alert).await;
        }
    }

    async fn dispatch_one(&self, route: &ComponentRoute, raw: RawAlert) {
        let now = Utc::now();
        let fallback_name = IncidentName::from_labels(&raw.labels).ok();

        match AlertRecord::parse(&raw.status, raw.labels, raw.annotations) {
            Ok(alert) => self.tracker.handle(route, &alert, now).await,
            Err(err) => {
                self.tracker
                    .report_failure(fallback_name, &AppError::BadInput(err), now)
                    .await
            }
        }
    }
}

#[async_trait]
impl<SP, EP> AlertReceiver for AlertDispatcher<SP, EP>
where
    SP: StatusPage,
    EP: EventPublisher,
{
    async fn process_alert(&self, route: &ComponentRoute, alert: RawAlert) {
        self.dispatch_one(route, alert).await;
    }

    async fn receive_batch(&self, route: &ComponentRoute, batch: AlertBatch) {
        self.dispatch(route, batch).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockEventPublisher, MockStatusPage};
    use crate::store::IncidentStore;
    use statusbridge_core::component::ComponentStatus;
    use statusbridge_core::ids::ComponentId;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn raw(status: &str, alertname: &str) -> RawAlert {
        RawAlert {
            status: status.into(),
            labels: BTreeMap::from([("alertname".into(), alertname.into())]),
            annotations: BTreeMap::new(),
        }
    }

    fn make_dispatcher() -> AlertDispatcher<MockStatusPage, MockEventPublisher> {
        let page = MockStatusPage::default().with_component(
            "infra",
            "database",
            7,
            ComponentStatus::Operational,
        );
        AlertDispatcher::new(IncidentTracker::new(
            page,
            MockEventPublisher::default(),
            IncidentStore::new(),
        ))
    }

    fn route() -> ComponentRoute {
        ComponentRoute::new("database", "infra")
    }

    fn is_tracked(dispatcher: &AlertDispatcher<MockStatusPage, MockEventPublisher>, name: &str) -> bool {
        dispatcher.tracker().store().contains(&IncidentName::new(name))
    }

    #[tokio::test]
    async fn batch_opens_then_resolves_incident() {
        let dispatcher = make_dispatcher();

        dispatcher
            .dispatch(
                &route(),
                AlertBatch {
                    status: "firing".into(),
                    alerts: vec![raw("firing", "db-down")],
                },
            )
            .await;
        assert!(is_tracked(&dispatcher, "db-down"));

        dispatcher
            .dispatch(
                &route(),
                AlertBatch {
                    status: "resolved".into(),
                    alerts: vec![raw("resolved", "db-down")],
                },
            )
            .await;

        let page = dispatcher.tracker().status_page();
        assert!(!is_tracked(&dispatcher, "db-down"));
        assert_eq!(page.updates.lock().unwrap()[0].1.message, "Resolved");
        assert_eq!(
            *page.component_updates.lock().unwrap(),
            vec![(ComponentId::new(7), ComponentStatus::Operational)]
        );
    }

    #[tokio::test]
    async fn per_alert_status_wins_over_batch_status() {
        let dispatcher = make_dispatcher();
        dispatcher
            .dispatch(
                &route(),
                AlertBatch {
                    status: "firing".into(),
                    alerts: vec![raw("firing", "db-down")],
                },
            )
            .await;

        dispatcher
            .dispatch(
                &route(),
                AlertBatch {
                    status: "firing".into(),
                    alerts: vec![raw("resolved", "db-down"), raw("firing", "cache-miss")],
                },
            )
            .await;

        assert!(!is_tracked(&dispatcher, "db-down"));
        assert!(is_tracked(&dispatcher, "cache-miss"));
    }

    #[tokio::test]
    async fn invalid_alert_does_not_stop_batch() {
        let dispatcher = make_dispatcher();
        let nameless = RawAlert {
            status: "firing".into(),
            ..RawAlert::default()
        };

        dispatcher
            .dispatch(
                &route(),
                AlertBatch {
                    status: "firing".into(),
                    alerts: vec![raw("pending", "db-down"), nameless, raw("firing", "api-5xx")],
                },
            )
            .await;

        assert!(!is_tracked(&dispatcher, "db-down"));
        assert!(is_tracked(&dispatcher, "api-5xx"));
        let types = dispatcher.tracker().events().event_types();
        assert_eq!(
            types,
            vec![
                "batch.received",
                "alert.failed",
                "alert.failed",
                "incident.opened"
            ]
        );
    }

    #[tokio::test]
    async fn remote_failure_does_not_stop_batch() {
        let dispatcher = make_dispatcher();
        dispatcher
            .tracker()
            .status_page()
            .fail_on("get_component");

        dispatcher
            .dispatch(
                &route(),
                AlertBatch {
                    status: "firing".into(),
                    alerts: vec![raw("firing", "db-down"), raw("resolved", "api-5xx")],
                },
            )
            .await;

        assert!(dispatcher.tracker().store().is_empty());
        assert!(dispatcher
            .tracker()
            .events()
            .event_types()
            .contains(&"incident.resolve_ignored"));
    }

    #[tokio::test]
    async fn receiver_port_processes_single_alert() {
        let dispatcher = Arc::new(make_dispatcher());
        let receiver: Arc<dyn AlertReceiver> = dispatcher.clone();

        receiver.process_alert(&route(), raw("FIRING", "db-down")).await;
        receiver
            .receive_batch(
                &route(),
                AlertBatch {
                    status: "firing".into(),
                    alerts: vec![raw("firing", "db-down")],
                },
            )
            .await;

        assert!(is_tracked(&dispatcher, "db-down"));
        assert_eq!(
            dispatcher.tracker().events().event_types(),
            vec![
                "incident.opened",
                "batch.received",
                "incident.duplicate_suppressed"
            ]
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_batches_track_each_name_once() {
        let dispatcher = Arc::new(make_dispatcher());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let dispatcher = Arc::clone(&dispatcher);
                tokio::spawn(async move {
                    dispatcher
                        .dispatch(
                            &route(),
                            AlertBatch {
                                status: "firing".into(),
                                alerts: vec![raw("firing", &format!("svc-{i}"))],
                            },
                        )
                        .await;
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let store = dispatcher.tracker().store();
        assert_eq!(store.len(), 16);
        assert_eq!(
            dispatcher
                .tracker()
                .status_page()
                .created
                .lock()
                .unwrap()
                .len(),
            16
        );
    }
}
