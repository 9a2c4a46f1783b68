use async_trait::async_trait;

use crate::types::{AlertBatch, ComponentRoute, RawAlert};

/// Entry points offered to the webhook transport. Failures are reported
/// through the event publisher, never returned to the caller.
#[async_trait]
pub trait AlertReceiver: Send + Sync {
    async fn process_alert(&self, route: &ComponentRoute, alert: RawAlert);
    async fn receive_batch(&self, route: &ComponentRoute, batch: AlertBatch);
}
