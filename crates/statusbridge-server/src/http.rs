use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use tracing::{debug, error, info};

use statusbridge_ports::inbound::AlertReceiver;
use statusbridge_ports::outbound::AlertSourceParser;
use statusbridge_ports::types::ComponentRoute;

#[derive(Clone)]
pub struct AppState {
    receiver: Arc<dyn AlertReceiver>,
    parser: Arc<dyn AlertSourceParser>,
}

impl AppState {
    pub fn new(receiver: Arc<dyn AlertReceiver>, parser: Arc<dyn AlertSourceParser>) -> Self {
        Self { receiver, parser }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct WebhookQuery {
    #[serde(default)]
    component: String,
    #[serde(default, rename = "componentGroup")]
    component_group: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/webhook", post(webhook))
        .with_state(state)
}

async fn health() -> &'static str {
    "Alive"
}

/// Answers 200 for every decodable payload; per-alert failures only show up in the logs.
async fn webhook(
    State(state): State<AppState>,
    Query(query): Query<WebhookQuery>,
    body: Bytes,
) -> (StatusCode, String) {
    info!(source = state.parser.source_name(), "receiving alert");

    let batch = match state.parser.parse(&body) {
        Ok(batch) => batch,
        Err(err) => {
            error!(error = %err, "error decoding alert");
            return (StatusCode::BAD_REQUEST, err.to_string());
        }
    };
    debug!(status = %batch.status, alerts = batch.alerts.len(), "decoded alert batch");

    let route = ComponentRoute::new(query.component, query.component_group);
    state.receiver.receive_batch(&route, batch).await;

    (StatusCode::OK, String::new())
}
