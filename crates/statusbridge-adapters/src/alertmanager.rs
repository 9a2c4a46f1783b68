//! Prometheus Alertmanager webhook payloads.

use std::collections::BTreeMap;

use serde::Deserialize;

use statusbridge_ports::error::ParseError;
use statusbridge_ports::outbound::AlertSourceParser;
use statusbridge_ports::types::{AlertBatch, RawAlert};

#[derive(Debug, Deserialize)]
struct WebhookPayload {
    #[serde(default)]
    status: String,
    #[serde(default)]
    alerts: Vec<WebhookAlert>,
}

#[derive(Debug, Deserialize)]
struct WebhookAlert {
    #[serde(default)]
    status: String,
    #[serde(default)]
    labels: BTreeMap<String, String>,
    #[serde(default)]
    annotations: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlertmanagerParser;

impl AlertSourceParser for AlertmanagerParser {
    fn parse(&self, payload: &[u8]) -> Result<AlertBatch, ParseError> {
        let payload: WebhookPayload =
            serde_json::from_slice(payload).map_err(|e| ParseError::InvalidJson(e.to_string()))?;
        let batch_status = payload.status;
        let alerts = payload
            .alerts
            .into_iter()
            .map(|alert| RawAlert {
                // An alert without its own status inherits the group's.
                status: if alert.status.is_empty() {
                    batch_status.clone()
                } else {
                    alert.status
                },
                labels: alert.labels,
                annotations: alert.annotations,
            })
            .collect();

        Ok(AlertBatch {
            status: batch_status,
            alerts,
        })
    }

    fn source_name(&self) -> &str {
        "alertmanager"
    }
}
