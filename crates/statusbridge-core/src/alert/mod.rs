pub mod labels;
pub mod name;
pub mod status;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::component::ComponentStatus;
use crate::error::DomainError;

pub use name::IncidentName;
pub use status::AlertStatus;

use name::non_empty;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecord {
    status: AlertStatus,
    incident_name: IncidentName,
    labels: BTreeMap<String, String>,
    annotations: BTreeMap<String, String>,
}

impl AlertRecord {
    pub fn new(
        status: AlertStatus,
        labels: BTreeMap<String, String>,
        annotations: BTreeMap<String, String>,
    ) -> Result<Self, DomainError> {
        let incident_name = IncidentName::from_labels(&labels)?;
        Ok(Self {
            status,
            incident_name,
            labels,
            annotations,
        })
    }

    /// Builds a record from the raw status string the alert source sent.
    pub fn parse(
        status: &str,
        labels: BTreeMap<String, String>,
        annotations: BTreeMap<String, String>,
    ) -> Result<Self, DomainError> {
        Self::new(status.parse()?, labels, annotations)
    }

    pub fn status(&self) -> AlertStatus {
        self.status
    }

    pub fn incident_name(&self) -> &IncidentName {
        &self.incident_name
    }

    /// `cachet_incident_message`, then `summary`, then the incident name.
    pub fn incident_message(&self) -> &str {
        non_empty(&self.annotations, labels::INCIDENT_MESSAGE)
            .or_else(|| non_empty(&self.annotations, labels::SUMMARY))
            .unwrap_or_else(|| self.incident_name.as_str())
    }

    pub fn resolve_message(&self) -> &str {
        non_empty(&self.annotations, labels::INCIDENT_UPDATE_MESSAGE)
            .unwrap_or(labels::DEFAULT_RESOLVE_MESSAGE)
    }

    /// Explicit component status requested through `cachet_component_status`.
    pub fn component_status_override(&self) -> Result<Option<ComponentStatus>, DomainError> {
        non_empty(&self.labels, labels::COMPONENT_STATUS)
            .map(ComponentStatus::parse)
            .transpose()
    }
}
