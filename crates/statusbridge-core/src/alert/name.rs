use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::labels;
use crate::error::DomainError;

/// Deduplication key: alerts sharing a name map onto the same incident.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IncidentName(String);

impl IncidentName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// `cachet_incident_name` when set, otherwise `alertname`.
    pub fn from_labels(labels: &BTreeMap<String, String>) -> Result<Self, DomainError> {
        non_empty(labels, labels::INCIDENT_NAME)
            .or_else(|| non_empty(labels, labels::ALERT_NAME))
            .map(Self::new)
            .ok_or(DomainError::MissingAlertName)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IncidentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub(crate) fn non_empty<'a>(map: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    map.get(key).map(String::as_str).filter(|v| !v.is_empty())
}
