//! Label and annotation keys that steer how an alert maps onto the status page.

pub const ALERT_NAME: &str = "alertname";
pub const INCIDENT_NAME: &str = "cachet_incident_name";
pub const COMPONENT_STATUS: &str = "cachet_component_status";

pub const INCIDENT_MESSAGE: &str = "cachet_incident_message";
pub const INCIDENT_UPDATE_MESSAGE: &str = "cachet_incident_update_message";
pub const SUMMARY: &str = "summary";

pub const DEFAULT_RESOLVE_MESSAGE: &str = "Resolved";
