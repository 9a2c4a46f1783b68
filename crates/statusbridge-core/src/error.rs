use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown alert status: {0}")]
    UnknownAlertStatus(String),
    #[error("alert has no alertname label")]
    MissingAlertName,
    #[error("invalid component status: {0}")]
    InvalidComponentStatus(String),
    #[error("invalid incident status: {0}")]
    InvalidIncidentStatus(String),
}
