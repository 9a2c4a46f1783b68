use statusbridge_core::error::DomainError;
use statusbridge_ports::error::PortError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("found {count} component groups named {name:?}")]
    AmbiguousGroup { name: String, count: usize },
    #[error("bad input: {0}")]
    BadInput(#[from] DomainError),
    #[error("transport error: {0}")]
    Transport(#[from] PortError),
}
