use serde::{Deserialize, Serialize};

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum IncidentStatus {
    Scheduled = 0,
    Investigating = 1,
    Identified = 2,
    Watching = 3,
    Fixed = 4,
}

impl IncidentStatus {
    /// Label the status page shows next to a closing update.
    pub const RESOLVED_HUMAN_STATUS: &'static str = "Resolved";

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Fixed
    }
}

impl TryFrom<u8> for IncidentStatus {
    type Error = DomainError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Scheduled),
            1 => Ok(Self::Investigating),
            2 => Ok(Self::Identified),
            3 => Ok(Self::Watching),
            4 => Ok(Self::Fixed),
            other => Err(DomainError::InvalidIncidentStatus(other.to_string())),
        }
    }
}

impl From<IncidentStatus> for u8 {
    fn from(status: IncidentStatus) -> Self {
        status.code()
    }
}
