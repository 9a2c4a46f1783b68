use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Component health on the status page. Ordered so that a larger value is worse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ComponentStatus {
    Operational = 1,
    PerformanceIssues = 2,
    PartialOutage = 3,
    MajorOutage = 4,
}

impl ComponentStatus {
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Parses the value of a `cachet_component_status` label.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        raw.trim()
            .parse::<u8>()
            .map_err(|_| DomainError::InvalidComponentStatus(raw.to_string()))
            .and_then(Self::try_from)
    }
}

impl TryFrom<u8> for ComponentStatus {
    type Error = DomainError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Operational),
            2 => Ok(Self::PerformanceIssues),
            3 => Ok(Self::PartialOutage),
            4 => Ok(Self::MajorOutage),
            other => Err(DomainError::InvalidComponentStatus(other.to_string())),
        }
    }
}

impl From<ComponentStatus> for u8 {
    fn from(status: ComponentStatus) -> Self {
        status.code()
    }
}

impl fmt::Display for ComponentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Operational => "operational",
            Self::PerformanceIssues => "performance issues",
            Self::PartialOutage => "partial outage",
            Self::MajorOutage => "major outage",
        };
        write!(f, "{label} ({})", self.code())
    }
}
