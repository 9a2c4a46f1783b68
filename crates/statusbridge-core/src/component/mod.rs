pub mod escalation;
pub mod status;

use serde::{Deserialize, Serialize};

use crate::ids::ComponentId;

pub use escalation::decide_component_status;
pub use status::ComponentStatus;

/// A component as last read from the status page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRef {
    pub id: ComponentId,
    pub status: ComponentStatus,
}
