//! Wire format of the Cachet v1 API.

use serde::{Deserialize, Deserializer, Serialize};

use statusbridge_core::component::ComponentStatus;
use statusbridge_core::ids::{ComponentGroupId, ComponentId, IncidentId, IncidentUpdateId};
use statusbridge_core::incident::IncidentStatus;
use statusbridge_ports::error::PortError;
use statusbridge_ports::types::{Component, ComponentGroup, Incident, IncidentUpdate};

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Paged<T> {
    #[serde(default)]
    pub meta: Meta,
    pub data: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Meta {
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Pagination {
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub total_pages: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ComponentDto {
    pub id: u64,
    pub name: String,
    #[serde(deserialize_with = "status_code")]
    pub status: u8,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ComponentGroupDto {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub enabled_components: Vec<ComponentDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IncidentDto {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(deserialize_with = "status_code")]
    pub status: u8,
    #[serde(default, deserialize_with = "optional_id")]
    pub component_id: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IncidentUpdateDto {
    pub id: u64,
    pub incident_id: u64,
    #[serde(deserialize_with = "status_code")]
    pub status: u8,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ComponentStatusBody {
    pub status: ComponentStatus,
}

#[derive(Debug, Serialize)]
pub(crate) struct IncidentBody<'a> {
    pub name: &'a str,
    pub message: &'a str,
    pub status: IncidentStatus,
    pub visible: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_id: Option<ComponentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_status: Option<ComponentStatus>,
}

#[derive(Debug, Serialize)]
pub(crate) struct IncidentUpdateBody<'a> {
    pub status: IncidentStatus,
    pub human_status: &'a str,
    pub message: &'a str,
}

impl TryFrom<ComponentDto> for Component {
    type Error = PortError;

    fn try_from(dto: ComponentDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ComponentId::new(dto.id),
            name: dto.name,
            status: ComponentStatus::try_from(dto.status).map_err(unexpected)?,
        })
    }
}

impl TryFrom<ComponentGroupDto> for ComponentGroup {
    type Error = PortError;

    fn try_from(dto: ComponentGroupDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ComponentGroupId::new(dto.id),
            name: dto.name,
            enabled_components: dto
                .enabled_components
                .into_iter()
                .map(Component::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl TryFrom<IncidentDto> for Incident {
    type Error = PortError;

    fn try_from(dto: IncidentDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: IncidentId::new(dto.id),
            name: dto.name,
            status: IncidentStatus::try_from(dto.status).map_err(unexpected)?,
            component_id: dto.component_id.map(ComponentId::new),
        })
    }
}

impl TryFrom<IncidentUpdateDto> for IncidentUpdate {
    type Error = PortError;

    fn try_from(dto: IncidentUpdateDto) -> Result<Self, Self::Error> {
        Ok(Self {
            id: IncidentUpdateId::new(dto.id),
            incident_id: IncidentId::new(dto.incident_id),
            status: IncidentStatus::try_from(dto.status).map_err(unexpected)?,
            message: dto.message,
        })
    }
}

fn unexpected(err: impl std::fmt::Display) -> PortError {
    PortError::Transport(format!("unexpected response: {err}"))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    String(String),
}

impl NumberOrString {
    fn into_u64<E: serde::de::Error>(self) -> Result<u64, E> {
        match self {
            Self::Number(n) => Ok(n),
            Self::String(s) => s.trim().parse().map_err(E::custom),
        }
    }
}

/// Cachet installations report statuses either as numbers or numeric strings.
fn status_code<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = NumberOrString::deserialize(deserializer)?.into_u64::<D::Error>()?;
    u8::try_from(raw).map_err(serde::de::Error::custom)
}

/// A component id of zero (or null) means the incident is not tied to a component.
fn optional_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => Ok(Some(raw.into_u64::<D::Error>()?).filter(|id| *id != 0)),
    }
}
