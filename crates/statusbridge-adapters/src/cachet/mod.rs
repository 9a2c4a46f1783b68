//! [`StatusPage`] backed by the Cachet REST API (v1).

mod dto;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use statusbridge_core::component::ComponentStatus;
use statusbridge_core::ids::{ComponentId, IncidentId};
use statusbridge_ports::error::PortError;
use statusbridge_ports::outbound::StatusPage;
use statusbridge_ports::types::{
    Component, ComponentGroup, ComponentGroupPage, Incident, IncidentUpdate, NewIncident,
    NewIncidentUpdate,
};

use dto::{
    ComponentDto, ComponentGroupDto, ComponentStatusBody, Envelope, IncidentBody, IncidentDto,
    IncidentUpdateBody, IncidentUpdateDto, Paged,
};

const TOKEN_HEADER: &str = "X-Cachet-Token";
const PER_PAGE: &str = "100";

#[derive(Debug, Clone)]
pub struct CachetConfig {
    pub base_url: String,
    pub api_token: String,
    pub timeout: Duration,
}

impl CachetConfig {
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: api_token.into(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CachetClient {
    api_url: String,
    api_token: String,
    http: reqwest::Client,
}

impl CachetClient {
    pub fn new(config: CachetConfig) -> Result<Self, PortError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PortError::Transport(e.to_string()))?;

        Ok(Self {
            api_url: format!("{}/api/v1", config.base_url.trim_end_matches('/')),
            api_token: config.api_token,
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, PortError> {
        let response = request
            .header(TOKEN_HEADER, &self.api_token)
            .send()
            .await
            .map_err(|e| PortError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(PortError::NotFound);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Cachet API request failed");
            return Err(PortError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| PortError::Transport(e.to_string()))
    }

    /// Collects every page of a listing endpoint. Returns the items and Cachet's total.
    async fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<(Vec<T>, usize), PortError> {
        let mut items = Vec::new();
        let mut page = 1u32;
        loop {
            let page_param = page.to_string();
            let request = self
                .http
                .get(self.url(path))
                .query(query)
                .query(&[("per_page", PER_PAGE), ("page", page_param.as_str())]);
            let paged: Paged<T> = self.send(request).await?;
            let total = paged.meta.pagination.total;
            let total_pages = paged.meta.pagination.total_pages;
            let exhausted = paged.data.is_empty();
            items.extend(paged.data);

            // Bounded by our own page counter; the page number echoed back is not trusted.
            if exhausted || page >= total_pages {
                return Ok((items, total));
            }
            page += 1;
        }
    }
}

#[async_trait]
impl StatusPage for CachetClient {
    async fn find_component_groups_by_name(
        &self,
        name: &str,
    ) -> Result<ComponentGroupPage, PortError> {
        debug!(group = %name, "searching component groups");
        let (groups, total): (Vec<ComponentGroupDto>, usize) = self
            .get_all("/components/groups", &[("name", name.to_string())])
            .await?;
        let groups = groups
            .into_iter()
            .map(ComponentGroup::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ComponentGroupPage {
            count: total.max(groups.len()),
            groups,
        })
    }

    async fn get_component(&self, id: ComponentId) -> Result<Component, PortError> {
        let request = self.http.get(self.url(&format!("/components/{id}")));
        let envelope: Envelope<ComponentDto> = self.send(request).await?;
        Component::try_from(envelope.data)
    }

    async fn update_component(
        &self,
        id: ComponentId,
        status: ComponentStatus,
    ) -> Result<(), PortError> {
        debug!(component_id = %id, status = %status, "updating component status");
        let request = self
            .http
            .put(self.url(&format!("/components/{id}")))
            .json(&ComponentStatusBody { status });
        let _: Envelope<serde_json::Value> = self.send(request).await?;
        Ok(())
    }

    async fn create_incident(&self, incident: &NewIncident) -> Result<Incident, PortError> {
        debug!(name = %incident.name, component_id = ?incident.component_id, "creating incident");
        let body = IncidentBody {
            name: &incident.name,
            message: &incident.message,
            status: incident.status,
            visible: 1,
            component_id: incident.component_id,
            component_status: incident.component_status,
        };
        let request = self.http.post(self.url("/incidents")).json(&body);
        let envelope: Envelope<IncidentDto> = self.send(request).await?;
        Incident::try_from(envelope.data)
    }

    async fn create_incident_update(
        &self,
        incident_id: IncidentId,
        update: &NewIncidentUpdate,
    ) -> Result<IncidentUpdate, PortError> {
        debug!(incident_id = %incident_id, status = ?update.status, "creating incident update");
        let body = IncidentUpdateBody {
            status: update.status,
            human_status: &update.human_status,
            message: &update.message,
        };
        let request = self
            .http
            .post(self.url(&format!("/incidents/{incident_id}/updates")))
            .json(&body);
        let envelope: Envelope<IncidentUpdateDto> = self.send(request).await?;
        IncidentUpdate::try_from(envelope.data)
    }

    async fn list_incidents_by_component(
        &self,
        component_id: ComponentId,
    ) -> Result<Vec<Incident>, PortError> {
        let (incidents, _): (Vec<IncidentDto>, usize) = self
            .get_all("/incidents", &[("component_id", component_id.to_string())])
            .await?;
        incidents.into_iter().map(Incident::try_from).collect()
    }
}
