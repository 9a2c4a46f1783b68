use statusbridge_ports::outbound::StatusPage;
use statusbridge_ports::types::{Component, ComponentGroup, ComponentRoute};

use crate::error::AppError;

/// Locates the component a route points at.
///
/// Exactly one group may carry the route's group name, both in the returned
/// groups and in the status page's reported count; more than one is a
/// provisioning error and is never resolved by picking one. Within that
/// group the first enabled component with a matching name wins.
pub async fn resolve_component<SP>(
    status_page: &SP,
    route: &ComponentRoute,
) -> Result<Component, AppError>
where
    SP: StatusPage + ?Sized,
{
    let page = status_page
        .find_component_groups_by_name(&route.component_group)
        .await?;

    let mut matches: Vec<ComponentGroup> = page
        .groups
        .into_iter()
        .filter(|g| g.name == route.component_group)
        .collect();

    // The status page's own count also covers groups beyond the returned pages.
    let count = page.count.max(matches.len());
    if matches.is_empty() {
        return Err(AppError::NotFound(format!(
            "component group {:?}",
            route.component_group
        )));
    }
    if count > 1 {
        return Err(AppError::AmbiguousGroup {
            name: route.component_group.clone(),
            count,
        });
    }
    let group = matches.swap_remove(0);

    group
        .enabled_components
        .into_iter()
        .find(|c| c.name == route.component)
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "component {:?} in group {:?}",
                route.component, route.component_group
            ))
        })
}
