use super::status::ComponentStatus;

/// Target status for a component when a new alert fires against it.
///
/// Without an override the component is pushed to [`ComponentStatus::MajorOutage`].
/// An override only ever raises the status; restoring a component happens on
/// the resolve path, never here.
pub fn decide_component_status(
    current: ComponentStatus,
    override_status: Option<ComponentStatus>,
) -> ComponentStatus {
    match override_status {
        None if current < ComponentStatus::MajorOutage => ComponentStatus::MajorOutage,
        None => current,
        Some(desired) => desired.max(current),
    }
}
