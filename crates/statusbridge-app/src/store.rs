use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use statusbridge_core::alert::IncidentName;
use statusbridge_core::incident::TrackedIncident;

/// Open incidents keyed by incident name, shared by every request for the
/// lifetime of the process. The lock is only held for a single map operation.
#[derive(Debug, Clone, Default)]
pub struct IncidentStore {
    incidents: Arc<Mutex<HashMap<IncidentName, TrackedIncident>>>,
}

impl IncidentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &IncidentName) -> Option<TrackedIncident> {
        self.lock().get(name).cloned()
    }

    pub fn contains(&self, name: &IncidentName) -> bool {
        self.lock().contains_key(name)
    }

    /// Last writer wins when two requests open the same name concurrently.
    pub fn insert(&self, incident: TrackedIncident) -> Option<TrackedIncident> {
        self.lock().insert(incident.name().clone(), incident)
    }

    pub fn remove(&self, name: &IncidentName) -> Option<TrackedIncident> {
        self.lock().remove(name)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn names(&self) -> Vec<IncidentName> {
        let mut names: Vec<_> = self.lock().keys().cloned().collect();
        names.sort();
        names
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<IncidentName, TrackedIncident>> {
        // Map operations cannot leave the map half-written, so a poisoned lock is still usable.
        self.incidents.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
