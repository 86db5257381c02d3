pub mod incident;
pub mod reference;

pub use incident::{HydratedIncident, IncidentFilter, IncidentPatch, IncidentRepository, IncidentStats, NewIncident};
pub use reference::ReferenceIds;
