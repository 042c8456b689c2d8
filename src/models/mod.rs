// Data model for the allocation core
//
// Owned entities (allocations) and the reference data consulted by the
// read-side resolvers (prison regimes, event priority overrides).

pub mod allocation;
pub mod priority;
pub mod regime;

pub use allocation::Allocation;
pub use priority::{EventCategory, EventPriorityOverride, ScheduledEventType};
pub use regime::PrisonRegime;
