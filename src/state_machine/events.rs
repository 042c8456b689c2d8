use serde::{Deserialize, Serialize};

/// Lifecycle events that drive allocation state transitions
///
/// Each event is applied to a prisoner's full set of allocations within one
/// prison; allocations whose current status makes the transition meaningless
/// are skipped rather than failed, which is what makes re-delivery safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AllocationEvent {
    /// Prisoner temporarily out of the prison (court, hospital, absence)
    TemporaryRelease,
    /// Prisoner permanently released or transferred
    PermanentRelease,
    /// Prisoner back in custody after a temporary absence
    ReturnToCustody,
}

impl AllocationEvent {
    /// Get a string representation of the event type for logging
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::TemporaryRelease => "temporary_release",
            Self::PermanentRelease => "permanent_release",
            Self::ReturnToCustody => "return_to_custody",
        }
    }

    /// Check if this event ends allocations rather than suspending them
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::PermanentRelease)
    }
}
