// State machine module for the allocation lifecycle
//
// Provides the allocation status types, the lifecycle events that drive
// transitions, and the bulk transition machine applied per prisoner when an
// inbound lifecycle event arrives.

pub mod allocation_state_machine;
pub mod events;
pub mod states;

// Re-export main types for convenient access
pub use allocation_state_machine::AllocationStateMachine;
pub use events::AllocationEvent;
pub use states::{
    AllocationStatus, AllocationStatusKind, DeallocationDetails, SuspensionDetails,
};
