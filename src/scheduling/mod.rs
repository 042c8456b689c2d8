// Read-side schedule reconciliation
//
// Consulted on-demand by scheduling queries, not event-driven: priority
// resolution orders events from differing source systems, time-slot
// resolution maps clock times onto a prison's AM/PM/ED periods.

pub mod priority;
pub mod time_slot;

pub use priority::EventPriorityResolver;
pub use time_slot::{classify, TimeSlot, TimeSlotResolver};
