//! # System Constants
//!
//! Core constants that define the operational vocabulary of the allocation
//! core: the system sentinel recorded against machine-initiated transitions,
//! the fixed human-readable reasons stamped on suspensions and
//! deallocations, and the inbound/outbound event type names exchanged with
//! the upstream and downstream systems of record.

/// Sentinel identities recorded against system-initiated changes
pub mod system {
    /// Recorded as `suspended_by` / `deallocated_by` when a transition is
    /// driven by an inbound lifecycle event rather than a user action
    pub const SERVICE_USERNAME: &str = "SYSTEM";
}

/// Fixed human-readable reasons stamped on system-initiated transitions
pub mod reasons {
    pub const TEMPORARILY_RELEASED: &str = "Temporarily released from prison";
    pub const RELEASED_FROM_PRISON: &str = "Released from prison";
}

/// Event type names on the inbound and outbound wire
pub mod events {
    // Inbound prisoner lifecycle events
    pub const PRISONER_RELEASED: &str = "prisoner-offender-search.prisoner.released";
    pub const PRISONER_RECEIVED: &str = "prisoner-offender-search.prisoner.received";

    // Inbound "interesting" events, routed to the generic handler
    pub const CELL_MOVE: &str = "prison-offender-events.prisoner.cell-move";
    pub const INCENTIVES_UPDATED: &str = "incentives.iep-review.updated";
    pub const NON_ASSOCIATION_CHANGED: &str =
        "prison-offender-events.prisoner.non-association-detail.changed";
    pub const ALERTS_UPDATED: &str = "prisoner-offender-search.prisoner.alerts-updated";

    // Outbound domain events
    pub const ALLOCATION_AMENDED: &str = "activities.prisoner.allocation-amended";
    pub const ATTENDANCE_AMENDED: &str = "activities.prisoner.attendance-amended";
}
