use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::state_machine::states::{AllocationStatus, AllocationStatusKind};

/// A prisoner's assignment to a specific activity schedule
///
/// Allocations are never physically deleted; a deallocated prisoner's
/// allocation is transitioned to the terminal `Ended` status and retains its
/// deallocation metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub allocation_id: i64,
    pub prisoner_number: String,
    pub prison_code: String,
    pub activity_schedule_id: i64,
    #[serde(flatten)]
    pub status: AllocationStatus,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub allocated_by: String,
    pub allocated_at: DateTime<Utc>,
}

impl Allocation {
    pub fn status_kind(&self) -> AllocationStatusKind {
        self.status.kind()
    }

    /// Check whether an auto-suspension has outlived the prison's configured
    /// expiry threshold
    ///
    /// Only meaningful for auto-suspended allocations; a prisoner who has
    /// been out longer than `max_days_to_expiry` is not expected back and
    /// the allocation is reported expired on the read side.
    pub fn is_auto_suspension_expired(&self, max_days_to_expiry: u32, now: DateTime<Utc>) -> bool {
        match &self.status {
            AllocationStatus::AutoSuspended(details) => {
                now.signed_duration_since(details.suspended_at).num_days()
                    > i64::from(max_days_to_expiry)
            }
            _ => false,
        }
    }
}
