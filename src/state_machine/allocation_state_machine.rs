use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::debug;

use super::events::AllocationEvent;
use super::states::{AllocationStatus, DeallocationDetails, SuspensionDetails};
use crate::constants::{events, reasons, system};
use crate::error::Result;
use crate::events::publisher::{DomainEventPublisher, OutboundEvent};
use crate::models::Allocation;
use crate::repository::AllocationRepository;

/// Bulk allocation state machine driven by prisoner lifecycle events
///
/// Each operation loads the full set of allocations for one prisoner within
/// one prison, transitions every allocation whose current status makes the
/// event meaningful, and persists the batch in a single atomic write.
/// Allocations the event does not apply to are skipped rather than failed,
/// so re-delivering the same event produces the same end state without
/// re-stamping timestamps.
pub struct AllocationStateMachine {
    allocations: Arc<dyn AllocationRepository>,
    publisher: DomainEventPublisher,
}

impl AllocationStateMachine {
    pub fn new(allocations: Arc<dyn AllocationRepository>, publisher: DomainEventPublisher) -> Self {
        Self {
            allocations,
            publisher,
        }
    }

    /// Auto-suspend every active allocation for a temporarily released prisoner
    pub async fn apply_temporary_release(
        &self,
        prison_code: &str,
        prisoner_number: &str,
    ) -> Result<Vec<Allocation>> {
        self.apply(prison_code, prisoner_number, AllocationEvent::TemporaryRelease)
            .await
    }

    /// End every non-ended allocation for a permanently released prisoner
    pub async fn apply_permanent_release(
        &self,
        prison_code: &str,
        prisoner_number: &str,
    ) -> Result<Vec<Allocation>> {
        self.apply(prison_code, prisoner_number, AllocationEvent::PermanentRelease)
            .await
    }

    /// Reactivate every auto-suspended allocation for a returned prisoner
    ///
    /// User-initiated suspensions are deliberately left untouched; only the
    /// system reverses what the system suspended.
    pub async fn apply_return_to_custody(
        &self,
        prison_code: &str,
        prisoner_number: &str,
    ) -> Result<Vec<Allocation>> {
        self.apply(prison_code, prisoner_number, AllocationEvent::ReturnToCustody)
            .await
    }

    async fn apply(
        &self,
        prison_code: &str,
        prisoner_number: &str,
        event: AllocationEvent,
    ) -> Result<Vec<Allocation>> {
        let mut allocations = self
            .allocations
            .find_by_prison_code_and_prisoner_number(prison_code, prisoner_number)
            .await?;

        if allocations.is_empty() {
            // The prisoner may legitimately have no activity allocations
            debug!(
                prison_code = %prison_code,
                prisoner_number = %prisoner_number,
                event_type = event.event_type(),
                "No allocations found, nothing to transition"
            );
            return Ok(allocations);
        }

        let now = Utc::now();
        let mut transitioned: Vec<i64> = Vec::new();
        for allocation in &mut allocations {
            if Self::transition(allocation, event, now) {
                transitioned.push(allocation.allocation_id);
            }
        }

        if transitioned.is_empty() {
            debug!(
                prison_code = %prison_code,
                prisoner_number = %prisoner_number,
                event_type = event.event_type(),
                total = allocations.len(),
                "No allocations eligible for transition"
            );
            return Ok(allocations);
        }

        self.allocations.save_all(allocations.clone()).await?;

        let outcome = if event.is_terminal() {
            "ended"
        } else {
            "transitioned"
        };
        crate::logging::log_allocation_operation(
            event.event_type(),
            prison_code,
            prisoner_number,
            None,
            outcome,
            Some(&format!(
                "{} of {} allocations {}",
                transitioned.len(),
                allocations.len(),
                outcome
            )),
        );

        for allocation in allocations.iter().filter(|a| transitioned.contains(&a.allocation_id)) {
            self.publisher
                .publish(OutboundEvent::new(
                    events::ALLOCATION_AMENDED,
                    "A prisoner allocation has been amended",
                    json!({
                        "allocationId": allocation.allocation_id,
                        "prisonerNumber": allocation.prisoner_number,
                        "prisonCode": allocation.prison_code,
                        "status": allocation.status_kind(),
                    }),
                ))
                .await?;
        }

        Ok(allocations)
    }

    /// Apply a lifecycle event to a single allocation
    ///
    /// Returns true when the allocation's status changed. The eligibility
    /// check against the current status is what gives each operation its
    /// idempotence under at-least-once delivery.
    pub fn transition(
        allocation: &mut Allocation,
        event: AllocationEvent,
        now: DateTime<Utc>,
    ) -> bool {
        let next = match (&allocation.status, event) {
            (AllocationStatus::Active, AllocationEvent::TemporaryRelease) => {
                Some(AllocationStatus::AutoSuspended(SuspensionDetails {
                    suspended_by: system::SERVICE_USERNAME.to_string(),
                    suspended_reason: reasons::TEMPORARILY_RELEASED.to_string(),
                    suspended_at: now,
                }))
            }
            (
                AllocationStatus::Active
                | AllocationStatus::Suspended(_)
                | AllocationStatus::AutoSuspended(_),
                AllocationEvent::PermanentRelease,
            ) => Some(AllocationStatus::Ended(DeallocationDetails {
                deallocated_by: system::SERVICE_USERNAME.to_string(),
                deallocated_reason: reasons::RELEASED_FROM_PRISON.to_string(),
                deallocated_at: now,
            })),
            (AllocationStatus::AutoSuspended(_), AllocationEvent::ReturnToCustody) => {
                Some(AllocationStatus::Active)
            }
            // Ended is terminal; user suspensions are not auto-reversed; an
            // already-applied event finds nothing left to transition
            _ => None,
        };

        match next {
            Some(status) => {
                allocation.status = status;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::states::AllocationStatusKind;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn allocation(id: i64, status: AllocationStatus) -> Allocation {
        Allocation {
            allocation_id: id,
            prisoner_number: "A1234AA".to_string(),
            prison_code: "MDI".to_string(),
            activity_schedule_id: 10,
            status,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: None,
            allocated_by: "MR_BLOGS".to_string(),
            allocated_at: Utc::now(),
        }
    }

    fn user_suspension() -> SuspensionDetails {
        SuspensionDetails {
            suspended_by: "MR_BLOGS".to_string(),
            suspended_reason: "Behaviour review".to_string(),
            suspended_at: Utc::now(),
        }
    }

    fn system_suspension() -> SuspensionDetails {
        SuspensionDetails {
            suspended_by: system::SERVICE_USERNAME.to_string(),
            suspended_reason: reasons::TEMPORARILY_RELEASED.to_string(),
            suspended_at: Utc::now(),
        }
    }

    fn deallocation() -> DeallocationDetails {
        DeallocationDetails {
            deallocated_by: system::SERVICE_USERNAME.to_string(),
            deallocated_reason: reasons::RELEASED_FROM_PRISON.to_string(),
            deallocated_at: Utc::now(),
        }
    }

    #[test]
    fn test_temporary_release_auto_suspends_active_only() {
        let now = Utc::now();

        let mut active = allocation(1, AllocationStatus::Active);
        assert!(AllocationStateMachine::transition(
            &mut active,
            AllocationEvent::TemporaryRelease,
            now
        ));
        let details = active.status.suspension().unwrap();
        assert_eq!(details.suspended_by, "SYSTEM");
        assert_eq!(details.suspended_reason, "Temporarily released from prison");
        assert_eq!(details.suspended_at, now);

        let mut suspended = allocation(2, AllocationStatus::Suspended(user_suspension()));
        assert!(!AllocationStateMachine::transition(
            &mut suspended,
            AllocationEvent::TemporaryRelease,
            now
        ));
        assert_eq!(suspended.status_kind(), AllocationStatusKind::Suspended);
    }

    #[test]
    fn test_permanent_release_ends_every_non_ended_status() {
        let now = Utc::now();
        for status in [
            AllocationStatus::Active,
            AllocationStatus::Suspended(user_suspension()),
            AllocationStatus::AutoSuspended(system_suspension()),
        ] {
            let mut a = allocation(1, status);
            assert!(AllocationStateMachine::transition(
                &mut a,
                AllocationEvent::PermanentRelease,
                now
            ));
            let details = a.status.deallocation().unwrap();
            assert_eq!(details.deallocated_by, "SYSTEM");
            assert_eq!(details.deallocated_reason, "Released from prison");
            assert_eq!(details.deallocated_at, now);
        }
    }

    #[test]
    fn test_ended_is_terminal() {
        let original = deallocation();
        for event in [
            AllocationEvent::TemporaryRelease,
            AllocationEvent::PermanentRelease,
            AllocationEvent::ReturnToCustody,
        ] {
            let mut a = allocation(1, AllocationStatus::Ended(original.clone()));
            assert!(!AllocationStateMachine::transition(&mut a, event, Utc::now()));
            // Original deallocation metadata survives re-delivery untouched
            assert_eq!(a.status.deallocation(), Some(&original));
        }
    }

    #[test]
    fn test_return_to_custody_reverses_auto_suspensions_only() {
        let now = Utc::now();

        let mut auto_suspended =
            allocation(1, AllocationStatus::AutoSuspended(system_suspension()));
        assert!(AllocationStateMachine::transition(
            &mut auto_suspended,
            AllocationEvent::ReturnToCustody,
            now
        ));
        assert_eq!(auto_suspended.status, AllocationStatus::Active);
        assert!(auto_suspended.status.suspension().is_none());

        let mut user_suspended = allocation(2, AllocationStatus::Suspended(user_suspension()));
        assert!(!AllocationStateMachine::transition(
            &mut user_suspended,
            AllocationEvent::ReturnToCustody,
            now
        ));
        assert_eq!(user_suspended.status_kind(), AllocationStatusKind::Suspended);
    }

    proptest! {
        /// Applying the same event twice leaves the allocation exactly as a
        /// single application does: the second application is always a no-op
        #[test]
        fn prop_transitions_are_idempotent(status_seed in 0u8..4, event_seed in 0u8..3) {
            let status = match status_seed {
                0 => AllocationStatus::Active,
                1 => AllocationStatus::Suspended(user_suspension()),
                2 => AllocationStatus::AutoSuspended(system_suspension()),
                _ => AllocationStatus::Ended(deallocation()),
            };
            let event = match event_seed {
                0 => AllocationEvent::TemporaryRelease,
                1 => AllocationEvent::PermanentRelease,
                _ => AllocationEvent::ReturnToCustody,
            };

            let mut a = allocation(1, status);
            AllocationStateMachine::transition(&mut a, event, Utc::now());
            let after_first = a.clone();

            // Second delivery happens later, with a fresh timestamp on offer
            let changed_again = AllocationStateMachine::transition(
                &mut a,
                event,
                Utc::now() + chrono::Duration::minutes(5),
            );

            prop_assert!(!changed_again);
            prop_assert_eq!(a, after_first);
        }
    }
}
