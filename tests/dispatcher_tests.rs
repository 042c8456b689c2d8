//! Inbound event routing tests: raw envelopes through the dispatcher into
//! the state machine, with feature-switch gating.

use std::sync::Arc;

use chrono::Utc;

use activities_core::config::FeatureSwitches;
use activities_core::constants::events;
use activities_core::events::dispatcher::{DispatchOutcome, InboundEventDispatcher};
use activities_core::events::inbound::InboundEvent;
use activities_core::events::publisher::{DomainEventPublisher, InMemoryEventBus};
use activities_core::state_machine::states::{
    AllocationStatus, AllocationStatusKind, SuspensionDetails,
};
use activities_core::state_machine::AllocationStateMachine;
use activities_core::test_helpers::{allocation_fixture, InMemoryAllocationRepository};

const PRISON: &str = "MDI";
const PRISONER: &str = "123456";

fn wire(features: FeatureSwitches) -> (Arc<InMemoryAllocationRepository>, InboundEventDispatcher) {
    let repository = Arc::new(InMemoryAllocationRepository::new());
    let publisher = DomainEventPublisher::new(Arc::new(InMemoryEventBus::default()));
    let machine = Arc::new(AllocationStateMachine::new(repository.clone(), publisher));
    (repository, InboundEventDispatcher::new(machine, features))
}

fn envelope(event_type: &str, reason: Option<&str>) -> InboundEvent {
    InboundEvent {
        event_type: event_type.to_string(),
        prisoner_number: PRISONER.to_string(),
        prison_code: PRISON.to_string(),
        reason: reason.map(str::to_string),
        occurred_at: Utc::now(),
    }
}

#[tokio::test]
async fn temporary_release_reason_routes_to_auto_suspension() {
    let (repository, dispatcher) = wire(FeatureSwitches::default());
    repository.seed(vec![
        allocation_fixture(1, PRISON, PRISONER, AllocationStatus::Active),
        allocation_fixture(2, PRISON, PRISONER, AllocationStatus::Active),
    ]);

    let outcome = dispatcher
        .process(&envelope(
            events::PRISONER_RELEASED,
            Some("TEMPORARY_ABSENCE_RELEASE"),
        ))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::Applied);
    assert_eq!(
        repository.get(1).unwrap().status_kind(),
        AllocationStatusKind::AutoSuspended
    );
    assert_eq!(
        repository.get(2).unwrap().status_kind(),
        AllocationStatusKind::AutoSuspended
    );
}

#[tokio::test]
async fn permanent_release_reason_routes_to_deallocation() {
    let (repository, dispatcher) = wire(FeatureSwitches::default());
    repository.seed(vec![allocation_fixture(
        1,
        PRISON,
        PRISONER,
        AllocationStatus::Active,
    )]);

    let outcome = dispatcher
        .process(&envelope(events::PRISONER_RELEASED, Some("TRANSFERRED")))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::Applied);
    assert_eq!(
        repository.get(1).unwrap().status_kind(),
        AllocationStatusKind::Ended
    );
}

#[tokio::test]
async fn release_then_return_round_trip() -> anyhow::Result<()> {
    let (repository, dispatcher) = wire(FeatureSwitches::default());
    repository.seed(vec![allocation_fixture(
        1,
        PRISON,
        PRISONER,
        AllocationStatus::Active,
    )]);

    dispatcher
        .process(&envelope(events::PRISONER_RELEASED, Some("SENT_TO_COURT")))
        .await?;
    assert_eq!(
        repository.get(1).unwrap().status_kind(),
        AllocationStatusKind::AutoSuspended
    );

    dispatcher
        .process(&envelope(events::PRISONER_RECEIVED, Some("RETURN_FROM_COURT")))
        .await?;
    assert_eq!(
        repository.get(1).unwrap().status_kind(),
        AllocationStatusKind::Active
    );
    Ok(())
}

#[tokio::test]
async fn unrecognized_release_reason_leaves_allocations_untouched() {
    let (repository, dispatcher) = wire(FeatureSwitches::default());
    repository.seed(vec![allocation_fixture(
        1,
        PRISON,
        PRISONER,
        AllocationStatus::Active,
    )]);

    let outcome = dispatcher
        .process(&envelope(events::PRISONER_RELEASED, Some("NEW_UPSTREAM_CODE")))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::UnrecognizedReason);
    assert_eq!(
        repository.get(1).unwrap().status_kind(),
        AllocationStatusKind::Active
    );
}

#[tokio::test]
async fn disabled_feature_drops_event_without_touching_allocations() {
    let (repository, dispatcher) = wire(FeatureSwitches {
        released_events: false,
        ..FeatureSwitches::default()
    });
    repository.seed(vec![allocation_fixture(
        1,
        PRISON,
        PRISONER,
        AllocationStatus::Active,
    )]);

    let outcome = dispatcher
        .process(&envelope(events::PRISONER_RELEASED, Some("RELEASED")))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::FeatureDisabled);
    assert_eq!(
        repository.get(1).unwrap().status_kind(),
        AllocationStatusKind::Active
    );
}

#[tokio::test]
async fn disabled_received_events_leave_suspensions_in_place() {
    let (repository, dispatcher) = wire(FeatureSwitches {
        received_events: false,
        ..FeatureSwitches::default()
    });
    repository.seed(vec![allocation_fixture(
        1,
        PRISON,
        PRISONER,
        AllocationStatus::AutoSuspended(SuspensionDetails {
            suspended_by: "SYSTEM".to_string(),
            suspended_reason: "Temporarily released from prison".to_string(),
            suspended_at: Utc::now(),
        }),
    )]);

    let outcome = dispatcher
        .process(&envelope(events::PRISONER_RECEIVED, Some("RETURN_FROM_COURT")))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::FeatureDisabled);
    assert_eq!(
        repository.get(1).unwrap().status_kind(),
        AllocationStatusKind::AutoSuspended
    );
    assert_eq!(dispatcher.metrics().skipped_disabled, 1);
}

#[tokio::test]
async fn disabled_interesting_events_are_dropped_not_delegated() {
    let (_repository, dispatcher) = wire(FeatureSwitches {
        interesting_events: false,
        ..FeatureSwitches::default()
    });

    let outcome = dispatcher
        .process(&envelope(events::CELL_MOVE, None))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::FeatureDisabled);
    assert_eq!(dispatcher.metrics().delegated, 0);
    assert_eq!(dispatcher.metrics().skipped_disabled, 1);
}

#[tokio::test]
async fn cell_move_is_observed_not_applied() {
    let (repository, dispatcher) = wire(FeatureSwitches::default());
    repository.seed(vec![allocation_fixture(
        1,
        PRISON,
        PRISONER,
        AllocationStatus::Active,
    )]);

    let outcome = dispatcher
        .process(&envelope(events::CELL_MOVE, None))
        .await
        .unwrap();

    assert_eq!(outcome, DispatchOutcome::Delegated);
    assert_eq!(
        repository.get(1).unwrap().status_kind(),
        AllocationStatusKind::Active
    );
    assert_eq!(dispatcher.metrics().delegated, 1);
}
