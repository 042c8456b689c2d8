//! # Inbound Event Dispatcher
//!
//! Routes a prisoner lifecycle event to the allocation state machine based
//! on its kind and reason classification. Every kind is gated by an
//! explicit feature switch; a disabled kind is dropped silently and
//! reported as successfully processed so the transport never requeues it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::FeatureSwitches;
use crate::error::Result;
use crate::events::inbound::{InboundEvent, PrisonerEvent};
use crate::state_machine::AllocationStateMachine;

/// How the dispatcher resolved an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Routed to the state machine and allocations were (re)examined
    Applied,
    /// Feature switch for this kind is off; dropped as success
    FeatureDisabled,
    /// Released event whose reason is neither temporary nor permanent
    UnrecognizedReason,
    /// Received event that is not a return from temporary absence
    NotReturnToCustody,
    /// Interesting event handed to the generic observability handler
    Delegated,
}

/// Running tallies exposed for observability
#[derive(Debug, Default)]
pub struct DispatcherMetrics {
    processed: AtomicU64,
    skipped_disabled: AtomicU64,
    unrecognized_reasons: AtomicU64,
    delegated: AtomicU64,
}

/// Point-in-time snapshot of the dispatcher tallies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatcherMetricsSnapshot {
    pub processed: u64,
    pub skipped_disabled: u64,
    pub unrecognized_reasons: u64,
    pub delegated: u64,
}

impl DispatcherMetrics {
    pub fn snapshot(&self) -> DispatcherMetricsSnapshot {
        DispatcherMetricsSnapshot {
            processed: self.processed.load(Ordering::Relaxed),
            skipped_disabled: self.skipped_disabled.load(Ordering::Relaxed),
            unrecognized_reasons: self.unrecognized_reasons.load(Ordering::Relaxed),
            delegated: self.delegated.load(Ordering::Relaxed),
        }
    }
}

pub struct InboundEventDispatcher {
    state_machine: Arc<AllocationStateMachine>,
    features: FeatureSwitches,
    metrics: DispatcherMetrics,
}

impl InboundEventDispatcher {
    pub fn new(state_machine: Arc<AllocationStateMachine>, features: FeatureSwitches) -> Self {
        Self {
            state_machine,
            features,
            metrics: DispatcherMetrics::default(),
        }
    }

    pub fn metrics(&self) -> DispatcherMetricsSnapshot {
        self.metrics.snapshot()
    }

    fn applied(&self, event_type: &str, prisoner_number: &str) {
        self.metrics.processed.fetch_add(1, Ordering::Relaxed);
        crate::logging::log_event_operation(
            "dispatch",
            event_type,
            Some(prisoner_number),
            "applied",
            None,
        );
    }

    /// Route one inbound event
    ///
    /// Errors surface only from the state machine (repository or fatal
    /// publish failures); every no-op path returns `Ok` with an outcome
    /// describing why nothing happened.
    pub async fn process(&self, event: &InboundEvent) -> Result<DispatchOutcome> {
        match event.to_prisoner_event() {
            PrisonerEvent::Released {
                prisoner_number,
                prison_code,
                reason,
            } => {
                if !self.features.released_events {
                    self.metrics.skipped_disabled.fetch_add(1, Ordering::Relaxed);
                    debug!(event_type = %event.event_type, "Released events disabled, dropping");
                    return Ok(DispatchOutcome::FeatureDisabled);
                }

                if reason.is_temporary() {
                    self.state_machine
                        .apply_temporary_release(&prison_code, &prisoner_number)
                        .await?;
                    self.applied(&event.event_type, &prisoner_number);
                    Ok(DispatchOutcome::Applied)
                } else if reason.is_permanent() {
                    self.state_machine
                        .apply_permanent_release(&prison_code, &prisoner_number)
                        .await?;
                    self.applied(&event.event_type, &prisoner_number);
                    Ok(DispatchOutcome::Applied)
                } else {
                    // Not an error: new upstream reason codes must not poison
                    // the queue, but they are surfaced for operators
                    self.metrics
                        .unrecognized_reasons
                        .fetch_add(1, Ordering::Relaxed);
                    warn!(
                        prisoner_number = %prisoner_number,
                        prison_code = %prison_code,
                        reason = %reason,
                        "Unrecognized release reason, ignoring event"
                    );
                    Ok(DispatchOutcome::UnrecognizedReason)
                }
            }

            PrisonerEvent::Received {
                prisoner_number,
                prison_code,
                reason,
            } => {
                if !self.features.received_events {
                    self.metrics.skipped_disabled.fetch_add(1, Ordering::Relaxed);
                    debug!(event_type = %event.event_type, "Received events disabled, dropping");
                    return Ok(DispatchOutcome::FeatureDisabled);
                }

                if reason.is_return_from_temporary_absence() {
                    self.state_machine
                        .apply_return_to_custody(&prison_code, &prisoner_number)
                        .await?;
                    self.applied(&event.event_type, &prisoner_number);
                    Ok(DispatchOutcome::Applied)
                } else {
                    debug!(
                        prisoner_number = %prisoner_number,
                        reason = %reason,
                        "Received event is not a return from temporary absence, ignoring"
                    );
                    Ok(DispatchOutcome::NotReturnToCustody)
                }
            }

            PrisonerEvent::Interesting {
                kind,
                prisoner_number,
                prison_code,
            } => {
                if !self.features.interesting_events {
                    self.metrics.skipped_disabled.fetch_add(1, Ordering::Relaxed);
                    return Ok(DispatchOutcome::FeatureDisabled);
                }

                self.metrics.delegated.fetch_add(1, Ordering::Relaxed);
                info!(
                    kind = %kind,
                    prisoner_number = %prisoner_number,
                    prison_code = %prison_code,
                    "👀 Interesting event observed"
                );
                Ok(DispatchOutcome::Delegated)
            }
        }
    }
}
