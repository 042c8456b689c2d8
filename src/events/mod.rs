// Event system for the allocation core
//
// Inbound: the prisoner lifecycle envelope and the dispatcher that routes it
// to the state machine under feature-switch gating.
// Outbound: the domain event publisher announcing allocation changes to the
// downstream bus with best-effort failure handling.

pub mod dispatcher;
pub mod inbound;
pub mod publisher;

pub use dispatcher::{DispatchOutcome, DispatcherMetrics, InboundEventDispatcher};
pub use inbound::{InboundEvent, PrisonerEvent, ReceivedReason, ReleaseReason};
pub use publisher::{
    DomainEventPublisher, EventBusClient, InMemoryEventBus, OutboundEvent, PublishError,
};
