#![allow(clippy::doc_markdown)] // Allow technical terms like NOMIS, JSON in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Activities Core Rust
//!
//! Rust core for prison activity allocation lifecycle management and
//! scheduled-event reconciliation.
//!
//! ## Overview
//!
//! Activities Core implements the event-driven heart of a prison activity and
//! appointment scheduling service: prisoner lifecycle events (temporary
//! release, permanent release, return to custody) arriving from upstream
//! systems of record drive a prisoner's activity allocations through a
//! well-defined status lifecycle, while priority and time-slot resolvers
//! reconcile scheduled events sourced from systems with differing category
//! and period conventions.
//!
//! ## Architecture
//!
//! An inbound lifecycle event is routed by the [`events::dispatcher`] to the
//! [`state_machine`], which bulk-transitions the affected prisoner's
//! allocations and persists them through the [`repository`] seams in a single
//! batch. Changes are announced downstream via the [`events::publisher`].
//! The [`scheduling`] resolvers are consulted on-demand by read-side queries,
//! and outbound calls to unreliable upstream APIs are wrapped by the
//! [`resilience`] retry policy.
//!
//! ## Key Properties
//!
//! - **Idempotent transitions**: re-delivered events never re-stamp an
//!   allocation that has already been transitioned
//! - **Type-safe status**: suspension and deallocation metadata are only
//!   constructible for the status variants they belong to
//! - **Explicit gating**: inbound event kinds are enabled through a closed
//!   set of feature switches rather than ambient environment lookups
//! - **Data-driven retries**: retry behaviour is a policy value applied by a
//!   generic wrapper, with transport failures and 502s as the only
//!   retryable classes
//!
//! ## Module Organization
//!
//! - [`models`] - Allocation, prison regime, and priority override data types
//! - [`repository`] - Async trait seams for the persistence collaborators
//! - [`state_machine`] - Allocation status lifecycle and bulk transitions
//! - [`events`] - Inbound envelope, dispatcher, and outbound publisher
//! - [`scheduling`] - Event priority and time-slot resolution
//! - [`resilience`] - Retry policy for upstream HTTP calls
//! - [`client`] - Upstream API error taxonomy
//! - [`config`] - Configuration management
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use activities_core::events::publisher::{DomainEventPublisher, InMemoryEventBus};
//! use activities_core::state_machine::AllocationStateMachine;
//! use activities_core::test_helpers::InMemoryAllocationRepository;
//!
//! # tokio_test::block_on(async {
//! let repository = Arc::new(InMemoryAllocationRepository::new());
//! let publisher = DomainEventPublisher::new(Arc::new(InMemoryEventBus::default()));
//! let machine = AllocationStateMachine::new(repository, publisher);
//!
//! machine.apply_temporary_release("MDI", "A1234AA").await.unwrap();
//! # });
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod logging;
pub mod models;
pub mod repository;
pub mod resilience;
pub mod scheduling;
pub mod state_machine;
pub mod test_helpers;

pub use config::{CoreConfig, FeatureSwitches, RetryConfig};
pub use error::{ActivitiesError, Result};
pub use events::dispatcher::{DispatchOutcome, InboundEventDispatcher};
pub use events::inbound::{InboundEvent, PrisonerEvent, ReceivedReason, ReleaseReason};
pub use events::publisher::{DomainEventPublisher, EventBusClient, OutboundEvent, PublishError};
pub use models::{Allocation, EventPriorityOverride, PrisonRegime};
pub use repository::{
    AllocationRepository, EventPriorityRepository, PrisonRegimeRepository, RepositoryError,
};
pub use resilience::{call_with_retry, RetryPolicy};
pub use scheduling::priority::EventPriorityResolver;
pub use scheduling::time_slot::{classify, TimeSlot, TimeSlotResolver};
pub use state_machine::{
    AllocationEvent, AllocationStateMachine, AllocationStatus, AllocationStatusKind,
    DeallocationDetails, SuspensionDetails,
};
