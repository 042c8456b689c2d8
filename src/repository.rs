//! # Repository Seams
//!
//! Async trait boundaries for the persistence collaborators this core
//! depends on. The owning service supplies database-backed implementations;
//! this crate ships in-memory implementations under [`crate::test_helpers`]
//! for unit and integration testing.
//!
//! `save_all` is an atomic batch persist: a single prisoner's full
//! read-modify-write is enclosed in one transaction boundary, so a
//! concurrent reader never observes a partially-transitioned set.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Allocation, EventPriorityOverride, PrisonRegime};

/// Repository failure, fatal to the current event-processing attempt
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Repository operation failed: {operation}: {message}")]
    Operation { operation: String, message: String },
}

impl RepositoryError {
    pub fn operation(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Operation {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Lookup and batch persistence of allocations
#[async_trait]
pub trait AllocationRepository: Send + Sync {
    /// All allocations for a prisoner within one prison, any status
    async fn find_by_prison_code_and_prisoner_number(
        &self,
        prison_code: &str,
        prisoner_number: &str,
    ) -> RepositoryResult<Vec<Allocation>>;

    /// Atomic batch persist of a prisoner's transitioned allocations
    async fn save_all(&self, allocations: Vec<Allocation>) -> RepositoryResult<()>;
}

/// Reference-data lookup of a prison's regime rows
#[async_trait]
pub trait PrisonRegimeRepository: Send + Sync {
    async fn find_by_prison_code(&self, prison_code: &str) -> RepositoryResult<Vec<PrisonRegime>>;
}

/// Reference-data lookup of a prison's priority overrides
#[async_trait]
pub trait EventPriorityRepository: Send + Sync {
    async fn find_by_prison_code(
        &self,
        prison_code: &str,
    ) -> RepositoryResult<Vec<EventPriorityOverride>>;
}
