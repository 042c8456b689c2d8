//! # Test Helpers
//!
//! In-memory implementations of the repository seams plus builders for the
//! common fixtures. Used by this crate's unit and integration tests and
//! available to downstream consumers wiring the core up without a database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use parking_lot::RwLock;

use crate::models::{Allocation, EventPriorityOverride, PrisonRegime};
use crate::repository::{
    AllocationRepository, EventPriorityRepository, PrisonRegimeRepository, RepositoryError,
    RepositoryResult,
};
use crate::state_machine::states::AllocationStatus;

/// In-memory allocation store keyed by allocation id
#[derive(Debug, Default)]
pub struct InMemoryAllocationRepository {
    rows: RwLock<HashMap<i64, Allocation>>,
    fail_saves: AtomicBool,
}

impl InMemoryAllocationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, allocations: Vec<Allocation>) {
        let mut rows = self.rows.write();
        for allocation in allocations {
            rows.insert(allocation.allocation_id, allocation);
        }
    }

    pub fn get(&self, allocation_id: i64) -> Option<Allocation> {
        self.rows.read().get(&allocation_id).cloned()
    }

    /// Make subsequent `save_all` calls fail, for fatal-path testing
    pub fn fail_next_saves(&self) {
        self.fail_saves.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl AllocationRepository for InMemoryAllocationRepository {
    async fn find_by_prison_code_and_prisoner_number(
        &self,
        prison_code: &str,
        prisoner_number: &str,
    ) -> RepositoryResult<Vec<Allocation>> {
        let mut found: Vec<Allocation> = self
            .rows
            .read()
            .values()
            .filter(|a| a.prison_code == prison_code && a.prisoner_number == prisoner_number)
            .cloned()
            .collect();
        found.sort_by_key(|a| a.allocation_id);
        Ok(found)
    }

    async fn save_all(&self, allocations: Vec<Allocation>) -> RepositoryResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(RepositoryError::operation(
                "save_all",
                "simulated persistence failure",
            ));
        }

        let mut rows = self.rows.write();
        for allocation in allocations {
            rows.insert(allocation.allocation_id, allocation);
        }
        Ok(())
    }
}

/// Fixed regime reference data
#[derive(Debug, Default)]
pub struct InMemoryPrisonRegimeRepository {
    rows: Vec<PrisonRegime>,
}

impl InMemoryPrisonRegimeRepository {
    pub fn new(rows: Vec<PrisonRegime>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl PrisonRegimeRepository for InMemoryPrisonRegimeRepository {
    async fn find_by_prison_code(&self, prison_code: &str) -> RepositoryResult<Vec<PrisonRegime>> {
        Ok(self
            .rows
            .iter()
            .filter(|r| r.prison_code == prison_code)
            .cloned()
            .collect())
    }
}

/// Fixed priority override reference data
#[derive(Debug, Default)]
pub struct InMemoryEventPriorityRepository {
    rows: Vec<EventPriorityOverride>,
}

impl InMemoryEventPriorityRepository {
    pub fn new(rows: Vec<EventPriorityOverride>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl EventPriorityRepository for InMemoryEventPriorityRepository {
    async fn find_by_prison_code(
        &self,
        prison_code: &str,
    ) -> RepositoryResult<Vec<EventPriorityOverride>> {
        Ok(self
            .rows
            .iter()
            .filter(|o| o.prison_code == prison_code)
            .cloned()
            .collect())
    }
}

/// Build an allocation fixture with the given id and status
pub fn allocation_fixture(
    allocation_id: i64,
    prison_code: &str,
    prisoner_number: &str,
    status: AllocationStatus,
) -> Allocation {
    Allocation {
        allocation_id,
        prisoner_number: prisoner_number.to_string(),
        prison_code: prison_code.to_string(),
        activity_schedule_id: allocation_id * 100,
        status,
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
        end_date: None,
        allocated_by: "MR_BLOGS".to_string(),
        allocated_at: Utc::now(),
    }
}
