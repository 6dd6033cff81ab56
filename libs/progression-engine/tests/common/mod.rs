//! Common test utilities and fixtures for integration tests.
//!
//! Every test runs against a [`ProgressionEngine`] wired to a fresh
//! in-memory store, with timestamps passed explicitly so period and
//! streak behavior is deterministic.

pub mod fixtures;

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use progression_core::{level_for_points, points_to_next_level, ProgressionPolicy, UserAccount};
use progression_engine::{MemoryStore, ObjectiveStatus, ProgressionEngine};

/// Test context wiring an engine to a fresh in-memory store.
pub struct TestContext {
    pub engine: ProgressionEngine<MemoryStore>,
    pub store: Arc<MemoryStore>,
}

impl TestContext {
    /// Engine over an empty store with the default policy and the
    /// built-in trophy and objective catalogs.
    pub fn new() -> Self {
        Self::with_policy(ProgressionPolicy::default())
    }

    pub fn with_policy(policy: ProgressionPolicy) -> Self {
        let store = Arc::new(MemoryStore::with_default_catalogs());
        let engine = ProgressionEngine::new(store.clone(), policy);
        Self { engine, store }
    }

    /// Register a fresh account and return its id.
    pub fn add_user(&self, name: &str) -> Uuid {
        self.add_user_with_points(name, 0)
    }

    /// Register an account that already holds `total_points`.
    pub fn add_user_with_points(&self, name: &str, total_points: u64) -> Uuid {
        let mut account = UserAccount::new(Uuid::new_v4(), name);
        account.total_points = total_points;
        account.level = level_for_points(total_points, self.engine.policy());
        account.points_to_next_level = points_to_next_level(total_points, self.engine.policy());
        let id = account.id;
        self.store.add_account(account);
        id
    }
}

/// Fixed timestamp for tests that do not care about time.
pub fn now() -> DateTime<Utc> {
    at(5, 10)
}

/// Timestamp on the given March 2024 day and hour.
pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
}

/// Pull one objective's status out of a listing.
pub fn status_by_id(statuses: &[ObjectiveStatus], id: &str) -> ObjectiveStatus {
    statuses
        .iter()
        .find(|s| s.id == id)
        .unwrap_or_else(|| panic!("objective {id} missing from listing"))
        .clone()
}
