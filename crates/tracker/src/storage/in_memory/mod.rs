//! In-memory storage backend.
//!
//! This module provides a fast, **ephemeral** storage implementation where all
//! data is held in RAM and **lost when the process exits**.
//!
//! # Architecture
//!
//! - `BTreeMap<IssueId, Issue>` keeps issues keyed and in creation order
//! - a monotonic counter hands out IDs, so deleted IDs are never reused
//!
//! # Thread Safety
//!
//! The backend itself holds no lock. Share it through
//! [`SharedStorage`](crate::storage::SharedStorage), which serializes writers.

mod trait_impl;

use crate::domain::{Issue, IssueId};
use crate::storage::IssueStorage;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// In-memory issue store.
#[derive(Debug)]
pub struct InMemoryStorage {
    /// Issues indexed by ID
    issues: BTreeMap<IssueId, Issue>,

    /// Next ID to assign. Only ever grows.
    next_id: u64,
}

impl InMemoryStorage {
    /// Create a new empty store whose first issue will get ID 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            issues: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Take the next ID from the counter.
    fn allocate_id(&mut self) -> IssueId {
        let id = IssueId::new(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

/// Current time, never earlier than `previous`.
///
/// Keeps `updated_at` monotonic if the wall clock steps backwards.
fn now_after(previous: DateTime<Utc>) -> DateTime<Utc> {
    Utc::now().max(previous)
}

/// Create a new in-memory storage instance.
///
/// # Example
///
/// ```
/// use tracker::storage::new_in_memory_storage;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let storage = new_in_memory_storage();
///     // Use storage...
/// }
/// ```
#[must_use]
pub fn new_in_memory_storage() -> Box<dyn IssueStorage> {
    Box::new(InMemoryStorage::new())
}
