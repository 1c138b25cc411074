//! Storage abstraction layer for the tracker.
//!
//! This module provides the core storage trait and the in-memory backend.
//!
//! # Architecture
//!
//! The storage layer uses an async trait so that a backend doing real I/O
//! could be dropped in behind the same interface. The trait is object-safe,
//! allowing for dynamic dispatch via `Box<dyn IssueStorage>`.
//!
//! Mutating methods take `&mut self` and reads take `&self`. Callers that
//! share one store between tasks wrap it in [`SharedStorage`], whose
//! read/write lock serializes mutations while letting reads run side by side.
//!
//! # Example
//!
//! ```
//! use tracker::domain::{IssueQuery, NewIssue};
//! use tracker::storage::{IssueStorage, new_in_memory_storage};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> tracker::error::Result<()> {
//!     let mut storage = new_in_memory_storage();
//!
//!     let issue = storage.create(NewIssue::new("Implement feature X")).await?;
//!     assert_eq!(issue.id.get(), 1);
//!
//!     let page = storage.query(&IssueQuery::default()).await?;
//!     assert_eq!(page.total, 1);
//!     Ok(())
//! }
//! ```

use crate::domain::{Issue, IssueId, IssuePage, IssueQuery, IssueUpdate, NewIssue};
use crate::error::Result;
use crate::query;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

// Storage backend implementations
pub mod in_memory;

pub use in_memory::{InMemoryStorage, new_in_memory_storage};

/// A store shared between concurrent tasks.
///
/// Writers (create/update/delete) take the write lock and are serialized;
/// readers (get/list/query) take the read lock and may overlap. A reader
/// therefore never sees a half-applied mutation.
pub type SharedStorage = Arc<RwLock<Box<dyn IssueStorage>>>;

/// Wrap a store for sharing between tasks.
#[must_use]
pub fn into_shared(storage: Box<dyn IssueStorage>) -> SharedStorage {
    Arc::new(RwLock::new(storage))
}

/// Core storage trait for issue management.
///
/// This trait defines the interface for all storage backends. Implementations
/// must be `Send + Sync` to support concurrent access in async contexts.
///
/// # Error Handling
///
/// All methods return `Result<T>` so that backends can surface their own
/// failures as `Error::Storage`. The only error the in-memory backend ever
/// produces is `Error::IssueNotFound` from [`IssueStorage::update`].
#[async_trait]
pub trait IssueStorage: Send + Sync {
    // ========== CRUD Operations ==========

    /// Create a new issue.
    ///
    /// Assigns the next sequential ID (starting at 1, never reused) and sets
    /// both timestamps to the current time. Input is expected to have been
    /// validated by the caller.
    async fn create(&mut self, issue: NewIssue) -> Result<Issue>;

    /// Get an issue by ID.
    ///
    /// Returns `None` if the issue doesn't exist.
    async fn get(&self, id: &IssueId) -> Result<Option<Issue>>;

    /// Return every stored issue.
    ///
    /// Order is backend-defined; callers that need an order must impose it.
    async fn list_all(&self) -> Result<Vec<Issue>>;

    /// Update an existing issue.
    ///
    /// Only fields present in `updates` are modified, and `updated_at` is
    /// always refreshed. Returns the updated issue.
    ///
    /// # Errors
    ///
    /// Returns `Error::IssueNotFound` if the issue doesn't exist.
    async fn update(&mut self, id: &IssueId, updates: IssueUpdate) -> Result<Issue>;

    /// Delete an issue.
    ///
    /// Returns whether the issue existed. The ID is not handed out again.
    async fn delete(&mut self, id: &IssueId) -> Result<bool>;

    /// Number of stored issues.
    async fn count(&self) -> Result<usize>;

    // ========== Queries ==========

    /// Run the list pipeline over a snapshot of the store.
    ///
    /// See [`crate::query`] for the stage order and semantics.
    async fn query(&self, query: &IssueQuery) -> Result<IssuePage> {
        let snapshot = self.list_all().await?;
        Ok(query::run(snapshot, query))
    }
}
