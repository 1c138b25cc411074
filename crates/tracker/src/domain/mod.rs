//! Domain types for issue tracking.
//!
//! This module contains the core domain types for the tracker: the issue
//! record itself, the inputs used to create and patch it, and the query
//! parameters consumed by the list pipeline.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

mod query;

pub use query::{
    AssigneeFilter, DEFAULT_PAGE_SIZE, IssuePage, IssueQuery, MAX_PAGE_SIZE, SortField, SortOrder,
};

/// Unique identifier for an issue.
///
/// Identifiers are assigned sequentially by the store starting at 1 and are
/// never reused, even after the issue they named has been deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueId(pub u64);

impl IssueId {
    /// Create a new issue ID
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for IssueId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Represents an issue in the tracking system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Unique identifier for the issue
    pub id: IssueId,

    /// Issue title
    pub title: String,

    /// Issue description (optional)
    pub description: Option<String>,

    /// Current status
    pub status: IssueStatus,

    /// Priority level
    pub priority: IssuePriority,

    /// Assignee (optional, free-form, usually an email address)
    pub assignee: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    /// Merge the present fields of `update` into this issue.
    ///
    /// Timestamps are left alone; the store owns `updated_at`.
    pub fn apply(&mut self, update: IssueUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(assignee) = update.assignee {
            self.assignee = assignee;
        }
    }

    /// Whether the issue has no assignee (absent or empty).
    #[must_use]
    pub fn is_unassigned(&self) -> bool {
        self.assignee.as_deref().is_none_or(str::is_empty)
    }
}

/// Error returned when parsing a status or priority from text fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field}: '{value}'. Valid values: {valid_values}")]
pub struct ParseEnumError {
    /// The field name that had an invalid value.
    pub field: &'static str,
    /// The invalid value that was provided.
    pub value: String,
    /// Description of valid values.
    pub valid_values: &'static str,
}

/// Status of an issue
///
/// Variants are declared in workflow order, which is also their sort order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    /// Issue is open and ready to work on
    #[default]
    Open,

    /// Issue is currently being worked on
    InProgress,

    /// Issue has been completed
    Closed,
}

impl IssueStatus {
    /// Every status, in sort order.
    pub const ALL: [Self; 3] = [Self::Open, Self::InProgress, Self::Closed];

    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "in_progress" | "in-progress" => Ok(Self::InProgress),
            "closed" => Ok(Self::Closed),
            _ => Err(ParseEnumError {
                field: "status",
                value: s.to_string(),
                valid_values: "open, in_progress, closed",
            }),
        }
    }
}

/// Priority of an issue
///
/// Ordering follows declaration order, so `Low < Medium < High < Urgent`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum IssuePriority {
    /// Can wait
    Low,

    /// Normal priority
    #[default]
    Medium,

    /// Should be picked up soon
    High,

    /// Drop everything
    Urgent,
}

impl IssuePriority {
    /// Every priority, lowest first.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];

    /// Wire name of the priority.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

impl fmt::Display for IssuePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssuePriority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParseEnumError {
                field: "priority",
                value: s.to_string(),
                valid_values: "low, medium, high, urgent",
            }),
        }
    }
}

/// Data for creating a new issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    /// Issue title
    pub title: String,

    /// Issue description (optional)
    pub description: Option<String>,

    /// Initial status
    pub status: IssueStatus,

    /// Initial priority
    pub priority: IssuePriority,

    /// Assignee (optional)
    pub assignee: Option<String>,
}

impl NewIssue {
    /// A new issue with the given title and every other field at its default.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: IssueStatus::default(),
            priority: IssuePriority::default(),
            assignee: None,
        }
    }

    /// Check the issue data before it is handed to a store.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if the title is blank.
    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)
    }
}

/// Data for updating an existing issue
///
/// Only fields that are `Some` are written. The nullable fields use a nested
/// option so that "leave untouched" (`None`) and "clear" (`Some(None)`) stay
/// distinct.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueUpdate {
    /// New title (if updating)
    pub title: Option<String>,

    /// New description (if updating, `Some(None)` to clear)
    pub description: Option<Option<String>>,

    /// New status (if updating)
    pub status: Option<IssueStatus>,

    /// New priority (if updating)
    pub priority: Option<IssuePriority>,

    /// New assignee (if updating, `Some(None)` to clear)
    pub assignee: Option<Option<String>>,
}

impl IssueUpdate {
    /// True when no field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.assignee.is_none()
    }

    /// Check the supplied fields before they are handed to a store.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if a title is supplied and is blank.
    pub fn validate(&self) -> Result<()> {
        match &self.title {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::Validation("title must not be empty".to_string()));
    }
    Ok(())
}
