//! Query parameters and result page types for listing issues.

use super::{Issue, IssuePriority, IssueStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Page size used when a list request does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Largest page size a list request may ask for.
pub const MAX_PAGE_SIZE: usize = 100;

/// How to filter issues by assignee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssigneeFilter {
    /// Only issues with no assignee (absent or empty).
    Unassigned,

    /// Only issues whose assignee contains this text, ignoring case.
    Matching(String),
}

impl AssigneeFilter {
    /// Interpret a raw assignee parameter.
    ///
    /// Empty text means "no filter" and yields `None`. Any casing of
    /// `unassigned` selects [`AssigneeFilter::Unassigned`].
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            None
        } else if raw.eq_ignore_ascii_case("unassigned") {
            Some(Self::Unassigned)
        } else {
            Some(Self::Matching(raw.to_string()))
        }
    }
}

/// An issue attribute that list results can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    /// Issue identifier
    Id,
    /// Title, lexicographic
    Title,
    /// Description, absent first
    Description,
    /// Status, in workflow order
    Status,
    /// Priority, lowest first
    Priority,
    /// Assignee, absent first
    Assignee,
    /// Creation time
    CreatedAt,
    /// Last update time
    UpdatedAt,
}

impl SortField {
    /// Every sortable field.
    pub const ALL: [Self; 8] = [
        Self::Id,
        Self::Title,
        Self::Description,
        Self::Status,
        Self::Priority,
        Self::Assignee,
        Self::CreatedAt,
        Self::UpdatedAt,
    ];

    /// Look up a field by its attribute name (exact match).
    ///
    /// Returns `None` for names that are not issue attributes.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }

    /// Attribute name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Description => "description",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::Assignee => "assignee",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Smallest first
    Asc,
    /// Largest first
    #[default]
    Desc,
}

impl SortOrder {
    /// Interpret a raw `sort_order` parameter.
    ///
    /// `desc` in any casing is descending; every other value is ascending.
    #[must_use]
    pub fn from_param(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }
}

/// Parameters of a list request.
///
/// The defaults match an unparameterised list request: newest update first,
/// first page of [`DEFAULT_PAGE_SIZE`] issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueQuery {
    /// Case-insensitive title substring
    pub search: Option<String>,

    /// Filter by status
    pub status: Option<IssueStatus>,

    /// Filter by priority
    pub priority: Option<IssuePriority>,

    /// Filter by assignee
    pub assignee: Option<AssigneeFilter>,

    /// Field to sort by; `None` leaves the filtered order untouched
    pub sort_by: Option<SortField>,

    /// Sort direction
    pub sort_order: SortOrder,

    /// Zero-based page number
    pub page: usize,

    /// Issues per page
    pub page_size: usize,
}

impl Default for IssueQuery {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
            priority: None,
            assignee: None,
            sort_by: Some(SortField::UpdatedAt),
            sort_order: SortOrder::Desc,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of list results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuePage {
    /// Issues on this page
    pub issues: Vec<Issue>,

    /// Number of issues that passed the filters, across all pages
    pub total: usize,

    /// Zero-based page number that was requested
    pub page: usize,

    /// Page size that was requested
    pub page_size: usize,

    /// Number of pages needed to hold `total` issues
    pub total_pages: usize,
}
