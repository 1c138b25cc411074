//! The list query pipeline.
//!
//! Turns a snapshot of every stored issue into one page of results for an
//! [`IssueQuery`]. The stages always run in the same order:
//!
//! 1. search (title substring, case-insensitive)
//! 2. status
//! 3. priority
//! 4. assignee
//! 5. sort
//! 6. paginate
//!
//! Filtering happens before pagination, so `total` and `total_pages` describe
//! the filtered set rather than the whole store. The four filters are plain
//! conjunctions and commute with each other.
//!
//! The pipeline owns the snapshot it is given and never touches the store.

mod sorting;

use crate::domain::{AssigneeFilter, Issue, IssuePage, IssuePriority, IssueQuery, IssueStatus};
use tracing::debug;

/// Run the full pipeline over `snapshot`.
///
/// # Example
///
/// ```
/// use tracker::domain::{IssueQuery, IssueStatus};
/// use tracker::query;
///
/// let page = query::run(Vec::new(), &IssueQuery {
///     status: Some(IssueStatus::Open),
///     ..Default::default()
/// });
/// assert_eq!(page.total, 0);
/// assert_eq!(page.total_pages, 0);
/// ```
#[must_use]
pub fn run(snapshot: Vec<Issue>, query: &IssueQuery) -> IssuePage {
    let mut issues: Vec<Issue> = snapshot
        .into_iter()
        .filter(|issue| matches(issue, query))
        .collect();

    match query.sort_by {
        Some(field) => sorting::sort_issues(&mut issues, field, query.sort_order),
        None => debug!("No sort field, keeping filtered order"),
    }

    let total = issues.len();
    let start = query.page.saturating_mul(query.page_size);
    let page_issues: Vec<Issue> = issues
        .into_iter()
        .skip(start)
        .take(query.page_size)
        .collect();

    debug!(
        total,
        page = query.page,
        page_size = query.page_size,
        returned = page_issues.len(),
        "Ran issue query"
    );

    IssuePage {
        issues: page_issues,
        total,
        page: query.page,
        page_size: query.page_size,
        total_pages: total_pages(total, query.page_size),
    }
}

/// Whether `issue` passes every filter in `query`.
#[must_use]
pub fn matches(issue: &Issue, query: &IssueQuery) -> bool {
    matches_search(issue, query.search.as_deref())
        && matches_status(issue, query.status)
        && matches_priority(issue, query.priority)
        && matches_assignee(issue, query.assignee.as_ref())
}

/// Title substring filter. `None` and empty text keep every issue.
#[must_use]
pub fn matches_search(issue: &Issue, search: Option<&str>) -> bool {
    match search {
        None | Some("") => true,
        Some(needle) => issue
            .title
            .to_lowercase()
            .contains(&needle.to_lowercase()),
    }
}

/// Exact status filter.
#[must_use]
pub fn matches_status(issue: &Issue, status: Option<IssueStatus>) -> bool {
    status.is_none_or(|status| issue.status == status)
}

/// Exact priority filter.
#[must_use]
pub fn matches_priority(issue: &Issue, priority: Option<IssuePriority>) -> bool {
    priority.is_none_or(|priority| issue.priority == priority)
}

/// Assignee filter.
///
/// [`AssigneeFilter::Matching`] never matches an unassigned issue, and empty
/// matching text keeps every issue.
#[must_use]
pub fn matches_assignee(issue: &Issue, filter: Option<&AssigneeFilter>) -> bool {
    match filter {
        None => true,
        Some(AssigneeFilter::Unassigned) => issue.is_unassigned(),
        Some(AssigneeFilter::Matching(needle)) if needle.is_empty() => true,
        Some(AssigneeFilter::Matching(needle)) => issue
            .assignee
            .as_deref()
            .filter(|assignee| !assignee.is_empty())
            .is_some_and(|assignee| {
                assignee
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
            }),
    }
}

/// Number of pages of `page_size` needed to hold `total` issues.
///
/// A zero page size yields zero pages.
#[must_use]
pub const fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    }
}
