//! Field comparators for list sorting.

use crate::domain::{Issue, SortField, SortOrder};
use std::cmp::Ordering;

/// Compare two issues by a single field using the field's natural ordering.
///
/// Optional text orders absent before present.
pub(super) fn compare_by(field: SortField, a: &Issue, b: &Issue) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Title => a.title.cmp(&b.title),
        SortField::Description => a.description.cmp(&b.description),
        SortField::Status => a.status.cmp(&b.status),
        SortField::Priority => a.priority.cmp(&b.priority),
        SortField::Assignee => a.assignee.cmp(&b.assignee),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

/// Stable sort by `field` in the given direction.
///
/// Descending flips the comparison rather than reversing the slice, so issues
/// that compare equal keep their input order in both directions.
pub(super) fn sort_issues(issues: &mut [Issue], field: SortField, order: SortOrder) {
    match order {
        SortOrder::Asc => issues.sort_by(|a, b| compare_by(field, a, b)),
        SortOrder::Desc => issues.sort_by(|a, b| compare_by(field, b, a)),
    }
}
