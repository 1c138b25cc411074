//! Sample issues loaded into a fresh store.
//!
//! The server seeds these at startup unless told not to, and tests use them
//! as a known fixture.

use crate::domain::{Issue, IssuePriority, IssueStatus, NewIssue};
use crate::error::Result;
use crate::storage::IssueStorage;

/// The sample issues, in creation order.
#[must_use]
pub fn sample_issues() -> Vec<NewIssue> {
    vec![
        NewIssue {
            title: "Fix login page bug".to_string(),
            description: Some("Users cannot login with correct credentials".to_string()),
            status: IssueStatus::Open,
            priority: IssuePriority::High,
            assignee: Some("john@example.com".to_string()),
        },
        NewIssue {
            title: "Add user registration".to_string(),
            description: Some("Implement user registration functionality".to_string()),
            status: IssueStatus::InProgress,
            priority: IssuePriority::Medium,
            assignee: Some("sarah@example.com".to_string()),
        },
        NewIssue {
            title: "Update documentation".to_string(),
            description: Some("Update API documentation for new endpoints".to_string()),
            status: IssueStatus::Open,
            priority: IssuePriority::Low,
            assignee: Some("mike@example.com".to_string()),
        },
    ]
}

/// Create every sample issue in `storage`, returning the stored records.
///
/// # Errors
///
/// Propagates any error from [`IssueStorage::create`].
pub async fn seed_sample_data(storage: &mut dyn IssueStorage) -> Result<Vec<Issue>> {
    let mut created = Vec::new();
    for issue in sample_issues() {
        created.push(storage.create(issue).await?);
    }
    tracing::info!(count = created.len(), "Seeded sample issues");
    Ok(created)
}
