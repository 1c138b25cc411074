//! IssueStorage trait implementation for in-memory storage.

use super::{InMemoryStorage, now_after};
use crate::domain::{Issue, IssueId, IssueUpdate, NewIssue};
use crate::error::{Error, Result};
use crate::storage::IssueStorage;
use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

#[async_trait]
impl IssueStorage for InMemoryStorage {
    async fn create(&mut self, new_issue: NewIssue) -> Result<Issue> {
        let id = self.allocate_id();
        let now = Utc::now();

        let issue = Issue {
            id,
            title: new_issue.title,
            description: new_issue.description,
            status: new_issue.status,
            priority: new_issue.priority,
            assignee: new_issue.assignee,
            created_at: now,
            updated_at: now,
        };

        self.issues.insert(id, issue.clone());
        debug!(%id, "Created issue");

        Ok(issue)
    }

    async fn get(&self, id: &IssueId) -> Result<Option<Issue>> {
        Ok(self.issues.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Issue>> {
        Ok(self.issues.values().cloned().collect())
    }

    async fn update(&mut self, id: &IssueId, updates: IssueUpdate) -> Result<Issue> {
        let current = self
            .issues
            .get(id)
            .ok_or(Error::IssueNotFound(*id))?;

        // Build the new version off to the side, then swap it in whole.
        let mut issue = current.clone();
        issue.apply(updates);
        issue.updated_at = now_after(current.updated_at);

        self.issues.insert(*id, issue.clone());
        debug!(%id, "Updated issue");

        Ok(issue)
    }

    async fn delete(&mut self, id: &IssueId) -> Result<bool> {
        let existed = self.issues.remove(id).is_some();
        debug!(%id, existed, "Deleted issue");
        Ok(existed)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.issues.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IssuePriority, IssueStatus};

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let mut storage = InMemoryStorage::new();

        let first = storage.create(NewIssue::new("First")).await.unwrap();
        let second = storage.create(NewIssue::new("Second")).await.unwrap();

        assert_eq!(first.id, IssueId::new(1));
        assert_eq!(second.id, IssueId::new(2));
        assert_eq!(first.created_at, first.updated_at);
    }

    #[tokio::test]
    async fn test_deleted_ids_are_not_reused() {
        let mut storage = InMemoryStorage::new();

        let first = storage.create(NewIssue::new("First")).await.unwrap();
        assert!(storage.delete(&first.id).await.unwrap());

        let second = storage.create(NewIssue::new("Second")).await.unwrap();
        assert_eq!(second.id, IssueId::new(2));
        assert_eq!(storage.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_untouched_fields() {
        let mut storage = InMemoryStorage::new();
        let created = storage
            .create(NewIssue {
                description: Some("Details".to_string()),
                assignee: Some("amy@example.com".to_string()),
                ..NewIssue::new("Original")
            })
            .await
            .unwrap();

        let updated = storage
            .update(
                &created.id,
                IssueUpdate {
                    status: Some(IssueStatus::InProgress),
                    priority: Some(IssuePriority::Urgent),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Original");
        assert_eq!(updated.description.as_deref(), Some("Details"));
        assert_eq!(updated.assignee.as_deref(), Some("amy@example.com"));
        assert_eq!(updated.status, IssueStatus::InProgress);
        assert_eq!(updated.priority, IssuePriority::Urgent);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_issue() {
        let mut storage = InMemoryStorage::new();

        let result = storage
            .update(&IssueId::new(99), IssueUpdate::default())
            .await;

        assert!(matches!(result, Err(Error::IssueNotFound(id)) if id == IssueId::new(99)));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let mut storage = InMemoryStorage::new();
        let created = storage.create(NewIssue::new("Doomed")).await.unwrap();

        assert!(storage.delete(&created.id).await.unwrap());
        assert!(!storage.delete(&created.id).await.unwrap());
        assert!(storage.get(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all_is_in_creation_order() {
        let mut storage = InMemoryStorage::new();
        for title in ["a", "b", "c"] {
            storage.create(NewIssue::new(title)).await.unwrap();
        }

        let titles: Vec<String> = storage
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|issue| issue.title)
            .collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }
}
