//! Integration tests for in-memory storage.
//!
//! These tests verify CRUD behavior of the in-memory backend and the list
//! query run against it, using the sample issues as a fixture.

use rstest::rstest;
use tracker::domain::{
    AssigneeFilter, IssueId, IssuePriority, IssueQuery, IssueStatus, IssueUpdate, NewIssue,
    SortField, SortOrder,
};
use tracker::seed::seed_sample_data;
use tracker::storage::{IssueStorage, into_shared, new_in_memory_storage};

async fn seeded_storage() -> Box<dyn IssueStorage> {
    let mut storage = new_in_memory_storage();
    seed_sample_data(storage.as_mut()).await.unwrap();
    storage
}

fn titles(page: &tracker::domain::IssuePage) -> Vec<&str> {
    page.issues.iter().map(|issue| issue.title.as_str()).collect()
}

// ========== Basic CRUD Tests ==========

#[tokio::test]
async fn test_create_issue() {
    let mut storage = new_in_memory_storage();

    let issue = storage
        .create(NewIssue {
            assignee: Some("amy@example.com".to_string()),
            ..NewIssue::new("Test Issue")
        })
        .await
        .unwrap();

    assert_eq!(issue.id, IssueId::new(1));
    assert_eq!(issue.title, "Test Issue");
    assert_eq!(issue.status, IssueStatus::Open);
    assert_eq!(issue.priority, IssuePriority::Medium);
    assert_eq!(issue.assignee.as_deref(), Some("amy@example.com"));
    assert_eq!(issue.created_at, issue.updated_at);
}

#[tokio::test]
async fn test_get_issue() {
    let storage = seeded_storage().await;

    let retrieved = storage.get(&IssueId::new(2)).await.unwrap();
    assert_eq!(retrieved.unwrap().title, "Add user registration");

    let non_existing = storage.get(&IssueId::new(42)).await.unwrap();
    assert!(non_existing.is_none());
}

#[tokio::test]
async fn test_update_issue() {
    let mut storage = seeded_storage().await;
    let before = storage.get(&IssueId::new(1)).await.unwrap().unwrap();

    let updates = IssueUpdate {
        title: Some("Updated Title".to_string()),
        description: Some(None),
        status: Some(IssueStatus::Closed),
        ..Default::default()
    };

    let updated = storage.update(&IssueId::new(1), updates).await.unwrap();
    assert_eq!(updated.title, "Updated Title");
    assert_eq!(updated.status, IssueStatus::Closed);
    assert!(updated.description.is_none());
    assert_eq!(updated.priority, IssuePriority::High);
    assert_eq!(updated.assignee.as_deref(), Some("john@example.com"));
    assert!(updated.updated_at >= before.updated_at);

    // Mutation is visible to the next read
    let reread = storage.get(&IssueId::new(1)).await.unwrap().unwrap();
    assert_eq!(reread, updated);
}

#[tokio::test]
async fn test_empty_update_still_refreshes_timestamp() {
    let mut storage = seeded_storage().await;
    let before = storage.get(&IssueId::new(3)).await.unwrap().unwrap();

    let after = storage
        .update(&IssueId::new(3), IssueUpdate::default())
        .await
        .unwrap();

    assert_eq!(after.title, before.title);
    assert!(after.updated_at >= before.updated_at);
}

#[tokio::test]
async fn test_delete_issue() {
    let mut storage = seeded_storage().await;

    assert!(storage.delete(&IssueId::new(2)).await.unwrap());
    assert!(storage.get(&IssueId::new(2)).await.unwrap().is_none());
    assert_eq!(storage.count().await.unwrap(), 2);

    // Second delete reports absence
    assert!(!storage.delete(&IssueId::new(2)).await.unwrap());
}

#[tokio::test]
async fn test_ids_not_reused_after_delete() {
    let mut storage = seeded_storage().await;

    storage.delete(&IssueId::new(3)).await.unwrap();
    let created = storage.create(NewIssue::new("After delete")).await.unwrap();

    assert_eq!(created.id, IssueId::new(4));
}

// ========== Query Tests ==========

#[tokio::test]
async fn test_search_fix_finds_login_bug() {
    let storage = seeded_storage().await;

    let page = storage
        .query(&IssueQuery {
            search: Some("fix".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(titles(&page), vec!["Fix login page bug"]);
    assert_eq!(page.total, 1);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn test_open_issues_by_priority_desc() {
    let storage = seeded_storage().await;

    let page = storage
        .query(&IssueQuery {
            status: Some(IssueStatus::Open),
            sort_by: Some(SortField::Priority),
            sort_order: SortOrder::Desc,
            ..Default::default()
        })
        .await
        .unwrap();

    let priorities: Vec<IssuePriority> = page.issues.iter().map(|issue| issue.priority).collect();
    assert_eq!(priorities, vec![IssuePriority::High, IssuePriority::Low]);
    assert_eq!(page.total, 2);
}

#[tokio::test]
async fn test_unassigned_filter_with_everyone_assigned() {
    let storage = seeded_storage().await;

    let page = storage
        .query(&IssueQuery {
            assignee: AssigneeFilter::parse("unassigned"),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(page.issues.is_empty());
    assert_eq!(page.total, 0);
    assert_eq!(page.total_pages, 0);
}

#[tokio::test]
async fn test_unassigned_filter_finds_cleared_assignee() {
    let mut storage = seeded_storage().await;
    storage
        .update(
            &IssueId::new(2),
            IssueUpdate {
                assignee: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    storage
        .create(NewIssue {
            assignee: Some(String::new()),
            ..NewIssue::new("Empty assignee")
        })
        .await
        .unwrap();

    let page = storage
        .query(&IssueQuery {
            assignee: Some(AssigneeFilter::Unassigned),
            sort_by: Some(SortField::Id),
            sort_order: SortOrder::Asc,
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(titles(&page), vec!["Add user registration", "Empty assignee"]);
}

#[rstest]
#[case("john", vec!["Fix login page bug"])]
#[case("EXAMPLE.COM", vec!["Fix login page bug", "Add user registration", "Update documentation"])]
#[case("nobody", vec![])]
#[tokio::test]
async fn test_assignee_substring_filter(#[case] needle: &str, #[case] expected: Vec<&str>) {
    let storage = seeded_storage().await;

    let page = storage
        .query(&IssueQuery {
            assignee: AssigneeFilter::parse(needle),
            sort_by: Some(SortField::Id),
            sort_order: SortOrder::Asc,
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(titles(&page), expected);
}

#[rstest]
#[case(0, 2, vec![1, 2])]
#[case(1, 2, vec![3])]
#[case(2, 2, vec![])]
#[case(0, 10, vec![1, 2, 3])]
#[tokio::test]
async fn test_pagination_windows(
    #[case] page: usize,
    #[case] page_size: usize,
    #[case] expected: Vec<u64>,
) {
    let storage = seeded_storage().await;

    let result = storage
        .query(&IssueQuery {
            sort_by: Some(SortField::Id),
            sort_order: SortOrder::Asc,
            page,
            page_size,
            ..Default::default()
        })
        .await
        .unwrap();

    let ids: Vec<u64> = result.issues.iter().map(|issue| issue.id.get()).collect();
    assert_eq!(ids, expected);
    assert_eq!(result.total, 3);
    assert_eq!(result.total_pages, 3usize.div_ceil(page_size));
}

#[tokio::test]
async fn test_twenty_five_issues_make_three_pages() {
    let mut storage = new_in_memory_storage();
    for n in 0..25 {
        storage
            .create(NewIssue::new(format!("Issue {n}")))
            .await
            .unwrap();
    }

    let page = storage
        .query(&IssueQuery {
            page: 2,
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(page.total, 25);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.issues.len(), 5);
}

#[tokio::test]
async fn test_recently_updated_issue_comes_first_by_default() {
    let mut storage = seeded_storage().await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    storage
        .update(
            &IssueId::new(1),
            IssueUpdate {
                priority: Some(IssuePriority::Urgent),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let page = storage.query(&IssueQuery::default()).await.unwrap();
    assert_eq!(page.issues[0].id, IssueId::new(1));
}

// ========== Shared Storage Tests ==========

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_get_distinct_ids() {
    let shared = into_shared(new_in_memory_storage());

    let mut handles = Vec::new();
    for n in 0..50 {
        let shared = shared.clone();
        handles.push(tokio::spawn(async move {
            let mut storage = shared.write().await;
            storage
                .create(NewIssue::new(format!("Concurrent {n}")))
                .await
                .unwrap()
                .id
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort();
    ids.dedup();

    assert_eq!(ids.len(), 50);
    assert_eq!(shared.read().await.count().await.unwrap(), 50);
}
