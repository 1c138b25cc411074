//! HTTP request and response models.
//!
//! Request types mirror the JSON clients send and convert into tracker
//! domain types. Issues and issue pages are serialized straight from the
//! domain types.

use crate::error::ApiError;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;
use tracker::domain::{
    AssigneeFilter, DEFAULT_PAGE_SIZE, IssuePriority, IssueQuery, IssueStatus, IssueUpdate,
    MAX_PAGE_SIZE, NewIssue, SortField, SortOrder,
};

/// Response from `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
}

impl HealthResponse {
    /// The healthy response.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Response from `DELETE /issues/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Status message.
    pub message: String,
}

/// Query parameters for `GET /issues`.
///
/// Enum-valued parameters arrive as raw text and, like the paging bounds,
/// are checked in [`ListParams::into_query`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    /// Zero-based page number.
    pub page: Option<i64>,
    /// Issues per page, 1 to 100.
    pub page_size: Option<i64>,
    /// Case-insensitive title substring.
    pub search: Option<String>,
    /// Status filter.
    pub status: Option<String>,
    /// Priority filter.
    pub priority: Option<String>,
    /// Assignee filter, or `unassigned`.
    pub assignee: Option<String>,
    /// Field to sort by.
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    pub sort_order: Option<String>,
}

impl ListParams {
    /// Validate the parameters and build the pipeline query.
    ///
    /// An unknown `sort_by` is not an error: the results are returned in
    /// store order.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if `page` is negative, `page_size` is
    /// outside 1..=100, or `status`/`priority` is not a known value.
    pub fn into_query(self) -> Result<IssueQuery, ApiError> {
        let page = match self.page {
            None => 0,
            Some(page) => usize::try_from(page).map_err(|_| {
                ApiError::Validation(format!(
                    "page must be greater than or equal to 0, got {page}"
                ))
            })?,
        };

        let page_size = match self.page_size {
            None => DEFAULT_PAGE_SIZE,
            Some(size) => usize::try_from(size)
                .ok()
                .filter(|size| (1..=MAX_PAGE_SIZE).contains(size))
                .ok_or_else(|| {
                    ApiError::Validation(format!(
                        "page_size must be between 1 and {MAX_PAGE_SIZE}, got {size}"
                    ))
                })?,
        };

        let status = self
            .status
            .as_deref()
            .map(str::parse::<IssueStatus>)
            .transpose()?;
        let priority = self
            .priority
            .as_deref()
            .map(str::parse::<IssuePriority>)
            .transpose()?;

        let sort_by = match self.sort_by.as_deref() {
            None => Some(SortField::UpdatedAt),
            Some(name) => {
                let field = SortField::from_name(name);
                if field.is_none() {
                    debug!(sort_by = name, "Unknown sort field, leaving results unsorted");
                }
                field
            }
        };

        let sort_order = self
            .sort_order
            .as_deref()
            .map_or(SortOrder::Desc, SortOrder::from_param);

        Ok(IssueQuery {
            search: self.search.filter(|search| !search.is_empty()),
            status,
            priority,
            assignee: self.assignee.as_deref().and_then(AssigneeFilter::parse),
            sort_by,
            sort_order,
            page,
            page_size,
        })
    }
}

/// Body of `POST /issues`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateIssueRequest {
    /// Issue title (required).
    pub title: String,
    /// Issue description.
    #[serde(default)]
    pub description: Option<String>,
    /// Initial status, `open` if omitted.
    #[serde(default)]
    pub status: Option<IssueStatus>,
    /// Initial priority, `medium` if omitted.
    #[serde(default)]
    pub priority: Option<IssuePriority>,
    /// Assignee.
    #[serde(default)]
    pub assignee: Option<String>,
}

impl From<CreateIssueRequest> for NewIssue {
    fn from(request: CreateIssueRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            status: request.status.unwrap_or_default(),
            priority: request.priority.unwrap_or_default(),
            assignee: request.assignee,
        }
    }
}

/// Body of `PUT /issues/{id}`.
///
/// Absent keys leave a field untouched. For `description` and `assignee` an
/// explicit `null` clears the field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateIssueRequest {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New description, `null` to clear.
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    /// New status.
    #[serde(default)]
    pub status: Option<IssueStatus>,
    /// New priority.
    #[serde(default)]
    pub priority: Option<IssuePriority>,
    /// New assignee, `null` to clear.
    #[serde(default, deserialize_with = "present")]
    pub assignee: Option<Option<String>>,
}

impl From<UpdateIssueRequest> for IssueUpdate {
    fn from(request: UpdateIssueRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            status: request.status,
            priority: request.priority,
            assignee: request.assignee,
        }
    }
}

/// Marks a key that was present in the body, even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
