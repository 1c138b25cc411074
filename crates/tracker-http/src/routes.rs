//! Route handlers for the issue API.
//!
//! Extractor rejections are taken as `Result` so that malformed paths,
//! queries, and bodies come back in the same `{"detail": ...}` shape as
//! every other error.

use crate::error::ApiError;
use crate::models::{
    CreateIssueRequest, HealthResponse, ListParams, MessageResponse, UpdateIssueRequest,
};
use axum::Router;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Json, Path, Query, State};
use axum::routing::get;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use tracker::domain::{Issue, IssueId, IssuePage, IssueUpdate, NewIssue};
use tracker::storage::SharedStorage;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// The issue store.
    pub storage: SharedStorage,
}

impl AppState {
    /// Create handler state over a shared store.
    #[must_use]
    pub fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }
}

/// Build the API router.
///
/// CORS is layered on by [`crate::TrackerServer`] since it depends on
/// configuration.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/issues", get(list_issues).post(create_issue))
        .route(
            "/issues/:id",
            get(get_issue).put(update_issue).delete(delete_issue),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

async fn list_issues(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<IssuePage>, ApiError> {
    let Query(params) = params?;
    let query = params.into_query()?;

    let storage = state.storage.read().await;
    let page = storage.query(&query).await?;
    debug!(
        total = page.total,
        page = page.page,
        returned = page.issues.len(),
        "Listed issues"
    );

    Ok(Json(page))
}

async fn get_issue(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Issue>, ApiError> {
    let Path(id) = id?;

    let storage = state.storage.read().await;
    storage
        .get(&IssueId::new(id))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn create_issue(
    State(state): State<AppState>,
    body: Result<Json<CreateIssueRequest>, JsonRejection>,
) -> Result<Json<Issue>, ApiError> {
    let Json(request) = body?;
    let new_issue = NewIssue::from(request);
    new_issue.validate()?;

    let issue = state.storage.write().await.create(new_issue).await?;
    info!(id = %issue.id, title = %issue.title, "Created issue");

    Ok(Json(issue))
}

async fn update_issue(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    body: Result<Json<UpdateIssueRequest>, JsonRejection>,
) -> Result<Json<Issue>, ApiError> {
    let Path(id) = id?;
    let Json(request) = body?;
    let updates = IssueUpdate::from(request);
    updates.validate()?;

    let issue = state
        .storage
        .write()
        .await
        .update(&IssueId::new(id), updates)
        .await?;
    info!(id = %issue.id, "Updated issue");

    Ok(Json(issue))
}

async fn delete_issue(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    let id = IssueId::new(id);

    if !state.storage.write().await.delete(&id).await? {
        return Err(ApiError::NotFound);
    }
    info!(%id, "Deleted issue");

    Ok(Json(MessageResponse {
        message: "Issue deleted successfully".to_string(),
    }))
}
