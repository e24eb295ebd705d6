//! HTTP routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

use issuetrack_domain::{Issue, IssueId, IssuePatch, NewIssue};

use crate::app::App;
use crate::infrastructure::ports::RepoError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/issue", get(list_issues).post(create_issue))
        .route(
            "/api/issue/{id}",
            get(get_issue).put(update_issue).delete(delete_issue),
        )
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Issues
// =============================================================================

async fn list_issues(State(app): State<Arc<App>>) -> Result<Json<Vec<Issue>>, ApiError> {
    Ok(Json(app.issues.list_issues().await?))
}

async fn get_issue(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Issue>, ApiError> {
    Ok(Json(app.issues.get_issue(IssueId::from_uuid(id)).await?))
}

async fn create_issue(
    State(app): State<Arc<App>>,
    Json(issue): Json<NewIssue>,
) -> Result<(StatusCode, Json<Issue>), ApiError> {
    let created = app.issues.create_issue(issue).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_issue(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
    Json(patch): Json<IssuePatch>,
) -> Result<Json<Issue>, ApiError> {
    Ok(Json(
        app.issues
            .update_issue(IssueId::from_uuid(id), patch)
            .await?,
    ))
}

/// 204 whether or not the issue existed.
async fn delete_issue(
    State(app): State<Arc<App>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    app.issues.delete_issue(IssueId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    Unavailable,
    Internal,
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            ApiError::Unavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "Store unavailable").into_response()
            }
            ApiError::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound { .. } => ApiError::NotFound,
            RepoError::StoreUnavailable { .. } => {
                tracing::warn!(error = %e, "Issue store unavailable");
                ApiError::Unavailable
            }
            other => {
                tracing::error!(error = %other, "Issue request failed");
                ApiError::Internal
            }
        }
    }
}
