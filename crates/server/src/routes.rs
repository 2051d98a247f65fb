//! API route definitions

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use issues::domain::{Issue, IssuePatch, IssueRef, NewIssue};
use issues::filter::Filters;
use issues::storage::IssueStore;
use issues::IssueService;

use crate::error::ApiError;
use crate::extract::Body;

/// Shared application state
pub type AppState<S> = Arc<IssueService<S>>;

/// Create API routes
pub fn create_routes<S: IssueStore + 'static>(service: Arc<IssueService<S>>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/issues/:project",
            get(list_issues::<S>)
                .post(create_issue::<S>)
                .put(update_issue::<S>)
                .delete(delete_issue::<S>),
        )
        .with_state(service)
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "issues-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Success payload for update and delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultBody {
    pub result: String,
    #[serde(rename = "_id")]
    pub id: String,
}

impl ResultBody {
    fn new(result: &str, id: String) -> Self {
        Self {
            result: result.to_string(),
            id,
        }
    }
}

/// List a project's issues; every query parameter is a field filter
async fn list_issues<S: IssueStore>(
    Path(project): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
    State(service): State<AppState<S>>,
) -> Json<Vec<Issue>> {
    let filters = Filters::from_pairs(params);
    Json(service.list(&project, &filters))
}

/// Create an issue
async fn create_issue<S: IssueStore>(
    Path(project): Path<String>,
    State(service): State<AppState<S>>,
    Body(new): Body<NewIssue>,
) -> Result<(StatusCode, Json<Issue>), ApiError> {
    let issue = service.create(&project, new)?;
    Ok((StatusCode::CREATED, Json(issue)))
}

/// Update fields of an existing issue
async fn update_issue<S: IssueStore>(
    Path(project): Path<String>,
    State(service): State<AppState<S>>,
    Body(patch): Body<IssuePatch>,
) -> Result<Json<ResultBody>, ApiError> {
    let id = service.update(&project, patch)?;
    Ok(Json(ResultBody::new("successfully updated", id)))
}

/// Delete an issue
async fn delete_issue<S: IssueStore>(
    Path(project): Path<String>,
    State(service): State<AppState<S>>,
    Body(target): Body<IssueRef>,
) -> Result<Json<ResultBody>, ApiError> {
    let id = service.delete(&project, target.target())?;
    Ok(Json(ResultBody::new("successfully deleted", id)))
}
