//! Error responses for the REST API.
//!
//! Validation failures from the issue service are answered with HTTP 200 and
//! an `error` field, which is the contract existing clients depend on. Only a
//! body that cannot be parsed at all gets a 4xx.

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use issues::IssueError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON error payload: `{"error": ..., "_id": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Issue(#[from] IssueError),
    /// Request body was not valid JSON / form data for the operation
    #[error("{0}")]
    InvalidBody(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Issue(err) => {
                tracing::debug!("Rejected request: {}", err);
                let body = ErrorBody {
                    error: err.to_string(),
                    id: err.id().map(str::to_string),
                };
                (StatusCode::OK, Json(body)).into_response()
            }
            ApiError::InvalidBody(reason) => {
                tracing::warn!("Unreadable request body: {}", reason);
                let body = ErrorBody {
                    error: reason,
                    id: None,
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
        }
    }
}
