use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::http::error::ApiError;
use crate::http::records;
use crate::http::server::AppState;
use crate::records::{Collection, Record};

const PROJECT_DELETED: &str = "Projeto deletado";

/// `GET /api/projects`
pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    records::list(&state, Collection::Projects).await
}

/// `POST /api/projects`
pub async fn create_project(
    State(state): State<AppState>,
    Json(project): Json<Record>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    records::create(&state, Collection::Projects, project).await
}

/// `DELETE /api/projects/{id}`
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    records::delete(&state, Collection::Projects, &id, PROJECT_DELETED).await
}
