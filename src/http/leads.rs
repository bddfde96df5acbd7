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

const LEAD_UPDATED: &str = "Lead atualizado";

/// `GET /api/leads`
pub async fn list_leads(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    records::list(&state, Collection::Leads).await
}

/// `POST /api/leads`
pub async fn create_lead(
    State(state): State<AppState>,
    Json(lead): Json<Record>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    records::create(&state, Collection::Leads, lead).await
}

/// `PUT /api/leads/{id}`
pub async fn update_lead(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(lead): Json<Record>,
) -> Result<Json<Value>, ApiError> {
    records::update(&state, Collection::Leads, &id, lead, LEAD_UPDATED).await
}
