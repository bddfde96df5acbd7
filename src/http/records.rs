//! Collection-agnostic record operations shared by the lead and project
//! handlers. Each function issues exactly one store call.

use axum::http::StatusCode;
use axum::Json;
use serde_json::{Map, Value};
use std::future::Future;
use std::time::Instant;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::records::{ensure_id, stamp_last_action, Collection, Record, Row};
use crate::store::StoreResult;

/// Await a store call, recording its outcome and latency.
async fn timed<T, F>(table: &str, operation: &'static str, call: F) -> StoreResult<T>
where
    F: Future<Output = StoreResult<T>>,
{
    let start = Instant::now();
    let result = call.await;
    metrics::record_store_call(table, operation, result.is_ok(), start);
    result
}

/// `{"message": .., "<singular>": record}` response body.
fn envelope(message: &str, key: &str, record: Record) -> Value {
    let mut body = Map::new();
    body.insert("message".to_string(), Value::String(message.to_string()));
    body.insert(key.to_string(), Value::Object(record));
    Value::Object(body)
}

/// Every stored record of `collection`, unwrapped from its row envelope.
pub async fn list(state: &AppState, collection: Collection) -> Result<Json<Vec<Value>>, ApiError> {
    let table = collection.table();
    let rows = timed(table, "select_all", state.store.select_all(table)).await?;

    tracing::debug!(table, count = rows.len(), "Listed records");
    Ok(Json(rows.into_iter().map(|row| row.data).collect()))
}

/// Store a new record, assigning an `id` when the client sent none.
pub async fn create(
    state: &AppState,
    collection: Collection,
    mut record: Record,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let table = collection.table();
    let id = ensure_id(&mut record);
    let row = Row::from_record(&record);

    timed(table, "insert", state.store.insert(table, row)).await?;

    tracing::info!(table, id = %id, "Record created");
    Ok((
        StatusCode::CREATED,
        Json(envelope(collection.created_message(), collection.singular(), record)),
    ))
}

/// Replace the stored record keyed `id`, stamping `lastActionDate`.
///
/// A missing row is not an error: the store affects zero rows and the
/// response is still 200.
pub async fn update(
    state: &AppState,
    collection: Collection,
    id: &str,
    mut record: Record,
    message: &str,
) -> Result<Json<Value>, ApiError> {
    let table = collection.table();
    stamp_last_action(&mut record);

    let affected = timed(
        table,
        "update",
        state.store.update(table, id, Value::Object(record.clone())),
    )
    .await?;

    if affected == 0 {
        tracing::warn!(table, id, "Update matched no rows");
    } else {
        tracing::info!(table, id, "Record updated");
    }
    Ok(Json(envelope(message, collection.singular(), record)))
}

/// Delete the stored record keyed `id`. Missing rows still report success.
pub async fn delete(
    state: &AppState,
    collection: Collection,
    id: &str,
    message: &str,
) -> Result<Json<Value>, ApiError> {
    let table = collection.table();
    let affected = timed(table, "delete", state.store.delete(table, id)).await?;

    if affected == 0 {
        tracing::warn!(table, id, "Delete matched no rows");
    } else {
        tracing::info!(table, id, "Record deleted");
    }

    let mut body = Map::new();
    body.insert("message".to_string(), Value::String(message.to_string()));
    Ok(Json(Value::Object(body)))
}
