//! `RestStore` against a mock PostgREST service.

use axum::http::{Method, StatusCode};
use serde_json::json;
use std::sync::Arc;

use leads_api::config::LimitsConfig;
use leads_api::http::{build_router, AppState};
use leads_api::records::Row;
use leads_api::store::{RestStore, Store, StoreError};

mod common;

const KEY: &str = "service-role-test-key";

async fn connect() -> (RestStore, common::MockPostgrest) {
    let (addr, mock) = common::start_mock_postgrest(KEY).await;
    let store = RestStore::new(&format!("http://{}", addr), KEY).unwrap();
    (store, mock)
}

#[tokio::test]
async fn test_insert_and_select() {
    let (store, mock) = connect().await;

    store
        .insert("leads", Row { id: "1".into(), data: json!({"id": "1", "name": "Acme"}) })
        .await
        .unwrap();

    let seen = mock.last_request();
    assert_eq!(seen.method, Method::POST);
    assert_eq!(seen.table, "leads");
    assert_eq!(seen.body, json!({"id": "1", "data": {"id": "1", "name": "Acme"}}));
    assert_eq!(seen.apikey.as_deref(), Some(KEY));
    assert_eq!(seen.authorization, Some(format!("Bearer {}", KEY)));
    assert_eq!(seen.prefer.as_deref(), Some("return=minimal"));

    let rows = store.select_all("leads").await.unwrap();
    assert_eq!(rows, vec![Row { id: "1".into(), data: json!({"id": "1", "name": "Acme"}) }]);
    assert_eq!(mock.last_request().query.get("select").map(String::as_str), Some("*"));
}

#[tokio::test]
async fn test_update_filters_by_id() {
    let (store, mock) = connect().await;
    store.insert("leads", Row { id: "7".into(), data: json!({"id": "7"}) }).await.unwrap();

    let affected = store.update("leads", "7", json!({"id": "7", "stage": "won"})).await.unwrap();
    assert_eq!(affected, 1);

    let seen = mock.last_request();
    assert_eq!(seen.method, Method::PATCH);
    assert_eq!(seen.query.get("id").map(String::as_str), Some("eq.7"));
    assert_eq!(seen.body, json!({"data": {"id": "7", "stage": "won"}}));
    assert_eq!(seen.prefer.as_deref(), Some("return=representation"));
    assert_eq!(mock.rows("leads")[0]["data"]["stage"], "won");

    assert_eq!(store.update("leads", "missing", json!({})).await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_reports_affected_rows() {
    let (store, mock) = connect().await;
    store.insert("projects", Row { id: "p1".into(), data: json!({"id": "p1"}) }).await.unwrap();

    assert_eq!(store.delete("projects", "p1").await.unwrap(), 1);
    assert_eq!(mock.last_request().method, Method::DELETE);
    assert!(mock.rows("projects").is_empty());

    assert_eq!(store.delete("projects", "p1").await.unwrap(), 0);
}

#[tokio::test]
async fn test_conflict_maps_to_duplicate_key() {
    let (store, _) = connect().await;
    let row = Row { id: "dup".into(), data: json!({"id": "dup"}) };

    store.insert("leads", row.clone()).await.unwrap();
    let err = store.insert("leads", row).await.unwrap_err();
    assert!(matches!(err, StoreError::DuplicateKey { ref id, .. } if id == "dup"));
}

#[tokio::test]
async fn test_wrong_key_is_status_error() {
    let (addr, _) = common::start_mock_postgrest(KEY).await;
    let store = RestStore::new(&format!("http://{}", addr), "wrong-key").unwrap();

    let err = store.select_all("leads").await.unwrap_err();
    match err {
        StoreError::Status { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid API key"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_store_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store = RestStore::new(&format!("http://{}", addr), KEY).unwrap();
    let err = store.select_all("leads").await.unwrap_err();
    assert!(matches!(err, StoreError::Transport(_)));
}

#[tokio::test]
async fn test_api_over_rest_store() {
    let (store, mock) = connect().await;
    let app = build_router(AppState::new(Arc::new(store)), &LimitsConfig::default());

    let (status, _, created) =
        common::send(&app, Method::POST, "/api/leads", Some(json!({"name": "Acme"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["lead"]["id"].as_str().unwrap().to_string();

    let stored = mock.rows("leads");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["id"], json!(id));
    assert_eq!(stored[0]["data"], created["lead"]);

    let (status, _, leads) = common::send(&app, Method::GET, "/api/leads", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(leads, json!([created["lead"].clone()]));

    let (status, _, updated) = common::send(
        &app,
        Method::PUT,
        &format!("/api/leads/{}", id),
        Some(json!({"name": "Acme Corp", "id": id})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mock.rows("leads")[0]["data"], updated["lead"]);
}
