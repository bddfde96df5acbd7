//! Shared utilities for integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tower::ServiceExt;

use leads_api::config::ApiConfig;
use leads_api::records::Row;
use leads_api::store::{Store, StoreError, StoreResult};
use leads_api::{HttpServer, Shutdown};

/// Send a request straight into a router and return (status, headers, json).
///
/// Non-JSON bodies come back as a JSON string.
pub async fn send(
    app: &Router,
    method: Method,
    path: &str,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&value).unwrap())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    split(response).await
}

/// Send raw bytes with a JSON content type.
pub async fn send_raw(app: &Router, method: Method, path: &str, raw: &'static str) -> (StatusCode, HeaderMap, Value) {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(raw))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    split(response).await
}

async fn split(response: Response) -> (StatusCode, HeaderMap, Value) {
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, headers, json)
}

/// Run a real server on an ephemeral port. Trigger the returned [`Shutdown`]
/// to stop it.
pub async fn start_server(store: Arc<dyn Store>) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(&ApiConfig::default(), store);

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });
    (addr, shutdown)
}

/// A store whose every call fails.
pub struct FailingStore;

#[async_trait]
impl Store for FailingStore {
    async fn select_all(&self, _table: &str) -> StoreResult<Vec<Row>> {
        Err(unavailable())
    }

    async fn insert(&self, _table: &str, _row: Row) -> StoreResult<()> {
        Err(unavailable())
    }

    async fn update(&self, _table: &str, _id: &str, _data: Value) -> StoreResult<u64> {
        Err(unavailable())
    }

    async fn delete(&self, _table: &str, _id: &str) -> StoreResult<u64> {
        Err(unavailable())
    }
}

fn unavailable() -> StoreError {
    StoreError::Status { status: 503, body: "upstream unavailable".into() }
}

/// One request as seen by the mock PostgREST service.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: Method,
    pub table: String,
    pub query: HashMap<String, String>,
    pub apikey: Option<String>,
    pub authorization: Option<String>,
    pub prefer: Option<String>,
    pub body: Value,
}

/// In-memory stand-in for a PostgREST endpoint under `/rest/v1/{table}`.
#[derive(Clone)]
pub struct MockPostgrest {
    key: &'static str,
    pub tables: Arc<Mutex<HashMap<String, Vec<Value>>>>,
    pub seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl MockPostgrest {
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables.lock().unwrap().get(table).cloned().unwrap_or_default()
    }

    pub fn last_request(&self) -> SeenRequest {
        self.seen.lock().unwrap().last().cloned().expect("no request seen")
    }
}

/// Start a mock PostgREST service accepting `key`.
pub async fn start_mock_postgrest(key: &'static str) -> (SocketAddr, MockPostgrest) {
    let mock = MockPostgrest {
        key,
        tables: Arc::new(Mutex::new(HashMap::new())),
        seen: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route("/rest/v1/{table}", any(postgrest_handler))
        .with_state(mock.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (addr, mock)
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned)
}

async fn postgrest_handler(
    State(mock): State<MockPostgrest>,
    method: Method,
    Path(table): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    mock.seen.lock().unwrap().push(SeenRequest {
        method: method.clone(),
        table: table.clone(),
        query: query.clone(),
        apikey: header(&headers, "apikey"),
        authorization: header(&headers, "authorization"),
        prefer: header(&headers, "prefer"),
        body: body.clone(),
    });

    if header(&headers, "apikey").as_deref() != Some(mock.key) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "Invalid API key"}))).into_response();
    }

    let id_filter = query.get("id").and_then(|f| f.strip_prefix("eq.")).map(str::to_owned);
    let mut tables = mock.tables.lock().unwrap();
    let rows = tables.entry(table).or_default();

    match method {
        Method::GET => Json(rows.clone()).into_response(),
        Method::POST => {
            if rows.iter().any(|row| row["id"] == body["id"]) {
                return (
                    StatusCode::CONFLICT,
                    Json(json!({"code": "23505", "message": "duplicate key value violates unique constraint"})),
                )
                    .into_response();
            }
            rows.push(body);
            StatusCode::CREATED.into_response()
        }
        Method::PATCH => {
            let mut changed = Vec::new();
            for row in rows.iter_mut() {
                if row["id"].as_str() == id_filter.as_deref() {
                    row["data"] = body["data"].clone();
                    changed.push(row.clone());
                }
            }
            Json(changed).into_response()
        }
        Method::DELETE => {
            let (removed, kept): (Vec<Value>, Vec<Value>) = rows
                .drain(..)
                .partition(|row| row["id"].as_str() == id_filter.as_deref());
            *rows = kept;
            Json(removed).into_response()
        }
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}
