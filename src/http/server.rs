//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (CORS, request ID, tracing, body limit, metrics)
//! - Bind server to listener and stop on the shutdown signal

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    response::Html,
    routing::{delete, get, put},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{ApiConfig, LimitsConfig};
use crate::http::leads::{create_lead, list_leads, update_lead};
use crate::http::projects::{create_project, delete_project, list_projects};
use crate::http::request::{make_request_span, request_id_header, track_metrics, UuidRequestId};
use crate::lifecycle::wait_for_shutdown;
use crate::store::Store;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

/// HTTP server for the leads API.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server backed by `store`.
    pub fn new(config: &ApiConfig, store: Arc<dyn Store>) -> Self {
        let router = build_router(AppState::new(store), &config.limits);
        Self { router }
    }

    /// Run the server on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
///
/// `limits.max_body_bytes` replaces axum's built-in 2 MiB extractor limit in
/// both directions.
pub fn build_router(state: AppState, limits: &LimitsConfig) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/leads", get(list_leads).post(create_lead))
        .route("/api/leads/{id}", put(update_lead))
        .route("/api/projects", get(list_projects).post(create_project))
        .route("/api/projects/{id}", delete(delete_project))
        .with_state(state)
        .layer(middleware::from_fn(track_metrics))
        .layer(DefaultBodyLimit::max(limits.max_body_bytes))
        .layer(RequestBodyLimitLayer::new(limits.max_body_bytes))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(PropagateRequestIdLayer::new(request_id_header()))
        .layer(SetRequestIdLayer::new(request_id_header(), UuidRequestId))
        .layer(CorsLayer::permissive())
}

/// `GET /`
async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}
