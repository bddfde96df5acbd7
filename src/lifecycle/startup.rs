//! Startup orchestration.
//!
//! Order: metrics exporter → store client → listener → signal handler →
//! serve. Any failure before serving is fatal.

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ApiConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;
use crate::store::{self, StoreError};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("metrics exporter failed: {0}")]
    Metrics(#[from] BuildError),

    #[error("store setup failed: {0}")]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Start every subsystem and serve until a stop signal arrives.
///
/// `config` must already be validated.
pub async fn start(config: ApiConfig) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address)?;
    }

    let store = store::from_config(&config.store)?;
    tracing::info!(backend = %config.store.backend, "Store ready");

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown);

    HttpServer::new(&config, store).run(listener, server_shutdown).await?;
    Ok(())
}
