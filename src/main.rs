//! Leads API server.
//!
//! ```text
//!     Client ──▶ axum router ──▶ leads / projects handler ──▶ Store ──▶ PostgREST (Supabase)
//!                    │                                          │
//!                    └── CORS, request ID, tracing, limits      └── or in-memory tables
//! ```
//!
//! Configuration comes from an optional TOML file, then `SUPABASE_URL`,
//! `SUPABASE_KEY` and `PORT`, then the flags below.

use clap::Parser;
use std::path::PathBuf;

use leads_api::config::{self, loader, StoreBackend};
use leads_api::lifecycle;
use leads_api::observability::logging;

#[derive(Parser)]
#[command(name = "leads-api")]
#[command(about = "JSON API for leads and projects backed by a hosted table store", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,

    /// Store backend: rest or memory.
    #[arg(long)]
    store: Option<StoreBackend>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = config::load_config(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.listener.port = port;
    }
    if let Some(backend) = cli.store {
        config.store.backend = backend;
    }
    let config = loader::finalize(config)?;

    logging::init_logging(&config.observability.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address(),
        store = ?config.store,
        "leads-api starting"
    );

    lifecycle::start(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
