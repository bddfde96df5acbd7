//! External table store subsystem.
//!
//! # Data Flow
//! ```text
//! http handler
//!     → Store trait (select_all / insert / update / delete)
//!         → rest.rs   (PostgREST over HTTPS, production)
//!         → memory.rs (in-process tables, local runs and tests)
//! ```
//!
//! # Design Decisions
//! - One store call per API request, no retries
//! - The handle is built once at startup and shared as `Arc<dyn Store>`
//! - Update and delete report affected rows; callers decide what zero means

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use crate::config::{StoreBackend, StoreConfig};
use crate::records::Row;

pub mod memory;
pub mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;

/// Errors returned by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request never produced a response (DNS, TLS, connection reset...).
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("store returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered with a payload we could not interpret.
    #[error("unexpected store response: {0}")]
    Decode(String),

    /// A row with this primary key already exists.
    #[error("duplicate key '{id}' in table '{table}'")]
    DuplicateKey { table: String, id: String },

    /// The store could not be set up from the given settings.
    #[error("invalid store configuration: {0}")]
    Config(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// The four table primitives the API needs.
#[async_trait]
pub trait Store: Send + Sync {
    /// Every row of `table`, in whatever order the store returns them.
    async fn select_all(&self, table: &str) -> StoreResult<Vec<Row>>;

    /// Insert a new row.
    async fn insert(&self, table: &str, row: Row) -> StoreResult<()>;

    /// Replace the `data` column of the row keyed `id`. Returns rows affected.
    async fn update(&self, table: &str, id: &str, data: Value) -> StoreResult<u64>;

    /// Delete the row keyed `id`. Returns rows affected.
    async fn delete(&self, table: &str, id: &str) -> StoreResult<u64>;
}

/// Build the configured store.
pub fn from_config(config: &StoreConfig) -> StoreResult<Arc<dyn Store>> {
    match config.backend {
        StoreBackend::Rest => Ok(Arc::new(RestStore::new(&config.url, &config.key)?)),
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
    }
}
