//! JSON API for lead and project records stored in a hosted table store.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod records;
pub mod store;

pub use config::ApiConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::{MemoryStore, RestStore, Store};
