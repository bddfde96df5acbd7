//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (ApiConfig::default)
//!     → loader.rs (optional TOML file)
//!     → loader.rs (SUPABASE_URL / SUPABASE_KEY / PORT overrides)
//!     → command-line overrides (main.rs)
//!     → validation.rs (semantic checks)
//!     → ApiConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::ApiConfig;
pub use schema::{LimitsConfig, ListenerConfig, ObservabilityConfig, StoreBackend, StoreConfig};
