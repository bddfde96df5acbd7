//! Configuration validation.
//!
//! Serde handles syntax; this module checks values that parse but cannot work
//! (missing store credentials, a zero body limit). All problems are collected
//! and reported together.

use thiserror::Error;
use url::Url;

use crate::config::schema::{ApiConfig, StoreBackend};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("store.url is required for the rest backend (set SUPABASE_URL)")]
    MissingStoreUrl,

    #[error("store.url '{0}' is not a valid http(s) URL")]
    InvalidStoreUrl(String),

    #[error("store.key is required for the rest backend (set SUPABASE_KEY)")]
    MissingStoreKey,

    #[error("limits.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,
}

/// Check a configuration, returning every problem found.
pub fn validate_config(config: &ApiConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.store.backend == StoreBackend::Rest {
        if config.store.url.trim().is_empty() {
            errors.push(ValidationError::MissingStoreUrl);
        } else {
            match Url::parse(&config.store.url) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                _ => errors.push(ValidationError::InvalidStoreUrl(config.store.url.clone())),
            }
        }

        if config.store.key.trim().is_empty() {
            errors.push(ValidationError::MissingStoreKey);
        }
    }

    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
