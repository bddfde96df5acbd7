//! In-process store.
//!
//! Tables are created on first write and keep rows in insertion order.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::records::Row;
use crate::store::{Store, StoreError, StoreResult};

/// A [`Store`] holding all tables in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<HashMap<String, Vec<Row>>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently in `table`.
    pub async fn len(&self, table: &str) -> usize {
        self.tables.read().await.get(table).map_or(0, Vec::len)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn select_all(&self, table: &str) -> StoreResult<Vec<Row>> {
        Ok(self.tables.read().await.get(table).cloned().unwrap_or_default())
    }

    async fn insert(&self, table: &str, row: Row) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let rows = tables.entry(table.to_string()).or_default();
        if rows.iter().any(|existing| existing.id == row.id) {
            return Err(StoreError::DuplicateKey { table: table.to_string(), id: row.id });
        }
        rows.push(row);
        Ok(())
    }

    async fn update(&self, table: &str, id: &str, data: Value) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        let Some(rows) = tables.get_mut(table) else {
            return Ok(0);
        };
        let mut affected = 0;
        for row in rows.iter_mut().filter(|row| row.id == id) {
            row.data = data.clone();
            affected += 1;
        }
        Ok(affected)
    }

    async fn delete(&self, table: &str, id: &str) -> StoreResult<u64> {
        let mut tables = self.tables.write().await;
        let Some(rows) = tables.get_mut(table) else {
            return Ok(0);
        };
        let before = rows.len();
        rows.retain(|row| row.id != id);
        Ok((before - rows.len()) as u64)
    }
}
