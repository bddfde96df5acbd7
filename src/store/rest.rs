//! PostgREST client for a hosted (Supabase) database.
//!
//! # Wire Format
//! ```text
//! select_all  GET    {url}/rest/v1/{table}?select=*
//! insert      POST   {url}/rest/v1/{table}             {"id": .., "data": ..}
//! update      PATCH  {url}/rest/v1/{table}?id=eq.{id}  {"data": ..}
//! delete      DELETE {url}/rest/v1/{table}?id=eq.{id}
//! ```
//! Every request carries `apikey` and `Authorization: Bearer` headers.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};
use url::Url;

use crate::records::Row;
use crate::store::{Store, StoreError, StoreResult};

const PREFER: &str = "Prefer";
const RETURN_MINIMAL: &str = "return=minimal";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Store backed by a PostgREST endpoint.
#[derive(Clone)]
pub struct RestStore {
    client: Client,
    /// `{url}/rest/v1/`, always with a trailing slash.
    base: Url,
}

impl RestStore {
    /// Create a client for the project at `url` authenticating with `key`.
    ///
    /// No request is made here; connectivity problems surface on first use.
    pub fn new(url: &str, key: &str) -> StoreResult<Self> {
        let mut root = Url::parse(url)
            .map_err(|e| StoreError::Config(format!("store URL '{}': {}", url, e)))?;
        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }
        let base = root
            .join("rest/v1/")
            .map_err(|e| StoreError::Config(format!("store URL '{}': {}", url, e)))?;

        let mut apikey = HeaderValue::from_str(key)
            .map_err(|_| StoreError::Config("store key is not a valid header value".into()))?;
        apikey.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", key))
            .map_err(|_| StoreError::Config("store key is not a valid header value".into()))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static("apikey"), apikey);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder().default_headers(headers).build()?;

        tracing::info!(endpoint = %base, "REST store client initialized");
        Ok(Self { client, base })
    }

    /// The resolved `/rest/v1/` endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.base
    }

    fn table_url(&self, table: &str) -> StoreResult<Url> {
        self.base
            .join(table)
            .map_err(|e| StoreError::Config(format!("table '{}': {}", table, e)))
    }

    fn row_url(&self, table: &str, id: &str) -> StoreResult<Url> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{}", id));
        Ok(url)
    }
}

impl std::fmt::Debug for RestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestStore")
            .field("endpoint", &self.base.as_str())
            .finish()
    }
}

/// Turn non-2xx responses into [`StoreError::Status`].
async fn error_for_status(response: Response) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Status { status: status.as_u16(), body })
}

/// Number of rows in a `return=representation` payload.
async fn affected_rows(response: Response) -> StoreResult<u64> {
    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        return Ok(0);
    }
    let rows: Vec<Value> =
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Decode(e.to_string()))?;
    Ok(rows.len() as u64)
}

#[async_trait]
impl Store for RestStore {
    async fn select_all(&self, table: &str) -> StoreResult<Vec<Row>> {
        let url = self.table_url(table)?;
        let response = self.client.get(url).query(&[("select", "*")]).send().await?;
        let bytes = error_for_status(response).await?.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn insert(&self, table: &str, row: Row) -> StoreResult<()> {
        let url = self.table_url(table)?;
        let response = self
            .client
            .post(url)
            .header(PREFER, RETURN_MINIMAL)
            .json(&row)
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            return Err(StoreError::DuplicateKey { table: table.to_string(), id: row.id });
        }
        error_for_status(response).await?;
        Ok(())
    }

    async fn update(&self, table: &str, id: &str, data: Value) -> StoreResult<u64> {
        let url = self.row_url(table, id)?;
        let response = self
            .client
            .patch(url)
            .header(PREFER, RETURN_REPRESENTATION)
            .json(&json!({ "data": data }))
            .send()
            .await?;
        affected_rows(error_for_status(response).await?).await
    }

    async fn delete(&self, table: &str, id: &str) -> StoreResult<u64> {
        let url = self.row_url(table, id)?;
        let response = self
            .client
            .delete(url)
            .header(PREFER, RETURN_REPRESENTATION)
            .send()
            .await?;
        affected_rows(error_for_status(response).await?).await
    }
}
