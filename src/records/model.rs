//! Record types, the storage row envelope and server-assigned fields.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A lead or project: any JSON object.
pub type Record = Map<String, Value>;

/// Field holding the record identifier.
pub const ID_FIELD: &str = "id";

/// Field stamped on every lead update.
pub const LAST_ACTION_FIELD: &str = "lastActionDate";

/// The two record collections exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Leads,
    Projects,
}

impl Collection {
    /// Store table backing this collection.
    pub fn table(&self) -> &'static str {
        match self {
            Collection::Leads => "leads",
            Collection::Projects => "projects",
        }
    }

    /// Key under which a single record is returned in responses.
    pub fn singular(&self) -> &'static str {
        match self {
            Collection::Leads => "lead",
            Collection::Projects => "project",
        }
    }

    pub fn created_message(&self) -> &'static str {
        match self {
            Collection::Leads => "Lead criado",
            Collection::Projects => "Projeto criado",
        }
    }
}

/// Storage envelope: the primary key plus the whole record, verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    pub data: Value,
}

impl Row {
    /// Wrap a record whose `id` is already assigned.
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: record.get(ID_FIELD).map(row_key).unwrap_or_default(),
            data: Value::Object(record.clone()),
        }
    }
}

/// Render an `id` value as a row key.
///
/// Strings are used as is; anything else becomes its compact JSON text, so a
/// numeric id `42` is stored under the key `"42"`.
pub fn row_key(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A new identifier: Unix epoch milliseconds as a decimal string.
///
/// Two calls within the same millisecond return the same value.
pub fn generate_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// Current UTC instant as RFC 3339 with fixed microsecond precision.
///
/// The fixed width makes later stamps compare greater as plain strings.
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Assign a generated `id` when the record has none, or has `"id": null`.
/// Returns the row key.
pub fn ensure_id(record: &mut Record) -> String {
    let id = record.entry(ID_FIELD).or_insert(Value::Null);
    if id.is_null() {
        *id = Value::String(generate_id());
    }
    row_key(id)
}

/// Overwrite `lastActionDate` with the current time.
pub fn stamp_last_action(record: &mut Record) {
    record.insert(LAST_ACTION_FIELD.to_string(), Value::String(now_iso8601()));
}
