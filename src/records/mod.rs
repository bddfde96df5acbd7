//! Lead and project records.
//!
//! Records are schema-less JSON objects. The server only ever looks at two
//! fields: `id` (the row key) and, for leads, `lastActionDate`.

pub mod model;

pub use model::{
    ensure_id, generate_id, now_iso8601, row_key, stamp_last_action, Collection, Record, Row,
    ID_FIELD, LAST_ACTION_FIELD,
};
