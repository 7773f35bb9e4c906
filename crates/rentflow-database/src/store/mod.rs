//! [`RecordStore`](rentflow_core::traits::RecordStore) implementations.

pub mod memory;
pub mod postgres;

use rentflow_core::traits::Record;
use serde_json::Value;
use uuid::Uuid;

/// Ensures the record carries an `id`, generating a UUIDv7 if needed.
///
/// Returns the id. An existing `id` that is not a UUID string is replaced.
pub(crate) fn assign_id(record: &mut Record) -> Uuid {
    if let Some(id) = record
        .get("id")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
    {
        return id;
    }

    let id = Uuid::now_v7();
    record.insert("id".to_string(), Value::String(id.to_string()));
    id
}
