//! Record store trait.
//!
//! The store is schemaless: a record is a JSON object and a table is a
//! name. Filters are equality matches on top-level keys.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

/// A stored record.
pub type Record = Map<String, Value>;

/// Persistence collaborator used by the ingestion services.
#[async_trait]
pub trait RecordStore: Send + Sync + std::fmt::Debug + 'static {
    /// Inserts a record and returns it with its assigned `id`.
    ///
    /// A record that already carries an `id` keeps it.
    async fn insert(&self, table: &str, record: Record) -> AppResult<Record>;

    /// Shallow-merges `patch` into every record matching `filter`.
    /// Returns the number of records updated.
    async fn update(&self, table: &str, filter: &Record, patch: Record) -> AppResult<u64>;

    /// Returns all records matching `filter`, oldest first.
    async fn query(&self, table: &str, filter: &Record) -> AppResult<Vec<Record>>;
}

/// Returns whether `record` has every key/value pair in `filter`.
pub fn matches_filter(record: &Record, filter: &Record) -> bool {
    filter
        .iter()
        .all(|(key, expected)| record.get(key) == Some(expected))
}

/// Serializes `value`, inserts it, and decodes the stored record back.
pub async fn insert_typed<T>(store: &dyn RecordStore, table: &str, value: &T) -> AppResult<T>
where
    T: Serialize + DeserializeOwned + Sync,
{
    let record = match serde_json::to_value(value)? {
        Value::Object(map) => map,
        other => {
            return Err(AppError::internal(format!(
                "Record for '{table}' must serialize to an object, got {other}"
            )));
        }
    };

    let stored = store.insert(table, record).await?;
    Ok(serde_json::from_value(Value::Object(stored))?)
}
