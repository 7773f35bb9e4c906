//! Process-local record store backed by `DashMap`.

use async_trait::async_trait;
use dashmap::DashMap;

use rentflow_core::error::AppResult;
use rentflow_core::traits::store::matches_filter;
use rentflow_core::traits::{Record, RecordStore};

use super::assign_id;

/// In-memory record store. Tables are created on first insert.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    tables: DashMap<String, Vec<Record>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in a table.
    pub fn len(&self, table: &str) -> usize {
        self.tables.get(table).map(|t| t.len()).unwrap_or(0)
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert(&self, table: &str, mut record: Record) -> AppResult<Record> {
        assign_id(&mut record);
        self.tables
            .entry(table.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn update(&self, table: &str, filter: &Record, patch: Record) -> AppResult<u64> {
        let Some(mut rows) = self.tables.get_mut(table) else {
            return Ok(0);
        };

        let mut updated = 0;
        for row in rows.iter_mut().filter(|row| matches_filter(row, filter)) {
            for (key, value) in &patch {
                row.insert(key.clone(), value.clone());
            }
            updated += 1;
        }
        Ok(updated)
    }

    async fn query(&self, table: &str, filter: &Record) -> AppResult<Vec<Record>> {
        Ok(self
            .tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| matches_filter(row, filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_id() {
        let store = MemoryRecordStore::new();
        let stored = store
            .insert("leads", record(json!({"name": "Jane"})))
            .await
            .unwrap();

        assert!(stored.get("id").and_then(Value::as_str).is_some());
        assert_eq!(store.len("leads"), 1);
        assert_eq!(store.len("bookings"), 0);
    }

    #[tokio::test]
    async fn test_insert_keeps_existing_uuid() {
        let store = MemoryRecordStore::new();
        let id = "0191e4a0-0000-7000-8000-000000000001";
        let stored = store
            .insert("leads", record(json!({"id": id})))
            .await
            .unwrap();
        assert_eq!(stored["id"], id);
    }

    #[tokio::test]
    async fn test_update_merges_matching_rows() {
        let store = MemoryRecordStore::new();
        store
            .insert("leads", record(json!({"email": "a@x.com", "status": "new"})))
            .await
            .unwrap();
        store
            .insert("leads", record(json!({"email": "b@x.com", "status": "new"})))
            .await
            .unwrap();

        let updated = store
            .update(
                "leads",
                &record(json!({"email": "a@x.com"})),
                record(json!({"status": "contacted"})),
            )
            .await
            .unwrap();
        assert_eq!(updated, 1);

        let contacted = store
            .query("leads", &record(json!({"status": "contacted"})))
            .await
            .unwrap();
        assert_eq!(contacted.len(), 1);
        assert_eq!(contacted[0]["email"], "a@x.com");
    }

    #[tokio::test]
    async fn test_query_unknown_table_is_empty() {
        let store = MemoryRecordStore::new();
        let rows = store.query("nothing", &Record::new()).await.unwrap();
        assert!(rows.is_empty());
        let updated = store
            .update("nothing", &Record::new(), Record::new())
            .await
            .unwrap();
        assert_eq!(updated, 0);
    }

    #[tokio::test]
    async fn test_array_filter_needs_exact_value() {
        let store = MemoryRecordStore::new();
        store
            .insert("bookings", record(json!({"extras": ["gps", "seat"]})))
            .await
            .unwrap();

        let partial = store
            .query("bookings", &record(json!({"extras": ["gps"]})))
            .await
            .unwrap();
        assert!(partial.is_empty());

        let exact = store
            .query("bookings", &record(json!({"extras": ["gps", "seat"]})))
            .await
            .unwrap();
        assert_eq!(exact.len(), 1);
    }
}
