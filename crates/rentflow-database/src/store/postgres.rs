//! PostgreSQL record store. Every table shares the `records` relation;
//! records are JSONB documents and each filter key is compared with JSONB
//! equality on `data -> key`, the same top-level match the memory store
//! applies.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, Postgres, QueryBuilder};
use sqlx::types::Json;

use rentflow_core::error::{AppError, AppResult, ErrorKind};
use rentflow_core::traits::{Record, RecordStore};

use super::assign_id;

/// Record store backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn insert(&self, table: &str, mut record: Record) -> AppResult<Record> {
        let id = assign_id(&mut record);

        sqlx::query("INSERT INTO records (id, table_name, data) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(table)
            .bind(Json(Value::Object(record.clone())))
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to insert into '{table}': {e}"),
                    e,
                )
            })?;

        Ok(record)
    }

    async fn update(&self, table: &str, filter: &Record, patch: Record) -> AppResult<u64> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE records SET data = data || ");
        builder.push_bind(Json(Value::Object(patch)));
        builder.push(" WHERE table_name = ");
        builder.push_bind(table.to_string());
        push_filter(&mut builder, filter);

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to update '{table}': {e}"),
                    e,
                )
            })?;

        Ok(result.rows_affected())
    }

    async fn query(&self, table: &str, filter: &Record) -> AppResult<Vec<Record>> {
        let mut builder = select_query(table, filter);
        let rows: Vec<Json<Value>> = builder
            .build_query_scalar()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to query '{table}': {e}"),
                    e,
                )
            })?;

        Ok(rows
            .into_iter()
            .filter_map(|Json(value)| match value {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect())
    }
}

fn select_query(table: &str, filter: &Record) -> QueryBuilder<'static, Postgres> {
    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new("SELECT data FROM records WHERE table_name = ");
    builder.push_bind(table.to_string());
    push_filter(&mut builder, filter);
    builder.push(" ORDER BY created_at");
    builder
}

/// Appends `AND data -> key = value` per filter key.
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &Record) {
    for (key, value) in filter {
        builder.push(" AND data -> ");
        builder.push_bind(key.clone());
        builder.push(" = ");
        builder.push_bind(Json(value.clone()));
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_select_compares_each_key() {
        let filter = json!({"extras": ["gps"], "status": "new"});
        let filter = filter.as_object().cloned().unwrap();

        let builder = select_query("bookings", &filter);
        assert_eq!(
            builder.sql(),
            "SELECT data FROM records WHERE table_name = $1 \
             AND data -> $2 = $3 AND data -> $4 = $5 ORDER BY created_at"
        );
    }

    #[test]
    fn test_empty_filter_selects_whole_table() {
        let builder = select_query("leads", &Record::new());
        assert_eq!(
            builder.sql(),
            "SELECT data FROM records WHERE table_name = $1 ORDER BY created_at"
        );
    }
}
