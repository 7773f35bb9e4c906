//! # rentflow-database
//!
//! PostgreSQL connection management and the [`RecordStore`] implementations
//! used by the ingestion services.
//!
//! [`RecordStore`]: rentflow_core::traits::RecordStore

pub mod connection;
pub mod migration;
pub mod store;

use std::sync::Arc;

use rentflow_core::config::{DatabaseConfig, StoreBackend};
use rentflow_core::error::AppResult;
use rentflow_core::traits::RecordStore;

pub use connection::DatabasePool;
pub use store::memory::MemoryRecordStore;
pub use store::postgres::PgRecordStore;

/// Builds the record store selected by configuration.
///
/// The PostgreSQL backend connects and runs pending migrations first.
pub async fn open_store(config: &DatabaseConfig) -> AppResult<Arc<dyn RecordStore>> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory record store; records are lost on restart");
            Ok(Arc::new(MemoryRecordStore::new()))
        }
        StoreBackend::Postgres => {
            let pool = DatabasePool::connect(config).await?;
            migration::run_migrations(pool.pool()).await?;
            Ok(Arc::new(PgRecordStore::new(pool.into_pool())))
        }
    }
}
