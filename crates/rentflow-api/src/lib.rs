//! # rentflow-api
//!
//! HTTP API layer for RentFlow built on Axum.
//!
//! Provides the booking and lead ingestion endpoints, the shared-secret
//! plugin trigger and administration endpoints, health and availability
//! checks, plus error mapping and the server lifecycle.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
