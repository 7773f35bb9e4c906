//! HTTP handlers, one module per endpoint group.

pub mod availability;
pub mod booking;
pub mod health;
pub mod lead;
pub mod plugin;

use axum::http::{Method, Uri};

use rentflow_core::error::AppError;

use crate::error::ApiError;

/// Fallback for a known path called with an unsupported method.
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    AppError::method_not_allowed(format!("Method {method} not allowed on {}", uri.path())).into()
}

/// Fallback for unknown paths.
pub async fn not_found(uri: Uri) -> ApiError {
    AppError::not_found(format!("No route for {}", uri.path())).into()
}
