//! Route definitions for the RentFlow HTTP API.
//!
//! All routes are mounted under `/api`. Each route answers an unsupported
//! method with a JSON 405 and unknown paths get a JSON 404.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{MethodRouter, get, patch, post};

use crate::handlers;
use crate::state::AppState;

/// Build the API router and thread `state` through every route.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;

    let api_routes = Router::new()
        .merge(ingestion_routes())
        .merge(plugin_routes())
        .route("/health", only(get(handlers::health::health)));

    Router::new()
        .nest("/api", api_routes)
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Booking, lead and availability endpoints
fn ingestion_routes() -> Router<AppState> {
    Router::new()
        .route("/booking", only(post(handlers::booking::create_booking)))
        .route("/lead", only(post(handlers::lead::create_lead)))
        .route(
            "/availability",
            only(post(handlers::availability::check_availability)),
        )
}

/// Manual hook trigger and plugin administration
fn plugin_routes() -> Router<AppState> {
    Router::new()
        .route("/plugin", only(post(handlers::plugin::trigger)))
        .route("/plugins", only(get(handlers::plugin::list_plugins)))
        .route(
            "/plugins/{name}/activate",
            only(post(handlers::plugin::activate)),
        )
        .route(
            "/plugins/{name}/deactivate",
            only(post(handlers::plugin::deactivate)),
        )
        .route(
            "/plugins/{name}/config",
            only(patch(handlers::plugin::update_config)),
        )
}

fn only(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.fallback(handlers::method_not_allowed)
}
