//! Plugin trigger and administration handlers.
//!
//! Every mutating endpoint carries the shared `apiKey` in its JSON body.
//! An empty configured key disables these endpoints.

use axum::Json;
use axum::extract::{Path, State};
use tracing::{info, warn};

use rentflow_core::error::{AppError, AppResult};
use rentflow_plugin::{HookPayload, HookPoint, PluginState};

use crate::dto::request::{ApiKeyRequest, PluginConfigRequest, TriggerRequest};
use crate::dto::response::{
    ApiResponse, PluginConfigResponse, PluginStateResponse, PluginsResponse, TriggerResponse,
};
use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::state::AppState;

fn authorize(state: &AppState, api_key: &str) -> AppResult<()> {
    let expected = &state.config.plugins.api_key;
    if expected.is_empty() || api_key != expected {
        warn!("Plugin endpoint called with invalid API key");
        return Err(AppError::authentication("Invalid API key"));
    }
    Ok(())
}

/// POST /api/plugin
pub async fn trigger(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TriggerRequest>,
) -> Result<Json<ApiResponse<TriggerResponse>>, ApiError> {
    authorize(&state, &request.api_key)?;

    let hook: HookPoint = request.hook.parse()?;
    let payload = HookPayload::from_json(hook, request.data)?;

    info!(hook = %hook, "Manual hook trigger");
    let results = state.plugins.trigger(hook.as_str(), &payload).await;

    Ok(Json(ApiResponse::ok(TriggerResponse {
        hook: hook.to_string(),
        results,
    })))
}

/// GET /api/plugins
pub async fn list_plugins(State(state): State<AppState>) -> Json<ApiResponse<PluginsResponse>> {
    Json(ApiResponse::ok(PluginsResponse {
        registered: state.plugins.plugin_infos().await,
        active: state.plugins.active_plugins().await,
    }))
}

/// POST /api/plugins/{name}/activate
pub async fn activate(
    State(state): State<AppState>,
    Path(name): Path<String>,
    ApiJson(request): ApiJson<ApiKeyRequest>,
) -> Result<Json<ApiResponse<PluginStateResponse>>, ApiError> {
    authorize(&state, &request.api_key)?;
    state.plugins.activate(&name).await?;

    Ok(Json(ApiResponse::ok(PluginStateResponse {
        plugin: name,
        state: PluginState::Active,
    })))
}

/// POST /api/plugins/{name}/deactivate
pub async fn deactivate(
    State(state): State<AppState>,
    Path(name): Path<String>,
    ApiJson(request): ApiJson<ApiKeyRequest>,
) -> Result<Json<ApiResponse<PluginStateResponse>>, ApiError> {
    authorize(&state, &request.api_key)?;
    state.plugins.deactivate(&name).await?;

    Ok(Json(ApiResponse::ok(PluginStateResponse {
        plugin: name,
        state: PluginState::Inactive,
    })))
}

/// PATCH /api/plugins/{name}/config
pub async fn update_config(
    State(state): State<AppState>,
    Path(name): Path<String>,
    ApiJson(request): ApiJson<PluginConfigRequest>,
) -> Result<Json<ApiResponse<PluginConfigResponse>>, ApiError> {
    authorize(&state, &request.api_key)?;
    let config = state
        .plugins
        .update_plugin_config(&name, request.config)
        .await?;

    Ok(Json(ApiResponse::ok(PluginConfigResponse {
        plugin: name,
        config,
    })))
}
