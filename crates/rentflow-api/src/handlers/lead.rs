//! Lead ingestion handler.

use axum::Json;
use axum::extract::State;

use rentflow_core::records::LeadRequest;
use rentflow_service::LeadCreated;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::state::AppState;

/// POST /api/lead
pub async fn create_lead(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LeadRequest>,
) -> Result<Json<ApiResponse<LeadCreated>>, ApiError> {
    let created = state.leads.create(request).await?;
    Ok(Json(ApiResponse::ok(created)))
}
