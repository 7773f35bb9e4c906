//! Vehicle availability handler.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use rentflow_core::error::AppError;

use crate::dto::request::AvailabilityRequest;
use crate::dto::response::{ApiResponse, AvailabilityResponse};
use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::state::AppState;

/// POST /api/availability
pub async fn check_availability(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AvailabilityRequest>,
) -> Result<Json<ApiResponse<AvailabilityResponse>>, ApiError> {
    request.validate().map_err(AppError::from)?;

    let availability = state
        .bookings
        .check_availability(
            request.vehicle_id.as_deref().unwrap_or_default(),
            request.from.as_deref().unwrap_or_default(),
            request.to.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(ApiResponse::ok(AvailabilityResponse { availability })))
}
