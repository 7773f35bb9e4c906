//! Booking ingestion handler.

use axum::Json;
use axum::extract::State;

use rentflow_core::records::BookingRequest;
use rentflow_service::BookingCreated;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::state::AppState;

/// POST /api/booking
pub async fn create_booking(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<BookingRequest>,
) -> Result<Json<ApiResponse<BookingCreated>>, ApiError> {
    let created = state.bookings.create(request).await?;
    Ok(Json(ApiResponse::ok(created)))
}
