//! REST client for the CRM backend.

use async_trait::async_trait;
use serde_json::{Value, json};

use rentflow_core::config::VendorConfig;
use rentflow_core::error::{AppError, AppResult};
use rentflow_core::records::{Booking, Lead};

use super::{Availability, CrmClient};
use crate::http::VendorHttp;

#[derive(Debug, Clone)]
pub struct CrmApiClient {
    http: VendorHttp,
}

impl CrmApiClient {
    pub const VENDOR: &'static str = "CRM";

    pub fn new(http: VendorHttp) -> Self {
        Self { http }
    }

    pub fn from_config(config: &VendorConfig) -> AppResult<Self> {
        Ok(Self::new(VendorHttp::from_config(Self::VENDOR, config)?))
    }
}

#[async_trait]
impl CrmClient for CrmApiClient {
    async fn create_lead(&self, lead: &Lead) -> AppResult<Value> {
        let body = json!({
            "name": lead.name,
            "email": lead.email,
            "phone": lead.phone,
            "message": lead.message,
            "vehicleId": lead.vehicle_id,
            "source": lead.source,
            "status": lead.status,
            "createdAt": lead.created_at,
        });
        self.http.post("leads", &body).await
    }

    async fn create_booking(&self, booking: &Booking) -> AppResult<Value> {
        let body = json!({
            "reference": booking.booking_reference,
            "vehicleId": booking.vehicle_id,
            "pickupDate": booking.pickup_date,
            "returnDate": booking.return_date,
            "pickupLocation": booking.pickup_location,
            "returnLocation": booking.return_location,
            "customer": {
                "firstName": booking.first_name,
                "lastName": booking.last_name,
                "email": booking.email,
                "phone": booking.phone,
            },
            "totalPrice": booking.total_price,
            "currency": booking.currency,
            "extras": booking.extras,
            "status": booking.status,
        });
        self.http.post("bookings", &body).await
    }

    async fn check_availability(
        &self,
        vehicle_id: &str,
        from: &str,
        to: &str,
    ) -> AppResult<Availability> {
        let body = json!({ "vehicleId": vehicle_id, "from": from, "to": to });
        let response = self.http.post("availability", &body).await?;
        parse_availability(vehicle_id, response)
    }
}

/// Accepts either a full availability object or a bare `{available}`.
fn parse_availability(vehicle_id: &str, response: Value) -> AppResult<Availability> {
    let available = response
        .get("available")
        .and_then(Value::as_bool)
        .ok_or_else(|| {
            AppError::vendor(
                CrmApiClient::VENDOR,
                200,
                "availability response has no 'available' flag",
            )
        })?;

    let alternatives = response
        .get("alternatives")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    Ok(Availability {
        vehicle_id: vehicle_id.to_string(),
        available,
        alternatives,
    })
}
