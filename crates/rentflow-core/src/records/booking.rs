//! Booking records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::AppResult;

/// Booking submitted by the public site.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BookingRequest {
    /// Client-supplied reference; generated when absent.
    #[serde(default)]
    pub booking_reference: Option<String>,
    #[validate(required, length(min = 1))]
    pub vehicle_id: Option<String>,
    #[validate(required, length(min = 1))]
    pub pickup_date: Option<String>,
    #[validate(required, length(min = 1))]
    pub return_date: Option<String>,
    #[validate(required, length(min = 1))]
    pub pickup_location: Option<String>,
    #[validate(required, length(min = 1))]
    pub return_location: Option<String>,
    #[validate(required, length(min = 1))]
    pub first_name: Option<String>,
    #[validate(required, length(min = 1))]
    pub last_name: Option<String>,
    #[validate(required, length(min = 1))]
    pub email: Option<String>,
    #[validate(required, length(min = 1))]
    pub phone: Option<String>,
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub extras: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl BookingRequest {
    /// Validates the request and converts it into an unsaved booking.
    ///
    /// `reference` is used only when the request carries no reference of
    /// its own.
    pub fn into_booking(
        self,
        reference: impl FnOnce() -> String,
        created_at: DateTime<Utc>,
    ) -> AppResult<Booking> {
        self.validate()?;

        let booking_reference = self
            .booking_reference
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(reference);

        Ok(Booking {
            id: None,
            booking_reference,
            vehicle_id: self.vehicle_id.unwrap_or_default(),
            pickup_date: self.pickup_date.unwrap_or_default(),
            return_date: self.return_date.unwrap_or_default(),
            pickup_location: self.pickup_location.unwrap_or_default(),
            return_location: self.return_location.unwrap_or_default(),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            total_price: self.total_price,
            currency: self.currency,
            extras: self.extras,
            notes: self.notes,
            status: default_status(),
            created_at,
        })
    }
}

/// A persisted booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Assigned by the record store on insert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub booking_reference: String,
    pub vehicle_id: String,
    pub pickup_date: String,
    pub return_date: String,
    pub pickup_location: String,
    pub return_location: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub extras: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Renter's full name.
    pub fn renter_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

fn default_status() -> String {
    "pending".to_string()
}
