//! Vendor clients and the interfaces the rest of the workspace sees them
//! through.
//!
//! Services and plugins hold `Arc<dyn Trait>` so tests can swap in fakes.

pub mod ad_tracking;
pub mod crm;
pub mod email;
pub mod whatsapp;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use rentflow_core::error::AppResult;
use rentflow_core::records::{AdTrack, Booking, Lead};

pub use self::ad_tracking::AdTrackingClient;
pub use self::crm::CrmApiClient;
pub use self::email::EmailClient;
pub use self::whatsapp::WhatsAppClient;

/// Sends a chat message to a phone number.
#[async_trait]
pub trait MessagingClient: Send + Sync + std::fmt::Debug {
    async fn send(&self, to: &str, message: &str) -> AppResult<Value>;
}

/// Customer relationship management backend.
#[async_trait]
pub trait CrmClient: Send + Sync + std::fmt::Debug {
    async fn create_lead(&self, lead: &Lead) -> AppResult<Value>;

    async fn create_booking(&self, booking: &Booking) -> AppResult<Value>;

    /// Asks whether `vehicle_id` is free between `from` and `to`.
    async fn check_availability(
        &self,
        vehicle_id: &str,
        from: &str,
        to: &str,
    ) -> AppResult<Availability>;
}

/// Transactional e-mail.
#[async_trait]
pub trait EmailSender: Send + Sync + std::fmt::Debug {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<Value>;
}

/// Advertising conversion tracking.
#[async_trait]
pub trait ConversionTracker: Send + Sync + std::fmt::Debug {
    async fn track(&self, event: &AdTrack) -> AppResult<Value>;
}

/// Availability answer from the CRM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub vehicle_id: String,
    pub available: bool,
    /// Vehicle ids the CRM suggests instead.
    #[serde(default)]
    pub alternatives: Vec<String>,
}
