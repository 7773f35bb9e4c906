//! Payloads for the hooks that are not backed by an ingestion endpoint.
//!
//! These arrive through the plugin trigger endpoint or from in-process
//! callers. Everything except the identifying fields is optional.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A payment recorded against a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub booking_reference: String,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub status: Option<String>,
    /// Reference assigned by the payment provider.
    #[serde(default)]
    pub provider_reference: Option<String>,
}

/// An outbound or inbound chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub to: String,
    pub body: String,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub booking_reference: Option<String>,
}

/// An advertising conversion event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdTrack {
    /// Event name, e.g. `Lead` or `Purchase`.
    pub event: String,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

/// A dashboard task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub related_reference: Option<String>,
}

/// A change to a fleet vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleUpdate {
    pub vehicle_id: String,
    /// Changed fields and their new values.
    #[serde(default)]
    pub changes: Map<String, Value>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_currency() -> String {
    "EUR".to_string()
}
