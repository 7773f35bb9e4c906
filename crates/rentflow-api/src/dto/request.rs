//! Request DTOs.
//!
//! Booking and lead bodies decode straight into the core request records;
//! only the plugin and availability endpoints have their own shapes.

use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use rentflow_plugin::PluginSettings;

/// `POST /api/plugin`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerRequest {
    #[serde(default)]
    pub hook: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub api_key: String,
}

/// Body of the plugin activate and deactivate endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyRequest {
    #[serde(default)]
    pub api_key: String,
}

/// `PATCH /api/plugins/{name}/config`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfigRequest {
    #[serde(default)]
    pub api_key: String,
    /// Top-level keys to overwrite.
    pub config: PluginSettings,
}

/// `POST /api/availability`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AvailabilityRequest {
    #[validate(required, length(min = 1))]
    pub vehicle_id: Option<String>,
    #[validate(required, length(min = 1))]
    pub from: Option<String>,
    #[validate(required, length(min = 1))]
    pub to: Option<String>,
}
