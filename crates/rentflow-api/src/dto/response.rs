//! Response DTOs.

use serde::Serialize;

use rentflow_integrations::Availability;
use rentflow_plugin::{PluginInfo, PluginSettings, PluginState, TriggerResult};

/// Standard success wrapper: `{success: true, ...data}`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response fields, inlined.
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Result of a manual plugin trigger.
#[derive(Debug, Clone, Serialize)]
pub struct TriggerResponse {
    pub hook: String,
    pub results: TriggerResult,
}

/// Registered plugins and the active ones in activation order.
#[derive(Debug, Clone, Serialize)]
pub struct PluginsResponse {
    pub registered: Vec<PluginInfo>,
    pub active: Vec<String>,
}

/// New lifecycle state of one plugin.
#[derive(Debug, Clone, Serialize)]
pub struct PluginStateResponse {
    pub plugin: String,
    pub state: PluginState,
}

#[derive(Debug, Clone, Serialize)]
pub struct PluginConfigResponse {
    pub plugin: String,
    pub config: PluginSettings,
}

#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityResponse {
    pub availability: Availability,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub active_plugins: usize,
}
