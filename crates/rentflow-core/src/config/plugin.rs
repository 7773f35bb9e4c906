//! Plugin system configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Plugin system configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Shared secret required by the plugin trigger and admin endpoints.
    /// An empty secret rejects every request.
    #[serde(default)]
    pub api_key: String,
    /// Plugins to activate at startup, in activation order.
    #[serde(default)]
    pub enabled: Vec<String>,
    /// Initial configuration per plugin name.
    #[serde(default)]
    pub settings: HashMap<String, Map<String, Value>>,
}

impl PluginConfig {
    /// Returns the configured settings for a plugin, or an empty object.
    pub fn settings_for(&self, name: &str) -> Map<String, Value> {
        self.settings.get(name).cloned().unwrap_or_default()
    }
}
