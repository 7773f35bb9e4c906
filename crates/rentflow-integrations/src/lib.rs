//! # rentflow-integrations
//!
//! Vendor integrations for RentFlow:
//!
//! - JSON-over-HTTP clients for WhatsApp, the CRM, e-mail and ad tracking
//! - Plugins subscribing those clients to booking, lead and message hooks
//! - Shared notification templates

pub mod clients;
pub mod http;
pub mod plugins;
pub mod templates;
pub mod vendors;

use std::sync::Arc;

use tracing::{error, info, warn};

use rentflow_core::config::PluginConfig;
use rentflow_plugin::{Plugin, PluginManager};

pub use clients::{
    AdTrackingClient, Availability, ConversionTracker, CrmApiClient, CrmClient, EmailClient,
    EmailSender, MessagingClient, WhatsAppClient,
};
pub use http::VendorHttp;
pub use plugins::{AdTrackingPlugin, CrmPlugin, WhatsAppPlugin};
pub use vendors::VendorClients;

/// Registered name of [`WhatsAppPlugin`].
pub const WHATSAPP_PLUGIN: &str = "whatsapp";
/// Registered name of [`CrmPlugin`].
pub const CRM_PLUGIN: &str = "crm";
/// Registered name of [`AdTrackingPlugin`].
pub const AD_TRACKING_PLUGIN: &str = "ad_tracking";

/// Registers the built-in vendor plugins with their configured settings,
/// then activates those listed in `config.enabled`.
///
/// A plugin that fails to activate is logged and left inactive; startup
/// continues.
pub async fn register_builtin_plugins(manager: &PluginManager, config: &PluginConfig) {
    let builtins: [(&str, Arc<dyn Plugin>); 3] = [
        (WHATSAPP_PLUGIN, Arc::new(WhatsAppPlugin::new())),
        (CRM_PLUGIN, Arc::new(CrmPlugin::new())),
        (AD_TRACKING_PLUGIN, Arc::new(AdTrackingPlugin::new())),
    ];
    for (name, plugin) in builtins {
        manager
            .register(name, plugin, config.settings_for(name))
            .await;
    }

    for name in &config.enabled {
        if !manager.registered_plugins().await.contains(name) {
            warn!(plugin = %name, "Enabled plugin is not registered, skipping");
            continue;
        }
        match manager.activate(name).await {
            Ok(()) => info!(plugin = %name, "Plugin enabled at startup"),
            Err(e) => error!(plugin = %name, error = %e, "Failed to enable plugin"),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use rentflow_plugin::PluginState;

    use super::*;

    #[tokio::test]
    async fn test_builtin_registration() {
        let mut config = PluginConfig::default();
        config.enabled = vec!["crm".to_string(), "sms".to_string()];
        config.settings.insert(
            "crm".to_string(),
            [
                ("apiKey".to_string(), json!("secret")),
                ("baseUrl".to_string(), json!("https://crm.example.com")),
            ]
            .into_iter()
            .collect(),
        );

        let manager = PluginManager::new();
        register_builtin_plugins(&manager, &config).await;

        assert_eq!(
            manager.registered_plugins().await,
            vec!["ad_tracking", "crm", "whatsapp"]
        );
        assert_eq!(manager.active_plugins().await, vec!["crm"]);
        assert_eq!(
            manager.plugin_state("whatsapp").await,
            Some(PluginState::Registered)
        );
    }

    #[tokio::test]
    async fn test_enabled_without_settings_stays_inactive() {
        let mut config = PluginConfig::default();
        config.enabled = vec!["whatsapp".to_string()];

        let manager = PluginManager::new();
        register_builtin_plugins(&manager, &config).await;

        assert!(manager.active_plugins().await.is_empty());
        assert!(manager.subscribers(rentflow_plugin::HookPoint::OnBooking).await.is_empty());
    }
}
