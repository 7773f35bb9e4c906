//! Plugins that subscribe the vendor clients to hooks.
//!
//! Each plugin builds its client from the plugin settings in `init`,
//! rebuilds it in `update_config` and drops it in `cleanup`. Settings keys
//! are camelCase: `apiKey` (required), `baseUrl`, `timeoutSeconds`, plus
//! vendor specifics. Lookups ignore case.

pub mod ad_tracking;
pub mod crm;
pub mod whatsapp;

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::RwLock;

use rentflow_core::error::{AppError, AppResult};
use rentflow_plugin::PluginSettings;

use crate::http::VendorHttp;

pub use self::ad_tracking::AdTrackingPlugin;
pub use self::crm::CrmPlugin;
pub use self::whatsapp::WhatsAppPlugin;

/// Builds a client from plugin settings.
pub type ClientFactory<T> = Arc<dyn Fn(&PluginSettings) -> AppResult<Arc<T>> + Send + Sync>;

const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// The client a plugin's handlers share, present while the plugin is
/// initialized.
#[derive(Debug)]
pub(crate) struct ClientSlot<T: ?Sized> {
    plugin: &'static str,
    client: RwLock<Option<Arc<T>>>,
}

impl<T: ?Sized> ClientSlot<T> {
    pub fn new(plugin: &'static str) -> Self {
        Self {
            plugin,
            client: RwLock::new(None),
        }
    }

    pub async fn get(&self) -> AppResult<Arc<T>> {
        self.client.read().await.clone().ok_or_else(|| {
            AppError::plugin(format!("{} plugin is not initialized", self.plugin))
        })
    }

    pub async fn set(&self, client: Arc<T>) {
        *self.client.write().await = Some(client);
    }

    pub async fn clear(&self) {
        self.client.write().await.take();
    }
}

/// Looks a setting up by exact key, then ignoring ASCII case.
///
/// Settings supplied through `RENTFLOW__PLUGINS__SETTINGS__*` arrive with
/// lowercased keys (`apikey` for `apiKey`).
fn lookup<'a>(settings: &'a PluginSettings, key: &str) -> Option<&'a Value> {
    settings.get(key).or_else(|| {
        settings
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value)
    })
}

/// Reads a non-empty string setting.
pub(crate) fn setting<'a>(settings: &'a PluginSettings, key: &str) -> Option<&'a str> {
    lookup(settings, key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

pub(crate) fn required_setting<'a>(
    settings: &'a PluginSettings,
    plugin: &str,
    key: &str,
) -> AppResult<&'a str> {
    setting(settings, key)
        .ok_or_else(|| AppError::configuration(format!("{plugin} plugin requires '{key}'")))
}

/// Builds bearer-authenticated plumbing from `apiKey`, `baseUrl` and
/// `timeoutSeconds`.
pub(crate) fn vendor_http(
    settings: &PluginSettings,
    plugin: &str,
    vendor: &'static str,
    default_base_url: &str,
) -> AppResult<VendorHttp> {
    let api_key = required_setting(settings, plugin, "apiKey")?;
    let base_url = setting(settings, "baseUrl").unwrap_or(default_base_url);
    let timeout = lookup(settings, "timeoutSeconds")
        .and_then(Value::as_u64)
        .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

    VendorHttp::new(
        vendor,
        base_url,
        api_key,
        Duration::from_secs(timeout),
    )
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use rentflow_core::records::{AdTrack, Booking, Lead};

    use super::*;
    use crate::clients::{Availability, ConversionTracker, CrmClient, MessagingClient};

    /// Records every call as `(method, detail)`; fails when `fail` is set.
    #[derive(Debug, Default)]
    pub struct RecordingClient {
        pub label: String,
        pub fail: bool,
        pub calls: Mutex<Vec<(String, String)>>,
    }

    impl RecordingClient {
        pub fn labelled(label: &str) -> Self {
            Self {
                label: label.to_string(),
                ..Self::default()
            }
        }

        pub fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, method: &str, detail: String) -> AppResult<Value> {
            self.calls
                .lock()
                .unwrap()
                .push((method.to_string(), detail));
            if self.fail {
                return Err(AppError::vendor("Fake", 503, "unavailable"));
            }
            Ok(json!({ "client": self.label, "method": method }))
        }
    }

    #[async_trait]
    impl MessagingClient for RecordingClient {
        async fn send(&self, to: &str, _message: &str) -> AppResult<Value> {
            self.record("send", to.to_string())
        }
    }

    #[async_trait]
    impl CrmClient for RecordingClient {
        async fn create_lead(&self, lead: &Lead) -> AppResult<Value> {
            self.record("create_lead", lead.email.clone())
        }

        async fn create_booking(&self, booking: &Booking) -> AppResult<Value> {
            self.record("create_booking", booking.booking_reference.clone())
        }

        async fn check_availability(
            &self,
            vehicle_id: &str,
            _from: &str,
            _to: &str,
        ) -> AppResult<Availability> {
            self.record("check_availability", vehicle_id.to_string())?;
            Ok(Availability {
                vehicle_id: vehicle_id.to_string(),
                available: true,
                alternatives: Vec::new(),
            })
        }
    }

    #[async_trait]
    impl ConversionTracker for RecordingClient {
        async fn track(&self, event: &AdTrack) -> AppResult<Value> {
            self.record("track", event.event.clone())
        }
    }

    pub fn settings(pairs: &[(&str, Value)]) -> PluginSettings {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}
