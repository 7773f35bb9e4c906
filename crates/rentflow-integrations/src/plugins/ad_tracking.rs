//! Ad tracking plugin: reports conversions for bookings, leads and
//! explicit `onAdTrack` events.

use std::sync::Arc;

use tracing::info;

use rentflow_plugin::prelude::*;

use super::{ClientFactory, ClientSlot, required_setting, vendor_http};
use crate::clients::{AdTrackingClient, ConversionTracker};
use crate::templates;

const PLUGIN: &str = "Ad tracking";
const DEFAULT_BASE_URL: &str = "https://graph.facebook.com/v19.0";

/// Settings: `apiKey`, `pixelId`, optional `baseUrl`.
pub struct AdTrackingPlugin {
    factory: ClientFactory<dyn ConversionTracker>,
    client: Arc<ClientSlot<dyn ConversionTracker>>,
}

impl std::fmt::Debug for AdTrackingPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdTrackingPlugin")
            .field("client", &self.client)
            .finish()
    }
}

impl AdTrackingPlugin {
    pub fn new() -> Self {
        Self::with_factory(Arc::new(|settings: &PluginSettings| {
            let http = vendor_http(settings, PLUGIN, AdTrackingClient::VENDOR, DEFAULT_BASE_URL)?;
            let pixel_id = required_setting(settings, PLUGIN, "pixelId")?;
            let client: Arc<dyn ConversionTracker> =
                Arc::new(AdTrackingClient::new(http, pixel_id)?);
            Ok(client)
        }))
    }

    pub fn with_factory(factory: ClientFactory<dyn ConversionTracker>) -> Self {
        Self {
            factory,
            client: Arc::new(ClientSlot::new(PLUGIN)),
        }
    }

    async fn rebuild(&self, config: &PluginSettings) -> AppResult<()> {
        required_setting(config, PLUGIN, "apiKey")?;
        self.client.set((self.factory)(config)?).await;
        Ok(())
    }
}

impl Default for AdTrackingPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Plugin for AdTrackingPlugin {
    fn handlers(&self) -> Vec<(HookPoint, Arc<dyn HookHandler>)> {
        let handler: Arc<dyn HookHandler> = Arc::new(AdTrackingHandler {
            client: Arc::clone(&self.client),
        });
        vec![
            (HookPoint::OnAdTrack, Arc::clone(&handler)),
            (HookPoint::OnBooking, Arc::clone(&handler)),
            (HookPoint::OnLead, handler),
        ]
    }

    fn description(&self) -> &str {
        "Server-side conversion tracking"
    }

    async fn init(&self, config: &PluginSettings) -> AppResult<()> {
        self.rebuild(config).await?;
        info!("Ad tracking plugin initialized");
        Ok(())
    }

    async fn cleanup(&self) -> AppResult<()> {
        self.client.clear().await;
        Ok(())
    }

    async fn update_config(&self, config: &PluginSettings) -> AppResult<()> {
        self.rebuild(config).await
    }
}

struct AdTrackingHandler {
    client: Arc<ClientSlot<dyn ConversionTracker>>,
}

#[async_trait]
impl HookHandler for AdTrackingHandler {
    async fn handle(&self, payload: &HookPayload) -> AppResult<Value> {
        let client = self.client.get().await?;
        let event = match payload {
            HookPayload::AdTrack(event) => event.clone(),
            HookPayload::Booking(booking) => templates::booking_conversion(booking),
            HookPayload::Lead(lead) => templates::lead_conversion(lead),
            other => {
                return Err(AppError::plugin(format!(
                    "Ad tracking plugin does not handle {}",
                    other.hook()
                )));
            }
        };
        client.track(&event).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::plugins::fakes::{RecordingClient, settings};
    use crate::templates::fixtures;

    #[tokio::test]
    async fn test_init_requires_pixel_id() {
        let plugin = AdTrackingPlugin::new();
        let err = plugin
            .init(&settings(&[("apiKey", json!("token"))]))
            .await
            .unwrap_err();
        assert_eq!(err.message, "Ad tracking plugin requires 'pixelId'");
    }

    #[tokio::test]
    async fn test_records_derive_events() {
        let client = Arc::new(RecordingClient::default());
        let shared = client.clone();
        let plugin = AdTrackingPlugin::with_factory(Arc::new(move |_: &PluginSettings| {
            let client: Arc<dyn ConversionTracker> = shared.clone();
            Ok(client)
        }));
        plugin
            .init(&settings(&[("apiKey", json!("token"))]))
            .await
            .unwrap();

        let (_, handler) = plugin.handlers().remove(0);
        handler.handle(&fixtures::lead().into()).await.unwrap();
        handler.handle(&fixtures::booking().into()).await.unwrap();

        let events: Vec<String> = client.calls().into_iter().map(|(_, e)| e).collect();
        assert_eq!(events, vec!["Lead", "Purchase"]);
    }
}
