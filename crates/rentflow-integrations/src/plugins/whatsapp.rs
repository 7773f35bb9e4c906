//! WhatsApp plugin: booking confirmations, lead acknowledgements and
//! outbound chat messages.

use std::sync::Arc;

use tracing::{debug, info};

use serde_json::json;

use rentflow_plugin::prelude::*;

use super::{ClientFactory, ClientSlot, required_setting, vendor_http};
use crate::clients::{MessagingClient, WhatsAppClient};
use crate::templates;

const PLUGIN: &str = "WhatsApp";
const DEFAULT_BASE_URL: &str = "https://graph.facebook.com/v19.0";

/// Subscribes the WhatsApp client to `onBooking`, `onLead` and `onMessage`.
///
/// Settings: `apiKey`, `phoneNumberId`, optional `baseUrl`.
pub struct WhatsAppPlugin {
    factory: ClientFactory<dyn MessagingClient>,
    client: Arc<ClientSlot<dyn MessagingClient>>,
}

impl std::fmt::Debug for WhatsAppPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppPlugin")
            .field("client", &self.client)
            .finish()
    }
}

impl WhatsAppPlugin {
    pub fn new() -> Self {
        Self::with_factory(Arc::new(|settings: &PluginSettings| {
            let http = vendor_http(settings, PLUGIN, WhatsAppClient::VENDOR, DEFAULT_BASE_URL)?;
            let sender = required_setting(settings, PLUGIN, "phoneNumberId")?;
            let client: Arc<dyn MessagingClient> = Arc::new(WhatsAppClient::new(http, sender)?);
            Ok(client)
        }))
    }

    /// Uses `factory` instead of the HTTP client.
    pub fn with_factory(factory: ClientFactory<dyn MessagingClient>) -> Self {
        Self {
            factory,
            client: Arc::new(ClientSlot::new(PLUGIN)),
        }
    }

    async fn rebuild(&self, config: &PluginSettings) -> AppResult<()> {
        required_setting(config, PLUGIN, "apiKey")?;
        let client = (self.factory)(config)?;
        self.client.set(client).await;
        Ok(())
    }
}

impl Default for WhatsAppPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Plugin for WhatsAppPlugin {
    fn handlers(&self) -> Vec<(HookPoint, Arc<dyn HookHandler>)> {
        let handler: Arc<dyn HookHandler> = Arc::new(WhatsAppHandler {
            client: Arc::clone(&self.client),
        });
        vec![
            (HookPoint::OnBooking, Arc::clone(&handler)),
            (HookPoint::OnLead, Arc::clone(&handler)),
            (HookPoint::OnMessage, handler),
        ]
    }

    fn description(&self) -> &str {
        "WhatsApp Business messaging"
    }

    async fn init(&self, config: &PluginSettings) -> AppResult<()> {
        self.rebuild(config).await?;
        info!("WhatsApp plugin initialized");
        Ok(())
    }

    async fn cleanup(&self) -> AppResult<()> {
        self.client.clear().await;
        Ok(())
    }

    async fn update_config(&self, config: &PluginSettings) -> AppResult<()> {
        self.rebuild(config).await?;
        info!("WhatsApp plugin reconfigured");
        Ok(())
    }
}

struct WhatsAppHandler {
    client: Arc<ClientSlot<dyn MessagingClient>>,
}

#[async_trait]
impl HookHandler for WhatsAppHandler {
    async fn handle(&self, payload: &HookPayload) -> AppResult<Value> {
        let client = self.client.get().await?;

        match payload {
            HookPayload::Booking(booking) => {
                client
                    .send(&booking.phone, &templates::booking_message(booking))
                    .await
            }
            HookPayload::Lead(lead) => match &lead.phone {
                Some(phone) => client.send(phone, &templates::lead_message(lead)).await,
                None => {
                    debug!(email = %lead.email, "Lead has no phone, skipping WhatsApp");
                    Ok(json!({ "skipped": "lead has no phone" }))
                }
            },
            HookPayload::Message(message) => client.send(&message.to, &message.body).await,
            other => Err(AppError::plugin(format!(
                "WhatsApp plugin does not handle {}",
                other.hook()
            ))),
        }
    }
}
