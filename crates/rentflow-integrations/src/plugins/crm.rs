//! CRM plugin: mirrors leads and bookings into the CRM.

use std::sync::Arc;

use tracing::info;

use rentflow_plugin::prelude::*;

use super::{ClientFactory, ClientSlot, required_setting, vendor_http};
use crate::clients::{CrmApiClient, CrmClient};

const PLUGIN: &str = "CRM";

/// Settings: `apiKey`, `baseUrl`.
pub struct CrmPlugin {
    factory: ClientFactory<dyn CrmClient>,
    client: Arc<ClientSlot<dyn CrmClient>>,
}

impl std::fmt::Debug for CrmPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrmPlugin")
            .field("client", &self.client)
            .finish()
    }
}

impl CrmPlugin {
    pub fn new() -> Self {
        Self::with_factory(Arc::new(|settings: &PluginSettings| {
            required_setting(settings, PLUGIN, "baseUrl")?;
            let http = vendor_http(settings, PLUGIN, CrmApiClient::VENDOR, "")?;
            let client: Arc<dyn CrmClient> = Arc::new(CrmApiClient::new(http));
            Ok(client)
        }))
    }

    pub fn with_factory(factory: ClientFactory<dyn CrmClient>) -> Self {
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

impl Default for CrmPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Plugin for CrmPlugin {
    fn handlers(&self) -> Vec<(HookPoint, Arc<dyn HookHandler>)> {
        let handler: Arc<dyn HookHandler> = Arc::new(CrmHandler {
            client: Arc::clone(&self.client),
        });
        vec![
            (HookPoint::OnLead, Arc::clone(&handler)),
            (HookPoint::OnBooking, handler),
        ]
    }

    fn description(&self) -> &str {
        "CRM lead and booking sync"
    }

    async fn init(&self, config: &PluginSettings) -> AppResult<()> {
        self.rebuild(config).await?;
        info!("CRM plugin initialized");
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

struct CrmHandler {
    client: Arc<ClientSlot<dyn CrmClient>>,
}

#[async_trait]
impl HookHandler for CrmHandler {
    async fn handle(&self, payload: &HookPayload) -> AppResult<Value> {
        let client = self.client.get().await?;
        match payload {
            HookPayload::Lead(lead) => client.create_lead(lead).await,
            HookPayload::Booking(booking) => client.create_booking(booking).await,
            other => Err(AppError::plugin(format!(
                "CRM plugin does not handle {}",
                other.hook()
            ))),
        }
    }
}
