//! The vendor clients the ingestion services call directly.

use std::sync::Arc;

use tracing::info;

use rentflow_core::config::IntegrationsConfig;
use rentflow_core::error::AppResult;

use crate::clients::{
    AdTrackingClient, ConversionTracker, CrmApiClient, CrmClient, EmailClient, EmailSender,
    MessagingClient, WhatsAppClient,
};

/// Directly-called vendor clients; `None` means the vendor is disabled.
#[derive(Debug, Clone, Default)]
pub struct VendorClients {
    pub messaging: Option<Arc<dyn MessagingClient>>,
    pub crm: Option<Arc<dyn CrmClient>>,
    pub email: Option<Arc<dyn EmailSender>>,
    pub tracker: Option<Arc<dyn ConversionTracker>>,
    /// Staff inbox for new-lead notifications.
    pub notify_address: Option<String>,
}

impl VendorClients {
    /// Builds a client for every enabled vendor. An enabled vendor with
    /// incomplete settings is a configuration error.
    pub fn from_config(config: &IntegrationsConfig) -> AppResult<Self> {
        let mut clients = Self::default();

        if config.whatsapp.vendor.enabled {
            clients.messaging = Some(Arc::new(WhatsAppClient::from_config(&config.whatsapp)?));
        }
        if config.crm.enabled {
            clients.crm = Some(Arc::new(CrmApiClient::from_config(&config.crm)?));
        }
        if config.email.vendor.enabled {
            clients.email = Some(Arc::new(EmailClient::from_config(&config.email)?));
            clients.notify_address =
                Some(config.email.notify_address.clone()).filter(|a| !a.is_empty());
        }
        if config.ad_tracking.vendor.enabled {
            clients.tracker = Some(Arc::new(AdTrackingClient::from_config(&config.ad_tracking)?));
        }

        info!(
            whatsapp = clients.messaging.is_some(),
            crm = clients.crm.is_some(),
            email = clients.email.is_some(),
            ad_tracking = clients.tracker.is_some(),
            "Vendor clients configured"
        );
        Ok(clients)
    }
}
