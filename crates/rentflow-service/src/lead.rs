//! Lead ingestion.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use rentflow_core::error::AppResult;
use rentflow_core::records::{LEADS_TABLE, Lead, LeadRequest};
use rentflow_core::traits::{RecordStore, insert_typed};
use rentflow_integrations::{
    AD_TRACKING_PLUGIN, CRM_PLUGIN, VendorClients, WHATSAPP_PLUGIN, templates,
};
use rentflow_plugin::{HookPayload, PluginManager, TriggerResult};

use crate::fanout::{FanOutReport, Route};

#[derive(Debug, Clone, Serialize)]
pub struct LeadCreated {
    pub lead: Lead,
    pub plugin_results: TriggerResult,
    pub notifications: FanOutReport,
}

#[derive(Debug, Clone)]
pub struct LeadService {
    store: Arc<dyn RecordStore>,
    plugins: Arc<PluginManager>,
    vendors: VendorClients,
}

impl LeadService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        plugins: Arc<PluginManager>,
        vendors: VendorClients,
    ) -> Self {
        Self {
            store,
            plugins,
            vendors,
        }
    }

    /// Validates, stores, and announces a lead. Same failure rules as
    /// [`BookingService::create`](crate::BookingService::create).
    pub async fn create(&self, request: LeadRequest) -> AppResult<LeadCreated> {
        let lead = request.into_lead(Utc::now())?;

        let lead = insert_typed(self.store.as_ref(), LEADS_TABLE, &lead).await?;
        info!(email = %lead.email, source = %lead.source, "Lead stored");

        let plugin_results = self
            .plugins
            .trigger_hook(&HookPayload::Lead(lead.clone()))
            .await;

        let notifications = self.fan_out(&lead).await;

        Ok(LeadCreated {
            lead,
            plugin_results,
            notifications,
        })
    }

    async fn fan_out(&self, lead: &Lead) -> FanOutReport {
        let active = self.plugins.active_plugins().await;
        let mut report = FanOutReport::new();

        report
            .notify(
                "crm",
                "create_lead",
                Route::select(&self.vendors.crm, Some(CRM_PLUGIN), &active),
                |client| async move { client.create_lead(lead).await },
            )
            .await;

        match &lead.phone {
            Some(phone) => {
                let text = templates::lead_message(lead);
                report
                    .notify(
                        "whatsapp",
                        "lead_acknowledgement",
                        Route::select(&self.vendors.messaging, Some(WHATSAPP_PLUGIN), &active),
                        |client| async move { client.send(phone, &text).await },
                    )
                    .await;
            }
            None => report.skip("whatsapp", "lead_acknowledgement", "lead has no phone"),
        }

        match &self.vendors.notify_address {
            Some(address) => {
                let (subject, body) = templates::lead_email(lead);
                report
                    .notify(
                        "email",
                        "lead_notification",
                        Route::select(&self.vendors.email, None, &active),
                        |client| async move { client.send(address, &subject, &body).await },
                    )
                    .await;
            }
            None => report.skip("email", "lead_notification", "no notification address"),
        }

        let conversion = templates::lead_conversion(lead);
        report
            .notify(
                "ad_tracking",
                "lead",
                Route::select(&self.vendors.tracker, Some(AD_TRACKING_PLUGIN), &active),
                |client| async move { client.track(&conversion).await },
            )
            .await;

        report
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use rentflow_core::error::ErrorKind;
    use rentflow_database::MemoryRecordStore;
    use rentflow_plugin::{ClosurePlugin, HookPoint};

    use super::*;
    use crate::fanout::DeliveryStatus;
    use crate::testing::{FakeVendor, vendors};

    fn request(value: serde_json::Value) -> LeadRequest {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let store = Arc::new(MemoryRecordStore::new());
        let service = LeadService::new(
            store.clone(),
            Arc::new(PluginManager::new()),
            VendorClients::default(),
        );

        let created = service
            .create(request(json!({"name": "Sam Ortiz", "email": "sam@example.com"})))
            .await
            .unwrap();

        assert_eq!(created.lead.source, "website");
        assert_eq!(created.lead.status, "new");
        assert!(created.lead.id.is_some());
        assert_eq!(store.len(LEADS_TABLE), 1);
    }

    #[tokio::test]
    async fn test_missing_email_rejected() {
        let store = Arc::new(MemoryRecordStore::new());
        let service = LeadService::new(
            store.clone(),
            Arc::new(PluginManager::new()),
            VendorClients::default(),
        );

        let err = service
            .create(request(json!({"name": "Sam Ortiz"})))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "Missing required fields: email");
        assert_eq!(store.len(LEADS_TABLE), 0);
    }

    #[tokio::test]
    async fn test_fan_out_with_phone() {
        let fake = Arc::new(FakeVendor::default());
        let manager = Arc::new(PluginManager::new());
        manager
            .register(
                "audit",
                Arc::new(ClosurePlugin::new("Audit").on(HookPoint::OnLead, |payload| async move {
                    Ok(json!({ "seen": payload.to_json()["email"] }))
                })),
                Default::default(),
            )
            .await;
        manager.activate("audit").await.unwrap();

        let service = LeadService::new(Arc::new(MemoryRecordStore::new()), manager, vendors(&fake));
        let created = service
            .create(request(json!({
                "name": "Sam Ortiz",
                "email": "sam@example.com",
                "phone": "+34 600 000 111",
                "source": "google_ads"
            })))
            .await
            .unwrap();

        assert_eq!(created.plugin_results.len(), 1);
        assert!(!created.plugin_results[0].is_error());
        assert_eq!(
            fake.calls(),
            vec![
                "crm_lead:sam@example.com",
                "message:+34 600 000 111",
                "email:sales@example.com:New lead: Sam Ortiz",
                "track:Lead",
            ]
        );
    }

    #[tokio::test]
    async fn test_no_phone_skips_whatsapp() {
        let fake = Arc::new(FakeVendor::default());
        let service = LeadService::new(
            Arc::new(MemoryRecordStore::new()),
            Arc::new(PluginManager::new()),
            vendors(&fake),
        );

        let created = service
            .create(request(json!({"name": "Sam", "email": "sam@example.com", "phone": ""})))
            .await
            .unwrap();

        assert_eq!(
            created.notifications.status_of("whatsapp"),
            Some(DeliveryStatus::Skipped)
        );
        assert!(!fake.calls().iter().any(|c| c.starts_with("message:")));
        assert_eq!(created.notifications.count(DeliveryStatus::Sent), 3);
    }
}
