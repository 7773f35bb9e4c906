//! Booking ingestion and vehicle availability.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use rentflow_core::error::{AppError, AppResult};
use rentflow_core::records::{BOOKINGS_TABLE, Booking, BookingRequest};
use rentflow_core::traits::{RecordStore, insert_typed};
use rentflow_integrations::{
    AD_TRACKING_PLUGIN, Availability, CRM_PLUGIN, VendorClients, WHATSAPP_PLUGIN, templates,
};
use rentflow_plugin::{HookPayload, PluginManager, TriggerResult};

use crate::fanout::{FanOutReport, Route};
use crate::reference::booking_reference;

/// A stored booking with what happened downstream.
#[derive(Debug, Clone, Serialize)]
pub struct BookingCreated {
    pub booking: Booking,
    pub plugin_results: TriggerResult,
    pub notifications: FanOutReport,
}

/// Creates bookings and answers availability questions.
#[derive(Debug, Clone)]
pub struct BookingService {
    store: Arc<dyn RecordStore>,
    plugins: Arc<PluginManager>,
    vendors: VendorClients,
}

impl BookingService {
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

    /// Validates, stores, and announces a booking.
    ///
    /// Validation and store failures are returned before any plugin or
    /// vendor is called. After the booking is stored nothing fails the
    /// call: plugin and vendor errors are reported in the result.
    pub async fn create(&self, request: BookingRequest) -> AppResult<BookingCreated> {
        let booking = request.into_booking(booking_reference, Utc::now())?;

        let booking = insert_typed(self.store.as_ref(), BOOKINGS_TABLE, &booking).await?;
        info!(
            reference = %booking.booking_reference,
            vehicle = %booking.vehicle_id,
            "Booking stored"
        );

        let plugin_results = self
            .plugins
            .trigger_hook(&HookPayload::Booking(booking.clone()))
            .await;

        let notifications = self.fan_out(&booking).await;

        Ok(BookingCreated {
            booking,
            plugin_results,
            notifications,
        })
    }

    /// Confirms the booking to the renter and mirrors it to the vendors.
    async fn fan_out(&self, booking: &Booking) -> FanOutReport {
        let active = self.plugins.active_plugins().await;
        let mut report = FanOutReport::new();

        let text = templates::booking_message(booking);
        report
            .notify(
                "whatsapp",
                "booking_confirmation",
                Route::select(&self.vendors.messaging, Some(WHATSAPP_PLUGIN), &active),
                |client| async move { client.send(&booking.phone, &text).await },
            )
            .await;

        report
            .notify(
                "crm",
                "create_booking",
                Route::select(&self.vendors.crm, Some(CRM_PLUGIN), &active),
                |client| async move { client.create_booking(booking).await },
            )
            .await;

        let (subject, body) = templates::booking_email(booking);
        report
            .notify(
                "email",
                "booking_confirmation",
                Route::select(&self.vendors.email, None, &active),
                |client| async move { client.send(&booking.email, &subject, &body).await },
            )
            .await;

        let conversion = templates::booking_conversion(booking);
        report
            .notify(
                "ad_tracking",
                "purchase",
                Route::select(&self.vendors.tracker, Some(AD_TRACKING_PLUGIN), &active),
                |client| async move { client.track(&conversion).await },
            )
            .await;

        report
    }

    /// Asks the CRM whether a vehicle is free for the given dates.
    pub async fn check_availability(
        &self,
        vehicle_id: &str,
        from: &str,
        to: &str,
    ) -> AppResult<Availability> {
        let crm = self.vendors.crm.as_ref().ok_or_else(|| {
            warn!(vehicle = %vehicle_id, "Availability requested but CRM is not configured");
            AppError::configuration("CRM integration is not enabled")
        })?;
        crm.check_availability(vehicle_id, from, to).await
    }
}
