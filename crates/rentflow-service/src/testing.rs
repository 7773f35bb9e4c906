//! Fakes shared by the service tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use rentflow_core::error::{AppError, AppResult};
use rentflow_core::records::{AdTrack, Booking, Lead};
use rentflow_core::traits::{Record, RecordStore};
use rentflow_integrations::{
    Availability, ConversionTracker, CrmClient, EmailSender, MessagingClient, VendorClients,
};

/// One fake standing in for every vendor. Calls are recorded as
/// `"<method>:<detail>"`.
#[derive(Debug, Default)]
pub struct FakeVendor {
    pub fail: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeVendor {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> AppResult<Value> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            return Err(AppError::vendor("Fake", 502, "bad gateway"));
        }
        Ok(json!({ "ok": true }))
    }
}

#[async_trait]
impl MessagingClient for FakeVendor {
    async fn send(&self, to: &str, _message: &str) -> AppResult<Value> {
        self.record(format!("message:{to}"))
    }
}

#[async_trait]
impl CrmClient for FakeVendor {
    async fn create_lead(&self, lead: &Lead) -> AppResult<Value> {
        self.record(format!("crm_lead:{}", lead.email))
    }

    async fn create_booking(&self, booking: &Booking) -> AppResult<Value> {
        self.record(format!("crm_booking:{}", booking.booking_reference))
    }

    async fn check_availability(
        &self,
        vehicle_id: &str,
        from: &str,
        to: &str,
    ) -> AppResult<Availability> {
        self.record(format!("availability:{vehicle_id}:{from}:{to}"))?;
        Ok(Availability {
            vehicle_id: vehicle_id.to_string(),
            available: vehicle_id != "booked-out",
            alternatives: Vec::new(),
        })
    }
}

#[async_trait]
impl EmailSender for FakeVendor {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> AppResult<Value> {
        self.record(format!("email:{to}:{subject}"))
    }
}

#[async_trait]
impl ConversionTracker for FakeVendor {
    async fn track(&self, event: &AdTrack) -> AppResult<Value> {
        self.record(format!("track:{}", event.event))
    }
}

/// Every vendor routed to `fake`, with a staff inbox configured.
pub fn vendors(fake: &Arc<FakeVendor>) -> VendorClients {
    VendorClients {
        messaging: Some(fake.clone()),
        crm: Some(fake.clone()),
        email: Some(fake.clone()),
        tracker: Some(fake.clone()),
        notify_address: Some("sales@example.com".to_string()),
    }
}

/// A store whose every operation fails.
#[derive(Debug, Default)]
pub struct BrokenStore;

#[async_trait]
impl RecordStore for BrokenStore {
    async fn insert(&self, table: &str, _record: Record) -> AppResult<Record> {
        Err(AppError::database(format!("insert into '{table}' failed")))
    }

    async fn update(&self, table: &str, _filter: &Record, _patch: Record) -> AppResult<u64> {
        Err(AppError::database(format!("update of '{table}' failed")))
    }

    async fn query(&self, table: &str, _filter: &Record) -> AppResult<Vec<Record>> {
        Err(AppError::database(format!("query of '{table}' failed")))
    }
}
