//! Shared test helpers for integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use rentflow_api::{AppState, build_app};
use rentflow_core::config::AppConfig;
use rentflow_core::error::{AppError, AppResult};
use rentflow_core::records::{Booking, Lead};
use rentflow_database::MemoryRecordStore;
use rentflow_integrations::{Availability, CrmClient, VendorClients};
use rentflow_plugin::PluginManager;

/// Shared secret configured for every test app.
pub const API_KEY: &str = "test-secret";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    pub plugins: Arc<PluginManager>,
    pub store: Arc<MemoryRecordStore>,
}

impl TestApp {
    /// App with an in-memory store and no vendor clients.
    pub fn new() -> Self {
        Self::with_vendors(VendorClients::default())
    }

    pub fn with_vendors(vendors: VendorClients) -> Self {
        let mut config = AppConfig::default();
        config.plugins.api_key = API_KEY.to_string();

        let store = Arc::new(MemoryRecordStore::new());
        let plugins = Arc::new(PluginManager::new());
        let state = AppState::new(config, store.clone(), plugins.clone(), vendors);

        Self {
            router: build_app(state),
            plugins,
            store,
        }
    }

    /// Sends a request and returns the status and decoded JSON body
    /// (`null` for an empty body).
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    /// Sends a raw, possibly malformed, JSON body.
    pub async fn post_raw(&self, uri: &str, body: &str) -> StatusCode {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.router.clone().oneshot(request).await.unwrap().status()
    }
}

/// A complete booking body.
pub fn booking_body() -> Value {
    json!({
        "vehicle_id": "vw-golf-01",
        "pickup_date": "2026-07-01",
        "return_date": "2026-07-08",
        "pickup_location": "Munich Airport",
        "return_location": "Munich Central",
        "first_name": "Jane",
        "last_name": "Doe",
        "email": "jane@x.com",
        "phone": "+49 171 5550100"
    })
}

/// CRM fake answering availability from a fixed list of booked vehicles.
#[derive(Debug, Default)]
pub struct FakeCrm {
    pub booked: Vec<String>,
    pub leads: Mutex<Vec<String>>,
}

#[async_trait]
impl CrmClient for FakeCrm {
    async fn create_lead(&self, lead: &Lead) -> AppResult<Value> {
        self.leads.lock().unwrap().push(lead.email.clone());
        Ok(json!({ "id": "crm-lead-1" }))
    }

    async fn create_booking(&self, _booking: &Booking) -> AppResult<Value> {
        Err(AppError::vendor("CRM", 503, "maintenance"))
    }

    async fn check_availability(
        &self,
        vehicle_id: &str,
        _from: &str,
        _to: &str,
    ) -> AppResult<Availability> {
        let booked = self.booked.iter().any(|v| v == vehicle_id);
        Ok(Availability {
            vehicle_id: vehicle_id.to_string(),
            available: !booked,
            alternatives: if booked { vec!["vw-polo-02".to_string()] } else { Vec::new() },
        })
    }
}
