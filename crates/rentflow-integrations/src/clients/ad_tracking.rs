//! Server-side conversion tracking client.
//!
//! Events are posted to `<base_url>/<pixel_id>/events` in the conversions
//! API shape: one event per request, timestamped at send time.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value, json};

use rentflow_core::config::AdTrackingConfig;
use rentflow_core::error::{AppError, AppResult};
use rentflow_core::records::AdTrack;

use super::ConversionTracker;
use crate::http::VendorHttp;

#[derive(Debug, Clone)]
pub struct AdTrackingClient {
    http: VendorHttp,
    pixel_id: String,
}

impl AdTrackingClient {
    pub const VENDOR: &'static str = "Ad tracking";

    pub fn new(http: VendorHttp, pixel_id: impl Into<String>) -> AppResult<Self> {
        let pixel_id = pixel_id.into();
        if pixel_id.is_empty() {
            return Err(AppError::configuration("Ad tracking pixel id is not configured"));
        }
        Ok(Self { http, pixel_id })
    }

    pub fn from_config(config: &AdTrackingConfig) -> AppResult<Self> {
        let http = VendorHttp::from_config(Self::VENDOR, &config.vendor)?;
        Self::new(http, config.pixel_id.clone())
    }
}

#[async_trait]
impl ConversionTracker for AdTrackingClient {
    async fn track(&self, event: &AdTrack) -> AppResult<Value> {
        let body = json!({
            "data": [{
                "event_name": event.event,
                "event_time": Utc::now().timestamp(),
                "action_source": "website",
                "custom_data": custom_data(event),
            }]
        });
        self.http
            .post(&format!("{}/events", self.pixel_id), &body)
            .await
    }
}

/// Metadata plus `value`/`currency` when set; explicit fields win.
fn custom_data(event: &AdTrack) -> Map<String, Value> {
    let mut data = event.metadata.clone();
    if let Some(value) = event.value {
        data.insert("value".to_string(), json!(value));
    }
    if let Some(currency) = &event.currency {
        data.insert("currency".to_string(), json!(currency));
    }
    data
}
