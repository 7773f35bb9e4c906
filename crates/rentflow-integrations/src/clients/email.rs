//! Transactional e-mail client.

use async_trait::async_trait;
use serde_json::{Value, json};

use rentflow_core::config::EmailConfig;
use rentflow_core::error::{AppError, AppResult};

use super::EmailSender;
use crate::http::VendorHttp;

#[derive(Debug, Clone)]
pub struct EmailClient {
    http: VendorHttp,
    from: String,
}

impl EmailClient {
    pub const VENDOR: &'static str = "Email";

    pub fn new(http: VendorHttp, from: impl Into<String>) -> AppResult<Self> {
        let from = from.into();
        if from.is_empty() {
            return Err(AppError::configuration("Email sender address is not configured"));
        }
        Ok(Self { http, from })
    }

    pub fn from_config(config: &EmailConfig) -> AppResult<Self> {
        let http = VendorHttp::from_config(Self::VENDOR, &config.vendor)?;
        Self::new(http, config.from.clone())
    }
}

#[async_trait]
impl EmailSender for EmailClient {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<Value> {
        let request = json!({
            "from": self.from,
            "to": [to],
            "subject": subject,
            "text": body,
        });
        self.http.post("emails", &request).await
    }
}
