//! WhatsApp Business Cloud API client.

use async_trait::async_trait;
use serde_json::{Value, json};

use rentflow_core::config::WhatsAppConfig;
use rentflow_core::error::{AppError, AppResult};

use super::MessagingClient;
use crate::http::VendorHttp;

/// Sends text messages from one business phone number.
#[derive(Debug, Clone)]
pub struct WhatsAppClient {
    http: VendorHttp,
    /// Phone number id messages are sent from.
    sender: String,
}

impl WhatsAppClient {
    pub const VENDOR: &'static str = "WhatsApp";

    pub fn new(http: VendorHttp, sender: impl Into<String>) -> AppResult<Self> {
        let sender = sender.into();
        if sender.is_empty() {
            return Err(AppError::configuration(
                "WhatsApp sender phone number id is not configured",
            ));
        }
        Ok(Self { http, sender })
    }

    pub fn from_config(config: &WhatsAppConfig) -> AppResult<Self> {
        let http = VendorHttp::from_config(Self::VENDOR, &config.vendor)?;
        Self::new(http, config.sender.clone())
    }
}

#[async_trait]
impl MessagingClient for WhatsAppClient {
    async fn send(&self, to: &str, message: &str) -> AppResult<Value> {
        let to = normalize_phone(to);
        if to.is_empty() {
            return Err(AppError::validation("WhatsApp recipient has no digits"));
        }

        let body = json!({
            "messaging_product": "whatsapp",
            "recipient_type": "individual",
            "to": to,
            "type": "text",
            "text": { "preview_url": false, "body": message },
        });
        self.http
            .post(&format!("{}/messages", self.sender), &body)
            .await
    }
}

/// Reduces a phone number to the digits the API expects.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("+49 (0)171-555 0100"), "4901715550100");
        assert_eq!(normalize_phone("n/a"), "");
    }

    #[test]
    fn test_sender_required() {
        let mut config = WhatsAppConfig::default();
        config.vendor.base_url = "https://graph.facebook.com/v19.0".to_string();
        config.vendor.api_key = "token".to_string();
        let err = WhatsAppClient::from_config(&config).unwrap_err();
        assert!(err.message.contains("sender"));

        config.sender = "1234567890".to_string();
        assert!(WhatsAppClient::from_config(&config).is_ok());
    }
}
