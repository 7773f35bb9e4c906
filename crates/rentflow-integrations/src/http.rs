//! Shared request plumbing for vendor clients.
//!
//! Every vendor call goes through [`VendorHttp`]: fixed base URL, bearer
//! authentication, JSON bodies, a per-request timeout, and one error
//! format, `"<Vendor> API error: <status> - <detail>"`.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use rentflow_core::config::VendorConfig;
use rentflow_core::error::{AppError, AppResult, ErrorKind};

/// Longest error detail kept from a vendor response body.
const MAX_DETAIL_LEN: usize = 200;

/// JSON-over-HTTP client for one vendor.
#[derive(Debug, Clone)]
pub struct VendorHttp {
    vendor: &'static str,
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl VendorHttp {
    pub fn new(
        vendor: &'static str,
        base_url: &str,
        api_key: &str,
        timeout: Duration,
    ) -> AppResult<Self> {
        if base_url.is_empty() {
            return Err(AppError::configuration(format!(
                "{vendor} base URL is not configured"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build {vendor} HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            vendor,
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            timeout,
        })
    }

    /// Builds a bearer-authenticated client from shared vendor settings.
    pub fn from_config(vendor: &'static str, config: &VendorConfig) -> AppResult<Self> {
        if config.api_key.is_empty() {
            return Err(AppError::configuration(format!(
                "{vendor} API key is not configured"
            )));
        }
        Self::new(
            vendor,
            &config.base_url,
            &config.api_key,
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub(crate) fn timeout(&self) -> Duration {
        self.timeout
    }

    /// POSTs `body` to `path` and returns the decoded JSON response.
    /// An empty response body decodes to `null`.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> AppResult<Value> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!(vendor = self.vendor, url = %url, "Calling vendor API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(AppError::vendor(
                self.vendor,
                status.as_u16(),
                error_detail(&text, status.canonical_reason()),
            ));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| {
            AppError::vendor(self.vendor, status.as_u16(), format!("invalid JSON response: {e}"))
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> AppError {
        let detail = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            "connection failed".to_string()
        } else {
            err.to_string()
        };
        AppError::vendor(self.vendor, "network", detail)
    }
}

/// Picks a human-readable detail out of a vendor error body.
///
/// Tries `error.message`, `message`, `error` and `detail`, then the raw
/// body, then the status reason.
pub(crate) fn error_detail(body: &str, reason: Option<&str>) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        let candidates = [
            json.pointer("/error/message"),
            json.get("message"),
            json.get("error"),
            json.get("detail"),
        ];
        if let Some(text) = candidates.into_iter().flatten().find_map(Value::as_str) {
            return text.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return reason.unwrap_or("no response body").to_string();
    }
    trimmed.chars().take(MAX_DETAIL_LEN).collect()
}
