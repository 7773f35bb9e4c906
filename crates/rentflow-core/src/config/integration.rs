//! Vendor client configuration.

use serde::{Deserialize, Serialize};

/// Settings shared by every vendor client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorConfig {
    /// Whether the entry points call this vendor.
    #[serde(default)]
    pub enabled: bool,
    /// API base URL, without trailing slash.
    #[serde(default)]
    pub base_url: String,
    /// API key or bearer token.
    #[serde(default)]
    pub api_key: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for VendorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: String::new(),
            api_key: String::new(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// WhatsApp Business messaging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WhatsAppConfig {
    #[serde(flatten)]
    pub vendor: VendorConfig,
    /// Sending phone number id.
    #[serde(default)]
    pub sender: String,
}

/// Transactional e-mail.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailConfig {
    #[serde(flatten)]
    pub vendor: VendorConfig,
    /// From address on outgoing mail.
    #[serde(default)]
    pub from: String,
    /// Staff inbox notified of new leads.
    #[serde(default)]
    pub notify_address: String,
}

/// Conversion tracking.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdTrackingConfig {
    #[serde(flatten)]
    pub vendor: VendorConfig,
    #[serde(default)]
    pub pixel_id: String,
}

/// All vendor clients.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntegrationsConfig {
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,
    #[serde(default)]
    pub crm: VendorConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub ad_tracking: AdTrackingConfig,
}

fn default_timeout() -> u64 {
    10
}
