//! Direct vendor notifications after a booking or lead is stored.
//!
//! Every call is isolated: an error or panic is recorded in the
//! [`FanOutReport`] and logged, and the next vendor is still called.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use rentflow_core::error::AppResult;

/// Result of one vendor notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Sent,
    Failed,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub vendor: String,
    pub action: String,
    pub status: DeliveryStatus,
    /// Error message or skip reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// How a notification reaches its vendor.
pub enum Route<T: ?Sized> {
    /// Call the configured client.
    Direct(Arc<T>),
    /// An active plugin already delivers this vendor's notifications.
    Plugin(String),
    /// The vendor is not configured.
    Disabled,
}

impl<T: ?Sized> Route<T> {
    /// Prefers an active plugin named `plugin` over the direct client.
    pub fn select(client: &Option<Arc<T>>, plugin: Option<&str>, active: &[String]) -> Self {
        if let Some(name) = plugin.filter(|name| active.iter().any(|a| a == name)) {
            return Self::Plugin(name.to_string());
        }
        match client {
            Some(client) => Self::Direct(Arc::clone(client)),
            None => Self::Disabled,
        }
    }
}

/// Outcome of every notification attempted for one record, in call order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FanOutReport {
    notifications: Vec<Notification>,
}

impl FanOutReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sends one notification along `route`.
    pub async fn notify<T, F, Fut>(&mut self, vendor: &str, action: &str, route: Route<T>, call: F)
    where
        T: ?Sized,
        F: FnOnce(Arc<T>) -> Fut,
        Fut: Future<Output = AppResult<Value>>,
    {
        let client = match route {
            Route::Direct(client) => client,
            Route::Plugin(plugin) => {
                self.skip(vendor, action, format!("delivered by plugin '{plugin}'"));
                return;
            }
            Route::Disabled => {
                self.skip(vendor, action, "not configured");
                return;
            }
        };

        let (status, detail) = match AssertUnwindSafe(call(client)).catch_unwind().await {
            Ok(Ok(_)) => {
                info!(vendor, action, "Vendor notification sent");
                (DeliveryStatus::Sent, None)
            }
            Ok(Err(e)) => {
                warn!(vendor, action, error = %e, "Vendor notification failed");
                (DeliveryStatus::Failed, Some(e.message))
            }
            Err(_) => {
                error!(vendor, action, "Vendor notification panicked");
                (DeliveryStatus::Failed, Some(format!("{vendor} client panicked")))
            }
        };
        self.push(vendor, action, status, detail);
    }

    /// Records a notification that was not attempted.
    pub fn skip(&mut self, vendor: &str, action: &str, reason: impl Into<String>) {
        self.push(vendor, action, DeliveryStatus::Skipped, Some(reason.into()));
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn count(&self, status: DeliveryStatus) -> usize {
        self.notifications
            .iter()
            .filter(|n| n.status == status)
            .count()
    }

    pub fn status_of(&self, vendor: &str) -> Option<DeliveryStatus> {
        self.notifications
            .iter()
            .find(|n| n.vendor == vendor)
            .map(|n| n.status)
    }

    fn push(&mut self, vendor: &str, action: &str, status: DeliveryStatus, detail: Option<String>) {
        self.notifications.push(Notification {
            vendor: vendor.to_string(),
            action: action.to_string(),
            status,
            detail,
        });
    }
}
