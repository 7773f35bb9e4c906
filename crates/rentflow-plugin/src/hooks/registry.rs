//! Hook subscription table. Subscriptions for a hook are kept in the order
//! their plugins were activated; that order is the dispatch order.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use rentflow_core::error::AppResult;

use super::definitions::{HookPayload, HookPoint};

/// A plugin's callback for one hook.
#[async_trait]
pub trait HookHandler: Send + Sync {
    /// Handles one trigger. The returned value is reported back to the
    /// caller of the trigger; an error is captured, never propagated.
    async fn handle(&self, payload: &HookPayload) -> AppResult<Value>;
}

/// One (plugin, handler) pair subscribed to a hook.
#[derive(Clone)]
pub struct Subscription {
    /// Name of the owning plugin.
    pub plugin: String,
    pub handler: Arc<dyn HookHandler>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("plugin", &self.plugin)
            .finish_non_exhaustive()
    }
}

/// Registry of hook subscriptions organized by hook point.
#[derive(Debug, Default)]
pub struct HookRegistry {
    subscriptions: RwLock<HashMap<HookPoint, Vec<Subscription>>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a plugin's handlers to the end of their hooks' lists under a
    /// single write lock, so a concurrent trigger never sees a partially
    /// activated plugin.
    pub async fn subscribe_all(&self, plugin: &str, handlers: Vec<(HookPoint, Arc<dyn HookHandler>)>) {
        let mut table = self.subscriptions.write().await;
        for (hook, handler) in handlers {
            table.entry(hook).or_default().push(Subscription {
                plugin: plugin.to_string(),
                handler,
            });
            debug!(hook = %hook, plugin = %plugin, "Hook subscription added");
        }
    }

    /// Removes every subscription owned by `plugin`. Returns how many were
    /// removed.
    pub async fn unsubscribe_plugin(&self, plugin: &str) -> usize {
        let mut table = self.subscriptions.write().await;
        let mut removed = 0;

        for entries in table.values_mut() {
            let before = entries.len();
            entries.retain(|s| s.plugin != plugin);
            removed += before - entries.len();
        }
        table.retain(|_, entries| !entries.is_empty());

        debug!(plugin = %plugin, removed, "Hook subscriptions removed");
        removed
    }

    /// Snapshot of a hook's subscriptions, in dispatch order.
    pub async fn subscriptions(&self, hook: HookPoint) -> Vec<Subscription> {
        let table = self.subscriptions.read().await;
        table.get(&hook).cloned().unwrap_or_default()
    }

    /// Plugin names subscribed to a hook, in dispatch order.
    pub async fn subscribers(&self, hook: HookPoint) -> Vec<String> {
        let table = self.subscriptions.read().await;
        table
            .get(&hook)
            .map(|entries| entries.iter().map(|s| s.plugin.clone()).collect())
            .unwrap_or_default()
    }
}
