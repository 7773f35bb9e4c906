//! Plugin manager: lifecycle of registered plugins and the entry point for
//! triggering hooks.
//!
//! Lifecycle operations (register, activate, deactivate, configuration
//! updates) are serialized by an internal lock. Triggers only take short
//! read locks on the hook table and can run concurrently with each other
//! and with lifecycle operations.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info, warn};

use rentflow_core::error::{AppError, AppResult, ErrorKind};

use crate::hooks::definitions::{HookPayload, HookPoint, TriggerResult};
use crate::hooks::dispatcher::HookDispatcher;
use crate::hooks::registry::HookRegistry;
use crate::registry::{PluginInfo, PluginRegistry, PluginState};
use crate::traits::{Plugin, PluginSettings};

/// Owns the plugin registry and hook table for the process lifetime.
#[derive(Debug)]
pub struct PluginManager {
    plugins: PluginRegistry,
    hooks: Arc<HookRegistry>,
    dispatcher: HookDispatcher,
    lifecycle: Mutex<()>,
}

impl PluginManager {
    pub fn new() -> Self {
        let hooks = Arc::new(HookRegistry::new());
        let dispatcher = HookDispatcher::new(Arc::clone(&hooks));

        Self {
            plugins: PluginRegistry::new(),
            hooks,
            dispatcher,
            lifecycle: Mutex::new(()),
        }
    }

    /// Registers a plugin under `name`.
    ///
    /// Re-registering a name replaces the previous plugin with a warning.
    /// If the replaced plugin was active its subscriptions are dropped and
    /// its cleanup runs; the new plugin starts out registered, not active.
    pub async fn register(&self, name: &str, plugin: Arc<dyn Plugin>, config: PluginSettings) {
        let _guard = self.lifecycle.lock().await;

        if let Some(previous) = self.plugins.insert(name, plugin, config).await {
            warn!(plugin = %name, "Plugin already registered, replacing it");

            if previous.state == PluginState::Active {
                self.hooks.unsubscribe_plugin(name).await;
                if let Err(e) = previous.plugin.cleanup().await {
                    warn!(plugin = %name, error = %e, "Replaced plugin cleanup failed");
                }
            }
        }

        info!(plugin = %name, "Plugin registered");
    }

    /// Activates a registered plugin.
    ///
    /// Runs `init` with the stored configuration, then subscribes the
    /// plugin's handlers behind every handler already subscribed. If `init`
    /// fails nothing is subscribed and the plugin keeps its previous state.
    pub async fn activate(&self, name: &str) -> AppResult<()> {
        let _guard = self.lifecycle.lock().await;

        let Some(entry) = self.plugins.entry(name).await else {
            error!(plugin = %name, "Cannot activate unregistered plugin");
            return Err(AppError::not_found(format!("Plugin '{name}' is not registered")));
        };

        if entry.state == PluginState::Active {
            error!(plugin = %name, "Plugin is already active");
            return Err(AppError::conflict(format!("Plugin '{name}' is already active")));
        }

        if let Err(e) = entry.plugin.init(&entry.config).await {
            error!(plugin = %name, error = %e, "Plugin init failed, activation aborted");
            return Err(AppError::plugin(format!(
                "Plugin '{name}' init failed: {}",
                e.message
            )));
        }

        let handlers = entry.plugin.handlers();
        let hooks: Vec<HookPoint> = handlers.iter().map(|(hook, _)| *hook).collect();
        self.hooks.subscribe_all(name, handlers).await;
        self.plugins.set_state(name, PluginState::Active).await;

        info!(plugin = %name, hooks = ?hooks, "Plugin activated");
        Ok(())
    }

    /// Deactivates an active plugin: unsubscribes its handlers, then runs
    /// `cleanup`. A cleanup failure is logged and does not keep the plugin
    /// active.
    pub async fn deactivate(&self, name: &str) -> AppResult<()> {
        let _guard = self.lifecycle.lock().await;

        let entry = match self.plugins.entry(name).await {
            Some(entry) if entry.state == PluginState::Active => entry,
            Some(_) => {
                error!(plugin = %name, "Cannot deactivate plugin that is not active");
                return Err(AppError::conflict(format!("Plugin '{name}' is not active")));
            }
            None => {
                error!(plugin = %name, "Cannot deactivate unregistered plugin");
                return Err(AppError::not_found(format!("Plugin '{name}' is not registered")));
            }
        };

        let removed = self.hooks.unsubscribe_plugin(name).await;

        if let Err(e) = entry.plugin.cleanup().await {
            warn!(plugin = %name, error = %e, "Plugin cleanup failed");
        }

        self.plugins.set_state(name, PluginState::Inactive).await;
        info!(plugin = %name, subscriptions = removed, "Plugin deactivated");
        Ok(())
    }

    /// Triggers a hook by wire name. See [`HookDispatcher::trigger`].
    pub async fn trigger(&self, hook_name: &str, payload: &HookPayload) -> TriggerResult {
        self.dispatcher.trigger(hook_name, payload).await
    }

    /// Triggers the hook that `payload` belongs to.
    pub async fn trigger_hook(&self, payload: &HookPayload) -> TriggerResult {
        self.dispatcher.dispatch(payload).await
    }

    /// Registered plugin names, sorted.
    pub async fn registered_plugins(&self) -> Vec<String> {
        self.plugins.names().await
    }

    /// Active plugin names in activation order.
    pub async fn active_plugins(&self) -> Vec<String> {
        self.plugins.active().await
    }

    pub async fn plugin_state(&self, name: &str) -> Option<PluginState> {
        self.plugins.state(name).await
    }

    pub async fn plugin_config(&self, name: &str) -> Option<PluginSettings> {
        self.plugins.config(name).await
    }

    pub async fn plugin_infos(&self) -> Vec<PluginInfo> {
        self.plugins.infos().await
    }

    /// Plugins subscribed to `hook`, in dispatch order.
    pub async fn subscribers(&self, hook: HookPoint) -> Vec<String> {
        self.hooks.subscribers(hook).await
    }

    /// Shallow-merges `partial` into the plugin's configuration.
    ///
    /// An active plugin is handed the merged configuration through
    /// `update_config`. If that callback fails the merged configuration is
    /// still stored and the error is returned.
    pub async fn update_plugin_config(
        &self,
        name: &str,
        partial: PluginSettings,
    ) -> AppResult<PluginSettings> {
        let _guard = self.lifecycle.lock().await;

        let Some(merged) = self.plugins.merge_config(name, partial).await else {
            error!(plugin = %name, "Cannot update config of unregistered plugin");
            return Err(AppError::not_found(format!("Plugin '{name}' is not registered")));
        };

        if let Some(entry) = self.plugins.entry(name).await {
            if entry.state == PluginState::Active {
                if let Err(e) = entry.plugin.update_config(&merged).await {
                    warn!(plugin = %name, error = %e, "Plugin rejected config update");
                    return Err(AppError::new(
                        ErrorKind::Plugin,
                        format!("Plugin '{name}' config update failed: {}", e.message),
                    ));
                }
            }
        }

        info!(plugin = %name, "Plugin config updated");
        Ok(merged)
    }

    /// Deactivates every active plugin, most recently activated first.
    pub async fn shutdown(&self) {
        let mut active = self.active_plugins().await;
        active.reverse();

        for name in active {
            if let Err(e) = self.deactivate(&name).await {
                error!(plugin = %name, error = %e, "Error deactivating plugin at shutdown");
            }
        }

        info!("All plugins deactivated");
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}
