//! Plugin registry: named plugin entries with their configuration and
//! lifecycle state, plus the ordered list of active plugins.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::hooks::definitions::HookPoint;
use crate::traits::{Plugin, PluginSettings};

/// Lifecycle state of a registered plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginState {
    /// Registered and never activated.
    Registered,
    /// Handlers are subscribed.
    Active,
    /// Deactivated after having been active.
    Inactive,
}

/// Inspection view of a plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginInfo {
    pub name: String,
    pub description: String,
    pub state: PluginState,
    /// Hooks the plugin declares handlers for.
    pub hooks: Vec<HookPoint>,
}

#[derive(Debug, Clone)]
pub(crate) struct PluginEntry {
    pub plugin: Arc<dyn Plugin>,
    pub config: PluginSettings,
    pub state: PluginState,
}

#[derive(Debug, Default)]
struct Tables {
    entries: BTreeMap<String, PluginEntry>,
    /// Active plugin names in activation order.
    active: Vec<String>,
}

/// Storage for registered plugins.
///
/// Holds no lifecycle logic; [`PluginManager`](crate::PluginManager) drives
/// state transitions and keeps the hook table in step.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    tables: RwLock<Tables>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a plugin in the `Registered` state, returning the entry it
    /// replaced. A replaced active plugin leaves the active list.
    pub(crate) async fn insert(
        &self,
        name: &str,
        plugin: Arc<dyn Plugin>,
        config: PluginSettings,
    ) -> Option<PluginEntry> {
        let mut tables = self.tables.write().await;
        tables.active.retain(|n| n != name);
        tables.entries.insert(
            name.to_string(),
            PluginEntry {
                plugin,
                config,
                state: PluginState::Registered,
            },
        )
    }

    pub(crate) async fn entry(&self, name: &str) -> Option<PluginEntry> {
        let tables = self.tables.read().await;
        tables.entries.get(name).cloned()
    }

    /// Sets the plugin's state and keeps the active list in step.
    /// Returns `false` if the plugin is not registered.
    pub(crate) async fn set_state(&self, name: &str, state: PluginState) -> bool {
        let mut tables = self.tables.write().await;
        let Some(entry) = tables.entries.get_mut(name) else {
            return false;
        };
        entry.state = state;

        tables.active.retain(|n| n != name);
        if state == PluginState::Active {
            tables.active.push(name.to_string());
        }
        true
    }

    /// Shallow-merges `partial` into the stored configuration and returns
    /// the merged result.
    pub(crate) async fn merge_config(
        &self,
        name: &str,
        partial: PluginSettings,
    ) -> Option<PluginSettings> {
        let mut tables = self.tables.write().await;
        let entry = tables.entries.get_mut(name)?;
        for (key, value) in partial {
            entry.config.insert(key, value);
        }
        Some(entry.config.clone())
    }

    pub async fn state(&self, name: &str) -> Option<PluginState> {
        self.tables.read().await.entries.get(name).map(|e| e.state)
    }

    pub async fn config(&self, name: &str) -> Option<PluginSettings> {
        self.tables
            .read()
            .await
            .entries
            .get(name)
            .map(|e| e.config.clone())
    }

    /// Registered plugin names, sorted.
    pub async fn names(&self) -> Vec<String> {
        self.tables.read().await.entries.keys().cloned().collect()
    }

    /// Active plugin names in activation order.
    pub async fn active(&self) -> Vec<String> {
        self.tables.read().await.active.clone()
    }

    pub async fn infos(&self) -> Vec<PluginInfo> {
        let tables = self.tables.read().await;
        tables
            .entries
            .iter()
            .map(|(name, entry)| PluginInfo {
                name: name.clone(),
                description: entry.plugin.description().to_string(),
                state: entry.state,
                hooks: entry.plugin.handlers().into_iter().map(|(h, _)| h).collect(),
            })
            .collect()
    }
}
