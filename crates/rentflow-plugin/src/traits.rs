//! The plugin trait, plus closure-based handlers and plugins for quick
//! integrations and tests.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use rentflow_core::error::AppResult;

use crate::hooks::definitions::{HookPayload, HookPoint};
use crate::hooks::registry::HookHandler;

/// Plugin configuration: a JSON object of arbitrary settings.
pub type PluginSettings = Map<String, Value>;

/// A named, configurable integration.
///
/// Only [`Plugin::handlers`] is required. The lifecycle callbacks default to
/// no-ops, which the registry treats the same as an absent callback.
#[async_trait]
pub trait Plugin: Send + Sync + std::fmt::Debug {
    /// Handlers to subscribe on activation, one per hook at most.
    ///
    /// Called on every activation, so handlers may capture state the plugin
    /// rebuilt in [`Plugin::init`].
    fn handlers(&self) -> Vec<(HookPoint, Arc<dyn HookHandler>)>;

    /// Short human-readable description.
    fn description(&self) -> &str {
        ""
    }

    /// Called on activation, before any handler is subscribed.
    async fn init(&self, _config: &PluginSettings) -> AppResult<()> {
        Ok(())
    }

    /// Called on deactivation, after the handlers are unsubscribed.
    async fn cleanup(&self) -> AppResult<()> {
        Ok(())
    }

    /// Called with the merged configuration when an active plugin's
    /// configuration changes.
    async fn update_config(&self, _config: &PluginSettings) -> AppResult<()> {
        Ok(())
    }
}

type BoxedHandlerFn = Arc<
    dyn Fn(HookPayload) -> Pin<Box<dyn Future<Output = AppResult<Value>> + Send>> + Send + Sync,
>;

/// A hook handler backed by an async closure.
///
/// The closure receives an owned copy of the payload.
#[derive(Clone)]
pub struct ClosureHandler {
    handler: BoxedHandlerFn,
}

impl std::fmt::Debug for ClosureHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClosureHandler")
            .field("handler", &"<closure>")
            .finish()
    }
}

impl ClosureHandler {
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(HookPayload) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<Value>> + Send + 'static,
    {
        Self {
            handler: Arc::new(move |payload| Box::pin(handler(payload))),
        }
    }
}

#[async_trait]
impl HookHandler for ClosureHandler {
    async fn handle(&self, payload: &HookPayload) -> AppResult<Value> {
        (self.handler)(payload.clone()).await
    }
}

type SettingsFn = Arc<dyn Fn(&PluginSettings) -> AppResult<()> + Send + Sync>;
type CleanupFn = Arc<dyn Fn() -> AppResult<()> + Send + Sync>;

/// A plugin assembled from closures.
///
/// ```ignore
/// let plugin = ClosurePlugin::new("Echo bookings")
///     .on(HookPoint::OnBooking, |payload| async move { Ok(payload.to_json()) });
/// ```
#[derive(Clone, Default)]
pub struct ClosurePlugin {
    description: String,
    handlers: Vec<(HookPoint, Arc<dyn HookHandler>)>,
    init: Option<SettingsFn>,
    cleanup: Option<CleanupFn>,
    update_config: Option<SettingsFn>,
}

impl std::fmt::Debug for ClosurePlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hooks: Vec<HookPoint> = self.handlers.iter().map(|(hook, _)| *hook).collect();
        f.debug_struct("ClosurePlugin")
            .field("description", &self.description)
            .field("hooks", &hooks)
            .field("init", &self.init.is_some())
            .field("cleanup", &self.cleanup.is_some())
            .field("update_config", &self.update_config.is_some())
            .finish()
    }
}

impl ClosurePlugin {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// Adds a handler for `hook`. A second handler for the same hook
    /// replaces the first.
    pub fn on<F, Fut>(mut self, hook: HookPoint, handler: F) -> Self
    where
        F: Fn(HookPayload) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<Value>> + Send + 'static,
    {
        self.handlers.retain(|(existing, _)| *existing != hook);
        self.handlers
            .push((hook, Arc::new(ClosureHandler::new(handler))));
        self
    }

    pub fn with_init<F>(mut self, init: F) -> Self
    where
        F: Fn(&PluginSettings) -> AppResult<()> + Send + Sync + 'static,
    {
        self.init = Some(Arc::new(init));
        self
    }

    pub fn with_cleanup<F>(mut self, cleanup: F) -> Self
    where
        F: Fn() -> AppResult<()> + Send + Sync + 'static,
    {
        self.cleanup = Some(Arc::new(cleanup));
        self
    }

    pub fn with_update_config<F>(mut self, update: F) -> Self
    where
        F: Fn(&PluginSettings) -> AppResult<()> + Send + Sync + 'static,
    {
        self.update_config = Some(Arc::new(update));
        self
    }
}

#[async_trait]
impl Plugin for ClosurePlugin {
    fn handlers(&self) -> Vec<(HookPoint, Arc<dyn HookHandler>)> {
        self.handlers.clone()
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn init(&self, config: &PluginSettings) -> AppResult<()> {
        match &self.init {
            Some(init) => init(config),
            None => Ok(()),
        }
    }

    async fn cleanup(&self) -> AppResult<()> {
        match &self.cleanup {
            Some(cleanup) => cleanup(),
            None => Ok(()),
        }
    }

    async fn update_config(&self, config: &PluginSettings) -> AppResult<()> {
        match &self.update_config {
            Some(update) => update(config),
            None => Ok(()),
        }
    }
}
