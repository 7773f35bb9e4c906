//! # rentflow-plugin
//!
//! Plugin framework for RentFlow. Provides:
//!
//! - Plugin registration and activate/deactivate lifecycle
//! - Hook table with subscriptions in activation order
//! - Sequential hook dispatch with per-plugin failure isolation
//! - Closure-based plugins and handlers

pub mod hooks;
pub mod manager;
pub mod prelude;
pub mod registry;
pub mod traits;

pub use hooks::definitions::{HookOutcome, HookPayload, HookPoint, Outcome, TriggerResult};
pub use hooks::dispatcher::HookDispatcher;
pub use hooks::registry::{HookHandler, HookRegistry};
pub use manager::PluginManager;
pub use registry::{PluginInfo, PluginRegistry, PluginState};
pub use traits::{ClosureHandler, ClosurePlugin, Plugin, PluginSettings};
