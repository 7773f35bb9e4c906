//! Prelude for plugin implementations.

pub use async_trait::async_trait;
pub use serde_json::Value;

pub use rentflow_core::error::{AppError, AppResult};

pub use crate::hooks::definitions::{HookPayload, HookPoint};
pub use crate::hooks::registry::HookHandler;
pub use crate::traits::{Plugin, PluginSettings};
