//! Hook dispatcher.
//!
//! Handlers for one trigger run one after another in subscription order.
//! Each handler is isolated: an error or a panic becomes an error outcome
//! for that plugin and the next handler still runs. Dispatch never fails.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{debug, error, warn};

use super::definitions::{HookOutcome, HookPayload, HookPoint, TriggerResult};
use super::registry::HookRegistry;

/// Dispatches hooks to subscribed handlers.
#[derive(Debug, Clone)]
pub struct HookDispatcher {
    registry: Arc<HookRegistry>,
}

impl HookDispatcher {
    pub fn new(registry: Arc<HookRegistry>) -> Self {
        Self { registry }
    }

    /// Triggers a hook by wire name.
    ///
    /// An unknown name, or a payload that belongs to a different hook, is
    /// logged and yields an empty result.
    pub async fn trigger(&self, hook_name: &str, payload: &HookPayload) -> TriggerResult {
        let Some(hook) = HookPoint::parse(hook_name) else {
            error!(hook = %hook_name, "Trigger for unknown hook ignored");
            return Vec::new();
        };

        if payload.hook() != hook {
            error!(
                hook = %hook,
                payload_hook = %payload.hook(),
                "Trigger payload does not match hook, ignored"
            );
            return Vec::new();
        }

        self.dispatch(payload).await
    }

    /// Runs every subscription of the payload's hook, in order.
    pub async fn dispatch(&self, payload: &HookPayload) -> TriggerResult {
        let hook = payload.hook();
        let subscriptions = self.registry.subscriptions(hook).await;

        if subscriptions.is_empty() {
            debug!(hook = %hook, "No subscribers for hook");
            return Vec::new();
        }

        debug!(hook = %hook, subscribers = subscriptions.len(), "Dispatching hook");

        let mut results = Vec::with_capacity(subscriptions.len());
        for subscription in &subscriptions {
            let call = AssertUnwindSafe(subscription.handler.handle(payload)).catch_unwind();

            let outcome = match call.await {
                Ok(Ok(value)) => HookOutcome::success(&subscription.plugin, value),
                Ok(Err(e)) => {
                    warn!(
                        hook = %hook,
                        plugin = %subscription.plugin,
                        error = %e.message,
                        "Hook handler failed"
                    );
                    HookOutcome::failure(&subscription.plugin, e.message)
                }
                Err(panic) => {
                    let message = panic_message(panic.as_ref());
                    error!(
                        hook = %hook,
                        plugin = %subscription.plugin,
                        panic = %message,
                        "Hook handler panicked"
                    );
                    HookOutcome::failure(&subscription.plugin, message)
                }
            };
            results.push(outcome);
        }

        results
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("handler panicked: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("handler panicked: {s}")
    } else {
        "handler panicked".to_string()
    }
}
