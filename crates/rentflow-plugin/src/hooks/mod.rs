//! Hook system: subscription table, dispatcher, and typed hook definitions.

pub mod definitions;
pub mod dispatcher;
pub mod registry;

pub use definitions::{HookOutcome, HookPayload, HookPoint, Outcome, TriggerResult};
pub use dispatcher::HookDispatcher;
pub use registry::{HookHandler, HookRegistry, Subscription};
