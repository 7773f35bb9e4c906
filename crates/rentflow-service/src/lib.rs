//! # rentflow-service
//!
//! Ingestion services for RentFlow. A booking or lead is validated,
//! persisted, announced to the subscribed plugins, and then fanned out to
//! the directly-configured vendor clients.
//!
//! Services follow constructor injection: the record store, plugin manager
//! and vendor clients are provided at construction time via `Arc`.

pub mod booking;
pub mod fanout;
pub mod lead;
pub mod reference;

#[cfg(test)]
pub(crate) mod testing;

pub use booking::{BookingCreated, BookingService};
pub use fanout::{DeliveryStatus, FanOutReport, Notification, Route};
pub use lead::{LeadCreated, LeadService};
pub use reference::booking_reference;
