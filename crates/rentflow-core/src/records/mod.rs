//! Domain records carried through ingestion and hook dispatch.
//!
//! Inbound requests (`BookingRequest`, `LeadRequest`) hold optional fields
//! so a missing field is reported as a validation error instead of a
//! decode failure. Persisted records (`Booking`, `Lead`) are built from a
//! validated request.

pub mod booking;
pub mod events;
pub mod lead;

pub use booking::{Booking, BookingRequest};
pub use events::{AdTrack, Message, Payment, Task, VehicleUpdate};
pub use lead::{Lead, LeadRequest};

/// Table holding persisted bookings.
pub const BOOKINGS_TABLE: &str = "bookings";
/// Table holding persisted leads.
pub const LEADS_TABLE: &str = "leads";
