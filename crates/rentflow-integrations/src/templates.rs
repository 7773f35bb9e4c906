//! Notification texts and conversion events derived from records.
//!
//! Shared by the vendor plugins and the ingestion fan-out so a renter gets
//! the same wording whichever path sends it.

use serde_json::{Map, json};

use rentflow_core::records::{AdTrack, Booking, Lead};

/// Chat message confirming a booking was received.
pub fn booking_message(booking: &Booking) -> String {
    format!(
        "Hi {}, thanks for booking with us! Reference {}: vehicle {} from {} ({}) to {} ({}). \
         We will be in touch shortly to confirm.",
        booking.first_name,
        booking.booking_reference,
        booking.vehicle_id,
        booking.pickup_date,
        booking.pickup_location,
        booking.return_date,
        booking.return_location,
    )
}

/// Confirmation e-mail to the renter as `(subject, body)`.
pub fn booking_email(booking: &Booking) -> (String, String) {
    let subject = format!("Booking {} received", booking.booking_reference);

    let mut body = format!(
        "Dear {},\n\n\
         We have received your booking.\n\n\
         Reference: {}\n\
         Vehicle: {}\n\
         Pick-up: {} at {}\n\
         Return: {} at {}\n",
        booking.renter_name(),
        booking.booking_reference,
        booking.vehicle_id,
        booking.pickup_date,
        booking.pickup_location,
        booking.return_date,
        booking.return_location,
    );
    if let Some(price) = booking.total_price {
        let currency = booking.currency.as_deref().unwrap_or("EUR");
        body.push_str(&format!("Total: {price:.2} {currency}\n"));
    }
    if !booking.extras.is_empty() {
        body.push_str(&format!("Extras: {}\n", booking.extras.join(", ")));
    }
    body.push_str("\nWe will confirm availability shortly.\n");

    (subject, body)
}

/// Chat acknowledgement sent to a lead with a phone number.
pub fn lead_message(lead: &Lead) -> String {
    format!(
        "Hi {}, thanks for your enquiry! One of our team will get back to you soon.",
        lead.name
    )
}

/// Internal notification about a new lead as `(subject, body)`.
pub fn lead_email(lead: &Lead) -> (String, String) {
    let subject = format!("New lead: {}", lead.name);
    let body = format!(
        "Name: {}\nEmail: {}\nPhone: {}\nVehicle: {}\nSource: {}\n\n{}\n",
        lead.name,
        lead.email,
        lead.phone.as_deref().unwrap_or("-"),
        lead.vehicle_id.as_deref().unwrap_or("-"),
        lead.source,
        lead.message.as_deref().unwrap_or(""),
    );
    (subject, body)
}

/// `Purchase` conversion for a booking.
pub fn booking_conversion(booking: &Booking) -> AdTrack {
    let mut metadata = Map::new();
    metadata.insert("order_id".to_string(), json!(booking.booking_reference));
    metadata.insert("content_ids".to_string(), json!([booking.vehicle_id]));
    metadata.insert("content_type".to_string(), json!("vehicle"));

    AdTrack {
        event: "Purchase".to_string(),
        value: booking.total_price,
        currency: booking.currency.clone(),
        metadata,
    }
}

/// `Lead` conversion for a lead.
pub fn lead_conversion(lead: &Lead) -> AdTrack {
    let mut metadata = Map::new();
    metadata.insert("lead_source".to_string(), json!(lead.source));
    if let Some(vehicle_id) = &lead.vehicle_id {
        metadata.insert("content_ids".to_string(), json!([vehicle_id]));
    }

    AdTrack {
        event: "Lead".to_string(),
        value: None,
        currency: None,
        metadata,
    }
}
