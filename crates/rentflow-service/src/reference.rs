//! Booking reference generation.

use chrono::Utc;

/// Generates a reference: `RF`, the last six digits of the current epoch
/// milliseconds, and a four-digit random suffix.
///
/// References are not guaranteed unique; two bookings in the same
/// millisecond collide with probability 1 in 10 000.
pub fn booking_reference() -> String {
    format_reference(Utc::now().timestamp_millis(), rand::random_range(0..10_000))
}

fn format_reference(epoch_millis: i64, suffix: u32) -> String {
    format!("RF{:06}{:04}", epoch_millis.rem_euclid(1_000_000), suffix % 10_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pads_both_parts() {
        assert_eq!(format_reference(1_717_000_012_345, 7), "RF0123450007");
        assert_eq!(format_reference(1_717_000_999_999, 9999), "RF9999999999");
    }

    #[test]
    fn test_generated_shape() {
        let reference = booking_reference();
        assert_eq!(reference.len(), 12);
        assert!(reference.starts_with("RF"));
        assert!(reference[2..].chars().all(|c| c.is_ascii_digit()));
    }
}
