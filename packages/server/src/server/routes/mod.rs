// HTTP routes
pub mod bookings;
pub mod health;
pub mod instructors;
pub mod users;

pub use health::*;

use crate::common::{BookingError, BookingResult, Id};

/// Parse a typed id from a path or body value
pub(crate) fn parse_id<T>(raw: &str, field: &str) -> BookingResult<Id<T>> {
    Id::parse(raw.trim())
        .map_err(|_| BookingError::InvalidRequest(format!("'{}' is not a valid {}", raw, field)))
}
