// Common types and utilities shared across the application

pub mod entity_ids;
pub mod errors;
pub mod id;
pub mod schedule;
pub mod types;

pub use entity_ids::*;
pub use errors::{BookingError, BookingResult};
pub use id::Id;
pub use schedule::{parse_date, Day, ScheduleError, TimeOfDay, TimeWindow};
