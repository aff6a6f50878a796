//! Bookings domain - requests, first-come-first-served assignment, and
//! the dashboards built on top of them.

pub mod activities;
pub mod data;
pub mod models;

// Re-export data types (API types)
pub use data::{
    BookingCreatedData, BookingData, BookingStatusData, BookingWithInstructorData,
    RequestBookingInput,
};

// Re-export models (domain models)
pub use models::{Booking, BookingStatus};
