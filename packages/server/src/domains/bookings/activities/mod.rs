//! Bookings domain activities - entry-point business logic

pub mod accept;
pub mod queries;
pub mod request;

pub use accept::accept_booking;
pub use queries::{
    booking_status, delete_booking, get_booking, list_assigned, list_for_instructor, list_for_user,
};
pub use request::request_booking;
