//! Users domain - the people who request bookings.
//!
//! Authentication lives elsewhere; this domain only keeps the contact
//! details bookings and notifications need.

pub mod activities;
pub mod models;

pub use models::user::User;
