pub mod bookings;
pub mod instructors;
pub mod matching;
pub mod notifications;
pub mod users;
