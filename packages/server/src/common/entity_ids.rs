//! Typed ID definitions for all domain entities.
//!
//! ```rust
//! use server_core::common::{BookingId, InstructorId};
//!
//! let booking_id = BookingId::new();
//! let instructor_id = InstructorId::new();
//! // let wrong: BookingId = instructor_id; // compile error
//! # let _ = (booking_id, instructor_id);
//! ```

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for User entities (people requesting bookings).
pub struct User;

/// Marker type for Instructor entities.
pub struct Instructor;

/// Marker type for Booking entities.
pub struct Booking;

/// Marker type for sessions assigned to an instructor.
pub struct InstructorSession;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

pub type UserId = Id<User>;

pub type InstructorId = Id<Instructor>;

pub type BookingId = Id<Booking>;

pub type SessionId = Id<InstructorSession>;
