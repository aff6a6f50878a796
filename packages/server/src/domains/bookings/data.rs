use serde::{Deserialize, Serialize};

use crate::common::types::deserialize_optional_weeks;
use crate::common::{BookingId, InstructorId, UserId};
use crate::domains::bookings::models::{Booking, BookingStatus};
use crate::domains::instructors::InstructorSummary;

/// API representation of a booking
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingData {
    pub id: BookingId,
    pub user_id: UserId,
    pub date: String,
    pub city: String,
    pub area: String,
    pub course_name: String,
    pub duration_weeks: i32,
    pub start: String,
    pub end: String,
    pub status: BookingStatus,
    pub instructor_id: Option<InstructorId>,
    pub created_at: String,
}

impl From<Booking> for BookingData {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            user_id: booking.user_id,
            date: booking.booking_date.to_string(),
            city: booking.city,
            area: booking.area,
            course_name: booking.course_name,
            duration_weeks: booking.duration_weeks,
            start: booking.start_time.into(),
            end: booking.end_time.into(),
            status: booking.status,
            instructor_id: booking.instructor_id,
            created_at: booking.created_at.to_rfc3339(),
        }
    }
}

/// Booking with its assigned instructor populated
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingWithInstructorData {
    #[serde(flatten)]
    pub booking: BookingData,
    pub instructor: Option<InstructorSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingStatusData {
    pub status: BookingStatus,
    pub instructor: Option<InstructorSummary>,
}

/// Booking request body. Every field is required; they are optional here so
/// a missing one becomes a clear `InvalidRequest` instead of a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBookingInput {
    pub user_id: Option<String>,
    pub date: Option<String>,
    pub city: Option<String>,
    pub area: Option<String>,
    pub course_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_weeks")]
    pub duration_weeks: Option<i32>,
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreatedData {
    pub message: String,
    pub booking_id: BookingId,
}
