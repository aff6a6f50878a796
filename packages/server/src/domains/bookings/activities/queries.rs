//! Booking lookups for dashboards, and administrative deletion

use std::collections::HashMap;
use tracing::info;

use crate::common::{BookingError, BookingId, BookingResult, InstructorId, UserId};
use crate::domains::bookings::data::{BookingData, BookingStatusData, BookingWithInstructorData};
use crate::domains::bookings::models::{Booking, BookingStatus};
use crate::domains::instructors::models::Instructor;
use crate::domains::instructors::InstructorSummary;
use crate::kernel::ServerDeps;

pub async fn get_booking(id: BookingId, deps: &ServerDeps) -> BookingResult<Booking> {
    Booking::find_by_id(id, &deps.db_pool)
        .await?
        .ok_or(BookingError::NotFound("Booking"))
}

/// Current status and, once assigned, who has it
pub async fn booking_status(id: BookingId, deps: &ServerDeps) -> BookingResult<BookingStatusData> {
    let booking = get_booking(id, deps).await?;

    let instructor = match booking.instructor_id {
        Some(instructor_id) => Instructor::find_by_id(instructor_id, &deps.db_pool)
            .await?
            .as_ref()
            .map(InstructorSummary::from),
        None => None,
    };

    Ok(BookingStatusData {
        status: booking.status,
        instructor,
    })
}

/// Bookings an instructor was offered, e.g. those still awaiting a response
pub async fn list_for_instructor(
    instructor_id: InstructorId,
    status: BookingStatus,
    deps: &ServerDeps,
) -> BookingResult<Vec<BookingData>> {
    let bookings = Booking::find_for_notified(instructor_id, status, &deps.db_pool).await?;
    Ok(bookings.into_iter().map(BookingData::from).collect())
}

pub async fn list_assigned(
    instructor_id: InstructorId,
    deps: &ServerDeps,
) -> BookingResult<Vec<BookingData>> {
    let bookings = Booking::find_assigned(instructor_id, &deps.db_pool).await?;
    Ok(bookings.into_iter().map(BookingData::from).collect())
}

/// All of a user's bookings with the assigned instructor populated
pub async fn list_for_user(
    user_id: UserId,
    deps: &ServerDeps,
) -> BookingResult<Vec<BookingWithInstructorData>> {
    let bookings = Booking::find_by_user(user_id, &deps.db_pool).await?;

    let mut assigned: Vec<InstructorId> = bookings.iter().filter_map(|b| b.instructor_id).collect();
    assigned.sort();
    assigned.dedup();

    let instructors: HashMap<InstructorId, InstructorSummary> =
        Instructor::find_by_ids(&assigned, &deps.db_pool)
            .await?
            .iter()
            .map(|i| (i.id, InstructorSummary::from(i)))
            .collect();

    Ok(bookings
        .into_iter()
        .map(|booking| BookingWithInstructorData {
            instructor: booking
                .instructor_id
                .and_then(|id| instructors.get(&id).cloned()),
            booking: BookingData::from(booking),
        })
        .collect())
}

/// Hard delete. Sessions already placed on the instructor's calendar stay.
pub async fn delete_booking(id: BookingId, deps: &ServerDeps) -> BookingResult<()> {
    if !Booking::delete(id, &deps.db_pool).await? {
        return Err(BookingError::NotFound("Booking"));
    }
    info!(booking_id = %id, "Booking deleted");
    Ok(())
}
