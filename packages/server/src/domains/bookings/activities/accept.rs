//! First-come-first-served assignment of a booking to one instructor.

use tracing::{debug, info};

use crate::common::{BookingError, BookingId, BookingResult, InstructorId};
use crate::domains::bookings::models::{Booking, BookingStatus};
use crate::domains::instructors::models::{Instructor, InstructorSession, NewSession};
use crate::domains::notifications::messages;
use crate::domains::users::User;
use crate::kernel::ServerDeps;

/// Accept a booking on behalf of `instructor_id`.
///
/// Among concurrent calls for the same booking exactly one succeeds; the
/// rest get `BookingAlreadyResolved`. The winner's calendar gets the session
/// in the same transaction as the status change. Outcome emails are sent
/// after commit and cannot fail the call.
pub async fn accept_booking(
    booking_id: BookingId,
    instructor_id: InstructorId,
    deps: &ServerDeps,
) -> BookingResult<Booking> {
    let winner = Instructor::find_by_id(instructor_id, &deps.db_pool)
        .await?
        .ok_or(BookingError::NotFound("Instructor"))?;

    let mut tx = deps.db_pool.begin().await?;

    let Some(booking) = Booking::try_assign(booking_id, instructor_id, &mut *tx).await? else {
        tx.rollback().await?;
        return Err(explain_rejection(booking_id, instructor_id, deps).await?);
    };

    // Row lock held: no pool acquires until commit
    let user = User::find_by_id(booking.user_id, &mut *tx).await?;
    let notified = Booking::notified_instructors(booking.id, &mut *tx).await?;
    let others: Vec<Instructor> = Instructor::find_by_ids(&notified, &mut *tx)
        .await?
        .into_iter()
        .filter(|i| i.id != instructor_id)
        .collect();

    let session = NewSession {
        booking_id: Some(booking.id),
        date: booking.booking_date,
        start: booking.start_time.clone(),
        end: booking.end_time.clone(),
        course: booking.course_name.clone(),
        location: format!("{}, {}", booking.city, booking.area),
        client: user.as_ref().map(|u| u.name.clone()).unwrap_or_default(),
    };
    InstructorSession::insert(instructor_id, &session, &mut *tx).await?;

    tx.commit().await?;

    info!(
        booking_id = %booking.id,
        instructor_id = %instructor_id,
        "Booking confirmed"
    );

    deps.notifier
        .dispatch(messages::assignment_outcome(&booking, user.as_ref(), &winner, &others))
        .await;

    Ok(booking)
}

/// Why the conditional update matched nothing. Only an instructor outside
/// the notified set of a still-open booking is told something different;
/// every other case is the routine lost race.
async fn explain_rejection(
    booking_id: BookingId,
    instructor_id: InstructorId,
    deps: &ServerDeps,
) -> BookingResult<BookingError> {
    let current = Booking::find_by_id(booking_id, &deps.db_pool).await?;

    if let Some(booking) = &current {
        let still_open = booking.status == BookingStatus::OnHold && booking.instructor_id.is_none();
        if still_open && !Booking::is_notified(booking_id, instructor_id, &deps.db_pool).await? {
            debug!(booking_id = %booking_id, instructor_id = %instructor_id, "Accept from instructor outside notified set");
            return Ok(BookingError::InstructorNotNotified);
        }
    }

    debug!(
        booking_id = %booking_id,
        instructor_id = %instructor_id,
        status = ?current.map(|b| b.status),
        "Accept rejected, booking already resolved"
    );
    Ok(BookingError::BookingAlreadyResolved)
}
