//! Availability editing
//!
//! Each mutation locks the instructor row, applies the change to the
//! in-memory map and writes the whole map back in the same transaction.

use tracing::{debug, info};

use crate::common::{BookingError, BookingResult, Day, TimeWindow};
use crate::domains::instructors::data::InstructorData;
use crate::domains::instructors::models::{Availability, Instructor};
use crate::kernel::ServerDeps;

use super::profile::{find_by_email, load_profile};

async fn modify_availability<F>(email: &str, deps: &ServerDeps, change: F) -> BookingResult<Instructor>
where
    F: FnOnce(&mut Availability) -> BookingResult<()>,
{
    let mut tx = deps.db_pool.begin().await?;

    let instructor = Instructor::find_by_email_for_update(email.trim(), &mut *tx)
        .await?
        .ok_or(BookingError::NotFound("Instructor"))?;

    let mut availability = instructor.availability.0;
    change(&mut availability)?;

    let updated = Instructor::save_availability(instructor.id, &availability, &mut *tx).await?;
    tx.commit().await?;

    Ok(updated)
}

pub async fn get_availability(email: &str, deps: &ServerDeps) -> BookingResult<Availability> {
    Ok(find_by_email(email, deps).await?.availability.0)
}

/// Bulk replace the whole weekly schedule
pub async fn replace_availability(
    email: &str,
    availability: Availability,
    deps: &ServerDeps,
) -> BookingResult<InstructorData> {
    let instructor = modify_availability(email, deps, |current| {
        *current = availability;
        Ok(())
    })
    .await?;

    info!(instructor_id = %instructor.id, "Availability replaced");
    load_profile(instructor, deps).await
}

/// Append windows to the end of a day's list
pub async fn add_windows(
    email: &str,
    day: Day,
    windows: Vec<TimeWindow>,
    deps: &ServerDeps,
) -> BookingResult<InstructorData> {
    if windows.is_empty() {
        return Err(BookingError::InvalidRequest(
            "at least one time slot is required".to_string(),
        ));
    }

    let count = windows.len();
    let instructor = modify_availability(email, deps, |current| {
        current.append(day, windows);
        Ok(())
    })
    .await?;

    debug!(instructor_id = %instructor.id, %day, count, "Availability windows added");
    load_profile(instructor, deps).await
}

pub async fn edit_window(
    email: &str,
    day: Day,
    index: usize,
    window: TimeWindow,
    deps: &ServerDeps,
) -> BookingResult<InstructorData> {
    let instructor =
        modify_availability(email, deps, |current| current.edit(day, index, window)).await?;

    debug!(instructor_id = %instructor.id, %day, index, "Availability window edited");
    load_profile(instructor, deps).await
}

/// Remove the window at `index`; later windows move down by one
pub async fn delete_window(
    email: &str,
    day: Day,
    index: usize,
    deps: &ServerDeps,
) -> BookingResult<InstructorData> {
    let instructor = modify_availability(email, deps, |current| {
        current.remove(day, index).map(|_| ())
    })
    .await?;

    debug!(instructor_id = %instructor.id, %day, index, "Availability window deleted");
    load_profile(instructor, deps).await
}
