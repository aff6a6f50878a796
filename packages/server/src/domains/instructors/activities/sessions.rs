//! Confirmed sessions on an instructor's calendar

use tracing::info;

use crate::common::{BookingError, BookingResult};
use crate::domains::instructors::models::{Instructor, InstructorSession, NewSession};
use crate::kernel::ServerDeps;

use super::profile::find_by_email;

/// Append one or more sessions, in the order given
pub async fn add_sessions(
    email: &str,
    sessions: Vec<NewSession>,
    deps: &ServerDeps,
) -> BookingResult<Vec<InstructorSession>> {
    if sessions.is_empty() {
        return Err(BookingError::InvalidRequest(
            "at least one session is required".to_string(),
        ));
    }
    if let Some(bad) = sessions.iter().find(|s| s.start >= s.end) {
        return Err(BookingError::InvalidRequest(format!(
            "session start {} must be before end {}",
            bad.start, bad.end
        )));
    }

    let mut tx = deps.db_pool.begin().await?;
    let instructor = Instructor::find_by_email_for_update(email.trim(), &mut *tx)
        .await?
        .ok_or(BookingError::NotFound("Instructor"))?;

    for session in &sessions {
        InstructorSession::insert(instructor.id, session, &mut *tx).await?;
    }
    tx.commit().await?;

    info!(instructor_id = %instructor.id, count = sessions.len(), "Sessions added");
    Ok(InstructorSession::find_by_instructor(instructor.id, &deps.db_pool).await?)
}

pub async fn list_sessions(email: &str, deps: &ServerDeps) -> BookingResult<Vec<InstructorSession>> {
    let instructor = find_by_email(email, deps).await?;
    Ok(InstructorSession::find_by_instructor(instructor.id, &deps.db_pool).await?)
}

/// Delete the session at `index`; later sessions move down by one
pub async fn delete_session(
    email: &str,
    index: usize,
    deps: &ServerDeps,
) -> BookingResult<Vec<InstructorSession>> {
    let mut tx = deps.db_pool.begin().await?;
    let instructor = Instructor::find_by_email_for_update(email.trim(), &mut *tx)
        .await?
        .ok_or(BookingError::NotFound("Instructor"))?;

    let removed = InstructorSession::delete_at(instructor.id, index, &mut *tx)
        .await?
        .ok_or(BookingError::NotFound("Session"))?;
    tx.commit().await?;

    info!(instructor_id = %instructor.id, session_id = %removed.id, "Session deleted");
    Ok(InstructorSession::find_by_instructor(instructor.id, &deps.db_pool).await?)
}
