//! Candidate lookup for a booking request

use tracing::debug;

use crate::common::{BookingResult, InstructorId};
use crate::domains::instructors::models::{CourseOffering, Instructor};
use crate::kernel::ServerDeps;

use super::utils::{narrow, Candidate, MatchCriteria};

/// Instructors eligible to be notified about a request, in directory order.
///
/// Only the city is pushed down to the store; area fallback, course and
/// availability checks run on the loaded candidates.
pub async fn find_candidates(
    criteria: &MatchCriteria,
    deps: &ServerDeps,
) -> BookingResult<Vec<Instructor>> {
    let instructors = Instructor::find_in_city(criteria.city.trim(), &deps.db_pool).await?;

    let ids: Vec<InstructorId> = instructors.iter().map(|i| i.id).collect();
    let mut offerings = CourseOffering::find_for_instructors(&ids, &deps.db_pool).await?;

    let candidates = instructors
        .into_iter()
        .map(|instructor| Candidate {
            offerings: offerings.remove(&instructor.id).unwrap_or_default(),
            instructor,
        })
        .collect();

    let matched = narrow(candidates, criteria)?;
    debug!(
        city = %criteria.city,
        course = %criteria.course_name,
        matched = matched.len(),
        "Instructor candidates found"
    );

    Ok(matched.into_iter().map(|c| c.instructor).collect())
}
