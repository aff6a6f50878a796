//! Instructor directory: registration, profile, listing, removal

use tracing::info;

use crate::common::{BookingError, BookingResult, InstructorId};
use crate::domains::instructors::data::{InstructorData, RegisterInstructorInput, UpdateProfileInput};
use crate::domains::instructors::models::{CourseOffering, Instructor};
use crate::kernel::ServerDeps;

fn required(value: Option<String>, field: &str) -> BookingResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| BookingError::InvalidRequest(format!("{} is required", field)))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Attach offerings to an instructor record for API output
pub async fn load_profile(instructor: Instructor, deps: &ServerDeps) -> BookingResult<InstructorData> {
    let offerings = CourseOffering::find_for_instructor(instructor.id, &deps.db_pool).await?;
    Ok(InstructorData::new(instructor, offerings))
}

pub(crate) async fn find_by_email(email: &str, deps: &ServerDeps) -> BookingResult<Instructor> {
    Instructor::find_by_email(email.trim(), &deps.db_pool)
        .await?
        .ok_or(BookingError::NotFound("Instructor"))
}

pub async fn register_instructor(
    input: RegisterInstructorInput,
    deps: &ServerDeps,
) -> BookingResult<InstructorData> {
    let first_name = required(input.first_name, "firstName")?;
    let last_name = required(input.last_name, "lastName")?;
    let email = required(input.email, "email")?;

    if Instructor::find_by_email(&email, &deps.db_pool).await?.is_some() {
        return Err(BookingError::EmailTaken);
    }

    let instructor = Instructor::create(
        &first_name,
        &last_name,
        &email,
        non_blank(input.city.as_deref()),
        non_blank(input.location.as_deref()),
        &deps.db_pool,
    )
    .await
    .map_err(|err| match err.downcast_ref::<sqlx::Error>() {
        // lost a race with a concurrent registration of the same email
        Some(sqlx::Error::Database(db)) if db.is_unique_violation() => BookingError::EmailTaken,
        _ => BookingError::Internal(err),
    })?;

    info!(instructor_id = %instructor.id, email = %instructor.email, "Instructor registered");
    Ok(InstructorData::new(instructor, Vec::new()))
}

/// List instructors, optionally narrowed by city and area
pub async fn list_instructors(
    city: Option<&str>,
    area: Option<&str>,
    deps: &ServerDeps,
) -> BookingResult<Vec<InstructorData>> {
    let instructors =
        Instructor::find_filtered(non_blank(city), non_blank(area), &deps.db_pool).await?;

    let ids: Vec<InstructorId> = instructors.iter().map(|i| i.id).collect();
    let mut offerings = CourseOffering::find_for_instructors(&ids, &deps.db_pool).await?;

    Ok(instructors
        .into_iter()
        .map(|instructor| {
            let subjects = offerings.remove(&instructor.id).unwrap_or_default();
            InstructorData::new(instructor, subjects)
        })
        .collect())
}

pub async fn get_profile(email: &str, deps: &ServerDeps) -> BookingResult<InstructorData> {
    let instructor = find_by_email(email, deps).await?;
    load_profile(instructor, deps).await
}

/// Update location and, when given, replace the offered courses
pub async fn update_profile(
    email: &str,
    input: UpdateProfileInput,
    deps: &ServerDeps,
) -> BookingResult<InstructorData> {
    let mut tx = deps.db_pool.begin().await?;

    let instructor = Instructor::find_by_email_for_update(email.trim(), &mut *tx)
        .await?
        .ok_or(BookingError::NotFound("Instructor"))?;

    let instructor = Instructor::update_location(
        instructor.id,
        non_blank(input.city.as_deref()),
        non_blank(input.location.as_deref()),
        &mut *tx,
    )
    .await?;

    if let Some(subjects) = &input.subjects {
        if subjects.iter().any(|s| s.course_name.trim().is_empty()) {
            return Err(BookingError::InvalidRequest(
                "course name must not be blank".to_string(),
            ));
        }
        CourseOffering::replace_for_instructor(instructor.id, subjects, &mut *tx).await?;
    }

    tx.commit().await?;

    info!(instructor_id = %instructor.id, "Instructor profile updated");
    load_profile(instructor, deps).await
}

pub async fn delete_instructor(id: InstructorId, deps: &ServerDeps) -> BookingResult<()> {
    if !Instructor::delete(id, &deps.db_pool).await? {
        return Err(BookingError::NotFound("Instructor"));
    }
    info!(instructor_id = %id, "Instructor deleted");
    Ok(())
}
