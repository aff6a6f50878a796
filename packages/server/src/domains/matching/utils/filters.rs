//! Pure filter stages of the instructor matching pipeline
//!
//! These functions contain NO side effects. Each stage only ever removes
//! candidates from the previous stage's output, so the final set is a
//! subset of the location set, which is a subset of the input.

use chrono::NaiveDate;

use crate::common::{BookingError, BookingResult, Day, TimeWindow};
use crate::domains::instructors::models::{CourseOffering, Instructor};

/// What a booking request asks for
#[derive(Debug, Clone)]
pub struct MatchCriteria {
    pub date: NaiveDate,
    pub city: String,
    pub area: String,
    pub course_name: String,
    pub duration_weeks: i32,
    pub window: TimeWindow,
}

/// An instructor together with the courses they offer
#[derive(Debug, Clone)]
pub struct Candidate {
    pub instructor: Instructor,
    pub offerings: Vec<CourseOffering>,
}

fn same_text(stored: Option<&str>, wanted: &str) -> bool {
    stored.is_some_and(|s| s.trim().eq_ignore_ascii_case(wanted.trim()))
}

/// Stage 1: city must match. Area narrows the set further unless that
/// would leave nobody, in which case every city match is kept.
pub fn filter_by_location(candidates: Vec<Candidate>, city: &str, area: &str) -> Vec<Candidate> {
    let in_city: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| same_text(c.instructor.city.as_deref(), city))
        .collect();

    if in_city
        .iter()
        .any(|c| same_text(c.instructor.area.as_deref(), area))
    {
        in_city
            .into_iter()
            .filter(|c| same_text(c.instructor.area.as_deref(), area))
            .collect()
    } else {
        in_city
    }
}

/// Stage 2: keep instructors offering the course at the requested length
pub fn filter_by_course(
    candidates: Vec<Candidate>,
    course_name: &str,
    duration_weeks: i32,
) -> Vec<Candidate> {
    candidates
        .into_iter()
        .filter(|c| {
            c.offerings
                .iter()
                .any(|o| o.matches(course_name, duration_weeks))
        })
        .collect()
}

/// Stage 3: keep instructors with one window on the date's weekday that
/// fully contains the requested window
pub fn filter_by_availability(
    candidates: Vec<Candidate>,
    date: NaiveDate,
    window: &TimeWindow,
) -> Vec<Candidate> {
    let day = Day::of(date);
    candidates
        .into_iter()
        .filter(|c| c.instructor.availability.covers(day, window))
        .collect()
}

/// Run all three stages, failing with the error of the first stage that
/// empties the set.
pub fn narrow(candidates: Vec<Candidate>, criteria: &MatchCriteria) -> BookingResult<Vec<Candidate>> {
    let located = filter_by_location(candidates, &criteria.city, &criteria.area);
    if located.is_empty() {
        return Err(BookingError::NoInstructorsInLocation);
    }

    let qualified = filter_by_course(located, &criteria.course_name, criteria.duration_weeks);
    if qualified.is_empty() {
        return Err(BookingError::NoInstructorsForCourse);
    }

    let available = filter_by_availability(qualified, criteria.date, &criteria.window);
    if available.is_empty() {
        return Err(BookingError::NoInstructorAvailable);
    }

    Ok(available)
}
