//! Booking creation: match instructors, record the booking, tell them.

use tracing::info;

use crate::common::{parse_date, BookingError, BookingResult, TimeWindow, UserId};
use crate::domains::bookings::data::RequestBookingInput;
use crate::domains::bookings::models::{Booking, CreateBooking};
use crate::domains::matching::{find_candidates, MatchCriteria};
use crate::domains::notifications::messages;
use crate::domains::users::User;
use crate::kernel::ServerDeps;

fn required(value: Option<String>, field: &str) -> BookingResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| BookingError::InvalidRequest(format!("{} is required", field)))
}

/// Validate the raw request into matching criteria. No I/O.
pub fn criteria_from_input(input: RequestBookingInput) -> BookingResult<(UserId, MatchCriteria)> {
    let user_id = required(input.user_id, "userId")?;
    let date = required(input.date, "date")?;
    let city = required(input.city, "city")?;
    let area = required(input.area, "area")?;
    let course_name = required(input.course_name, "courseName")?;
    let duration_weeks = input
        .duration_weeks
        .ok_or_else(|| BookingError::InvalidRequest("durationWeeks is required".to_string()))?;
    let start = required(input.start, "start")?;
    let end = required(input.end, "end")?;

    let user_id = UserId::parse(&user_id)
        .map_err(|_| BookingError::InvalidRequest(format!("'{}' is not a valid userId", user_id)))?;

    let criteria = MatchCriteria {
        date: parse_date(&date)?,
        city,
        area,
        course_name,
        duration_weeks,
        window: TimeWindow::parse(&start, &end)?,
    };
    Ok((user_id, criteria))
}

/// Create an `on-hold` booking for every instructor who qualifies and send
/// each of them a request. Nothing is stored when matching comes up empty.
pub async fn request_booking(input: RequestBookingInput, deps: &ServerDeps) -> BookingResult<Booking> {
    let (user_id, criteria) = criteria_from_input(input)?;

    User::find_by_id(user_id, &deps.db_pool)
        .await?
        .ok_or(BookingError::NotFound("User"))?;

    let candidates = find_candidates(&criteria, deps).await?;
    let notified: Vec<_> = candidates.iter().map(|i| i.id).collect();

    let booking = Booking::create(
        CreateBooking::builder()
            .user_id(user_id)
            .date(criteria.date)
            .city(criteria.city.as_str())
            .area(criteria.area.as_str())
            .course_name(criteria.course_name.as_str())
            .duration_weeks(criteria.duration_weeks)
            .window(&criteria.window)
            .notified(notified.as_slice())
            .build(),
        &deps.db_pool,
    )
    .await?;

    info!(
        booking_id = %booking.id,
        user_id = %user_id,
        notified = notified.len(),
        "Booking created on hold"
    );

    let requests = candidates
        .iter()
        .map(|instructor| messages::booking_request(&booking, instructor))
        .collect();
    deps.notifier.dispatch(requests).await;

    Ok(booking)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> RequestBookingInput {
        RequestBookingInput {
            user_id: Some(UserId::new().to_string()),
            date: Some("2024-06-03".to_string()),
            city: Some("Lahore".to_string()),
            area: Some("Gulberg".to_string()),
            course_name: Some("Welding Basics".to_string()),
            duration_weeks: Some(4),
            start: Some("10:00".to_string()),
            end: Some("12:00".to_string()),
        }
    }

    #[test]
    fn complete_input_becomes_criteria() {
        let (_, criteria) = criteria_from_input(complete()).unwrap();
        assert_eq!(criteria.course_name, "Welding Basics");
        assert_eq!(criteria.window, TimeWindow::parse("10:00", "12:00").unwrap());
    }

    #[test]
    fn each_missing_field_is_invalid_request() {
        let blank_city = RequestBookingInput {
            city: Some("  ".to_string()),
            ..complete()
        };
        let no_weeks = RequestBookingInput {
            duration_weeks: None,
            ..complete()
        };
        let no_end = RequestBookingInput {
            end: None,
            ..complete()
        };

        for input in [blank_city, no_weeks, no_end, RequestBookingInput::default()] {
            assert!(matches!(
                criteria_from_input(input),
                Err(BookingError::InvalidRequest(_))
            ));
        }
    }

    #[test]
    fn malformed_values_are_invalid_request() {
        let bad_time = RequestBookingInput {
            start: Some("9am".to_string()),
            ..complete()
        };
        let reversed = RequestBookingInput {
            start: Some("12:00".to_string()),
            end: Some("10:00".to_string()),
            ..complete()
        };
        let bad_user = RequestBookingInput {
            user_id: Some("nobody".to_string()),
            ..complete()
        };

        for input in [bad_time, reversed, bad_user] {
            assert!(matches!(
                criteria_from_input(input),
                Err(BookingError::InvalidRequest(_))
            ));
        }
    }
}
