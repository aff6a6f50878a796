//! Integration tests for the booking lifecycle:
//! request -> match -> notify -> accept -> confirm.

mod common;

use crate::common::{create_user, unique, InstructorFixture, TestHarness};
use server_core::common::{BookingError, Day, InstructorId, UserId};
use server_core::domains::bookings::activities::{
    accept_booking, booking_status, list_assigned, list_for_instructor, list_for_user,
    request_booking,
};
use server_core::domains::bookings::{Booking, BookingStatus, RequestBookingInput};
use server_core::domains::instructors::InstructorSession;
use test_context::test_context;

// 2030-06-03 is a Monday
const MONDAY: &str = "2030-06-03";

fn welding_request(user_id: UserId, city: &str, area: &str) -> RequestBookingInput {
    RequestBookingInput {
        user_id: Some(user_id.to_string()),
        date: Some(MONDAY.to_string()),
        city: Some(city.to_string()),
        area: Some(area.to_string()),
        course_name: Some("Welding Basics".to_string()),
        duration_weeks: Some(4),
        start: Some("10:00".to_string()),
        end: Some("12:00".to_string()),
    }
}

// =============================================================================
// Request + matching
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn request_notifies_only_fully_qualified_instructors(ctx: &TestHarness) {
    let city = unique("Lahore");
    let user = create_user(&ctx.db_pool, "Ayesha").await.unwrap();

    let qualified = InstructorFixture::new(&city, "Gulberg")
        .teaching("Welding Basics", 4)
        .available(Day::Monday, "09:00", "17:00")
        .create(&ctx.db_pool)
        .await
        .unwrap();
    // Only partially covers 10:00-12:00
    let partial = InstructorFixture::new(&city, "Gulberg")
        .teaching("Welding Basics", 4)
        .available(Day::Monday, "11:00", "13:00")
        .create(&ctx.db_pool)
        .await
        .unwrap();
    // Right course and time, other area
    let elsewhere = InstructorFixture::new(&city, "DHA")
        .teaching("Welding Basics", 4)
        .available(Day::Monday, "09:00", "17:00")
        .create(&ctx.db_pool)
        .await
        .unwrap();

    let booking = request_booking(welding_request(user.id, &city, "Gulberg"), &ctx.deps)
        .await
        .expect("booking should be created");

    assert_eq!(booking.status, BookingStatus::OnHold);
    assert_eq!(booking.instructor_id, None);

    let notified = Booking::notified_instructors(booking.id, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(notified, vec![qualified.id]);

    let requests = ctx.email.sent_to(&qualified.email);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].subject, "New Course Booking Request: Welding Basics");
    assert!(requests[0].body.contains("10:00 - 12:00"));
    assert!(ctx.email.sent_to(&partial.email).is_empty());
    assert!(ctx.email.sent_to(&elsewhere.email).is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn request_falls_back_to_whole_city_when_area_has_nobody(ctx: &TestHarness) {
    let city = unique("Lahore");
    let user = create_user(&ctx.db_pool, "Bilal").await.unwrap();

    let instructor = InstructorFixture::new(&city, "DHA")
        .teaching("welding basics", 4)
        .available(Day::Monday, "08:00", "12:00")
        .create(&ctx.db_pool)
        .await
        .unwrap();

    let booking = request_booking(welding_request(user.id, &city, "Gulberg"), &ctx.deps)
        .await
        .unwrap();

    let notified = Booking::notified_instructors(booking.id, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(notified, vec![instructor.id]);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn request_reports_which_stage_came_up_empty(ctx: &TestHarness) {
    let city = unique("Karachi");
    let user = create_user(&ctx.db_pool, "Sana").await.unwrap();

    let empty_city = request_booking(welding_request(user.id, &unique("Nowhere"), "Gulberg"), &ctx.deps).await;
    assert!(matches!(empty_city, Err(BookingError::NoInstructorsInLocation)));

    InstructorFixture::new(&city, "Clifton")
        .teaching("Welding Basics", 8)
        .available(Day::Monday, "09:00", "17:00")
        .create(&ctx.db_pool)
        .await
        .unwrap();

    // Same course name but a different duration is a different offering
    let wrong_duration = request_booking(welding_request(user.id, &city, "Clifton"), &ctx.deps).await;
    assert!(matches!(wrong_duration, Err(BookingError::NoInstructorsForCourse)));

    InstructorFixture::new(&city, "Clifton")
        .teaching("Welding Basics", 4)
        .available(Day::Tuesday, "09:00", "17:00")
        .create(&ctx.db_pool)
        .await
        .unwrap();

    let wrong_day = request_booking(welding_request(user.id, &city, "Clifton"), &ctx.deps).await;
    assert!(matches!(wrong_day, Err(BookingError::NoInstructorAvailable)));

    // Nothing was stored and nobody was emailed
    assert!(Booking::find_by_user(user.id, &ctx.db_pool).await.unwrap().is_empty());
    assert_eq!(ctx.email.attempts(), 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn request_for_unknown_user_is_not_found(ctx: &TestHarness) {
    let result = request_booking(welding_request(UserId::new(), &unique("Lahore"), "Gulberg"), &ctx.deps).await;
    assert!(matches!(result, Err(BookingError::NotFound("User"))));
}

// =============================================================================
// Accept
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn accept_confirms_booking_and_books_the_calendar(ctx: &TestHarness) {
    let city = unique("Lahore");
    let user = create_user(&ctx.db_pool, "Ayesha").await.unwrap();

    let first = InstructorFixture::new(&city, "Gulberg")
        .named("Imran")
        .teaching("Welding Basics", 4)
        .available(Day::Monday, "09:00", "17:00")
        .create(&ctx.db_pool)
        .await
        .unwrap();
    let second = InstructorFixture::new(&city, "Gulberg")
        .named("Nadia")
        .teaching("Welding Basics", 4)
        .available(Day::Monday, "10:00", "12:00")
        .create(&ctx.db_pool)
        .await
        .unwrap();

    let booking = request_booking(welding_request(user.id, &city, "Gulberg"), &ctx.deps)
        .await
        .unwrap();
    ctx.email.clear();

    let confirmed = accept_booking(booking.id, second.id, &ctx.deps)
        .await
        .expect("first accept should win");

    assert_eq!(confirmed.status, BookingStatus::Confirmed);
    assert_eq!(confirmed.instructor_id, Some(second.id));

    let sessions = InstructorSession::find_by_instructor(second.id, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].booking_id, Some(booking.id));
    assert_eq!(sessions[0].session_date, booking.booking_date);
    assert_eq!(sessions[0].start_time.as_str(), "10:00");
    assert_eq!(sessions[0].end_time.as_str(), "12:00");
    assert_eq!(sessions[0].course, "Welding Basics");
    assert_eq!(sessions[0].location, format!("{}, Gulberg", city));
    assert_eq!(sessions[0].client, "Ayesha");

    let loser_sessions = InstructorSession::find_by_instructor(first.id, &ctx.db_pool)
        .await
        .unwrap();
    assert!(loser_sessions.is_empty());

    let status = booking_status(booking.id, &ctx.deps).await.unwrap();
    assert_eq!(status.status, BookingStatus::Confirmed);
    assert_eq!(status.instructor.map(|i| i.id), Some(second.id));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn later_accepts_are_rejected_without_changing_anything(ctx: &TestHarness) {
    let city = unique("Lahore");
    let user = create_user(&ctx.db_pool, "Ayesha").await.unwrap();

    let winner = InstructorFixture::new(&city, "Gulberg")
        .teaching("Welding Basics", 4)
        .available(Day::Monday, "09:00", "17:00")
        .create(&ctx.db_pool)
        .await
        .unwrap();
    let late = InstructorFixture::new(&city, "Gulberg")
        .teaching("Welding Basics", 4)
        .available(Day::Monday, "09:00", "17:00")
        .create(&ctx.db_pool)
        .await
        .unwrap();

    let booking = request_booking(welding_request(user.id, &city, "Gulberg"), &ctx.deps)
        .await
        .unwrap();
    accept_booking(booking.id, winner.id, &ctx.deps).await.unwrap();
    let before = Booking::find_by_id(booking.id, &ctx.db_pool).await.unwrap().unwrap();
    ctx.email.clear();

    let late_accept = accept_booking(booking.id, late.id, &ctx.deps).await;
    assert!(matches!(late_accept, Err(BookingError::BookingAlreadyResolved)));

    // The winner repeating the call gets the same answer
    let repeat = accept_booking(booking.id, winner.id, &ctx.deps).await;
    assert!(matches!(repeat, Err(BookingError::BookingAlreadyResolved)));

    let after = Booking::find_by_id(booking.id, &ctx.db_pool).await.unwrap().unwrap();
    assert_eq!(after.status, BookingStatus::Confirmed);
    assert_eq!(after.instructor_id, Some(winner.id));
    assert_eq!(after.updated_at, before.updated_at);

    let sessions = InstructorSession::find_by_instructor(winner.id, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(sessions.len(), 1);
    assert!(InstructorSession::find_by_instructor(late.id, &ctx.db_pool)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(ctx.email.attempts(), 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn accept_from_instructor_never_offered_the_booking(ctx: &TestHarness) {
    let city = unique("Lahore");
    let user = create_user(&ctx.db_pool, "Ayesha").await.unwrap();

    InstructorFixture::new(&city, "Gulberg")
        .teaching("Welding Basics", 4)
        .available(Day::Monday, "09:00", "17:00")
        .create(&ctx.db_pool)
        .await
        .unwrap();
    let outsider = InstructorFixture::new(&unique("Multan"), "Cantt")
        .teaching("Welding Basics", 4)
        .available(Day::Monday, "09:00", "17:00")
        .create(&ctx.db_pool)
        .await
        .unwrap();

    let booking = request_booking(welding_request(user.id, &city, "Gulberg"), &ctx.deps)
        .await
        .unwrap();

    let result = accept_booking(booking.id, outsider.id, &ctx.deps).await;
    assert!(matches!(result, Err(BookingError::InstructorNotNotified)));

    let unchanged = Booking::find_by_id(booking.id, &ctx.db_pool).await.unwrap().unwrap();
    assert_eq!(unchanged.status, BookingStatus::OnHold);
    assert_eq!(unchanged.instructor_id, None);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn accept_for_unknown_instructor_is_not_found(ctx: &TestHarness) {
    let city = unique("Lahore");
    let user = create_user(&ctx.db_pool, "Ayesha").await.unwrap();
    InstructorFixture::new(&city, "Gulberg")
        .teaching("Welding Basics", 4)
        .available(Day::Monday, "09:00", "17:00")
        .create(&ctx.db_pool)
        .await
        .unwrap();
    let booking = request_booking(welding_request(user.id, &city, "Gulberg"), &ctx.deps)
        .await
        .unwrap();

    let result = accept_booking(booking.id, InstructorId::new(), &ctx.deps).await;
    assert!(matches!(result, Err(BookingError::NotFound("Instructor"))));
}

// =============================================================================
// Dashboards
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn dashboards_follow_the_booking_through_assignment(ctx: &TestHarness) {
    let city = unique("Lahore");
    let user = create_user(&ctx.db_pool, "Ayesha").await.unwrap();

    let winner = InstructorFixture::new(&city, "Gulberg")
        .teaching("Welding Basics", 4)
        .available(Day::Monday, "09:00", "17:00")
        .create(&ctx.db_pool)
        .await
        .unwrap();
    let other = InstructorFixture::new(&city, "Gulberg")
        .teaching("Welding Basics", 4)
        .available(Day::Monday, "09:00", "17:00")
        .create(&ctx.db_pool)
        .await
        .unwrap();

    let booking = request_booking(welding_request(user.id, &city, "Gulberg"), &ctx.deps)
        .await
        .unwrap();

    let pending = list_for_instructor(other.id, BookingStatus::OnHold, &ctx.deps)
        .await
        .unwrap();
    assert_eq!(pending.iter().map(|b| b.id).collect::<Vec<_>>(), vec![booking.id]);
    assert!(list_assigned(winner.id, &ctx.deps).await.unwrap().is_empty());

    accept_booking(booking.id, winner.id, &ctx.deps).await.unwrap();

    assert!(list_for_instructor(other.id, BookingStatus::OnHold, &ctx.deps)
        .await
        .unwrap()
        .is_empty());
    let confirmed_offers = list_for_instructor(other.id, BookingStatus::Confirmed, &ctx.deps)
        .await
        .unwrap();
    assert_eq!(confirmed_offers.len(), 1);

    let assigned = list_assigned(winner.id, &ctx.deps).await.unwrap();
    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0].instructor_id, Some(winner.id));
    assert!(list_assigned(other.id, &ctx.deps).await.unwrap().is_empty());

    let mine = list_for_user(user.id, &ctx.deps).await.unwrap();
    assert_eq!(mine.len(), 1);
    let instructor = mine[0].instructor.as_ref().expect("instructor populated");
    assert_eq!(instructor.id, winner.id);
    assert_eq!(instructor.email, winner.email);
}
