//! Outgoing booking emails. Pure composition, nothing is sent here.

use crate::domains::bookings::models::Booking;
use crate::domains::instructors::models::Instructor;
use crate::domains::users::User;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl Email {
    fn new(to: &str, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.to_string(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// "Welding Basics on 2024-06-03 in Lahore, Gulberg"
fn describe(booking: &Booking) -> String {
    format!(
        "{} on {} in {}, {}",
        booking.course_name, booking.booking_date, booking.city, booking.area
    )
}

/// Sent to every notified instructor when a booking is created
pub fn booking_request(booking: &Booking, instructor: &Instructor) -> Email {
    Email::new(
        &instructor.email,
        format!("New Course Booking Request: {}", booking.course_name),
        format!(
            "A user has requested a course booking for {} ({} weeks) on {} in {}, {} during {}.\n\n\
             You are available at this time. Please log in to your dashboard to accept this booking.\n\n\
             First instructor to accept will be assigned.",
            booking.course_name,
            booking.duration_weeks,
            booking.booking_date,
            booking.city,
            booking.area,
            booking.window(),
        ),
    )
}

pub fn booking_confirmed(booking: &Booking, user: &User, winner: &Instructor) -> Email {
    Email::new(
        &user.email,
        "Your booking is confirmed!",
        format!(
            "Your booking for {} has been confirmed with instructor {} ({}).",
            describe(booking),
            winner.full_name(),
            winner.email
        ),
    )
}

pub fn instructor_assigned(booking: &Booking, winner: &Instructor) -> Email {
    Email::new(
        &winner.email,
        "You have been assigned a booking!",
        format!(
            "You have been assigned to the booking for {} during {}.",
            describe(booking),
            booking.window()
        ),
    )
}

/// Separate from the confirmation so payment reminders can evolve alone
pub fn payment_prompt(booking: &Booking, user: &User) -> Email {
    Email::new(
        &user.email,
        "Instructor Found! Please Complete Your Payment",
        format!(
            "We have found an instructor for your booking ({}). \
             Please log in to your dashboard and complete the payment to confirm your registration.",
            describe(booking)
        ),
    )
}

pub fn already_taken(booking: &Booking, instructor: &Instructor) -> Email {
    Email::new(
        &instructor.email,
        "Booking already taken",
        format!(
            "The booking for {} has already been taken by another instructor.",
            describe(booking)
        ),
    )
}

/// Everything that goes out after a successful accept: the user's
/// confirmation, the winner's assignment, the user's payment prompt, then
/// one notice per losing instructor.
pub fn assignment_outcome(
    booking: &Booking,
    user: Option<&User>,
    winner: &Instructor,
    others: &[Instructor],
) -> Vec<Email> {
    let mut emails = Vec::with_capacity(3 + others.len());
    if let Some(user) = user {
        emails.push(booking_confirmed(booking, user, winner));
    }
    emails.push(instructor_assigned(booking, winner));
    if let Some(user) = user {
        emails.push(payment_prompt(booking, user));
    }
    emails.extend(
        others
            .iter()
            .filter(|other| other.id != winner.id)
            .map(|other| already_taken(booking, other)),
    );
    emails
}
