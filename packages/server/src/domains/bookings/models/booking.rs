use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgExecutor, PgPool};
use typed_builder::TypedBuilder;

use crate::common::{BookingId, InstructorId, TimeOfDay, TimeWindow, UserId};

// ============================================================================
// Enums
// ============================================================================

/// `on-hold` until exactly one notified instructor accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "booking_status", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    #[default]
    OnHold,
    Confirmed,
    Cancelled,
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "on-hold" => Ok(Self::OnHold),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown booking status '{}'", other)),
        }
    }
}

// ============================================================================
// Booking Model
// ============================================================================

/// One requested session. `instructor_id` is set exactly when the booking
/// is confirmed; the table's check constraint enforces the pairing.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Booking {
    pub id: BookingId,
    pub user_id: UserId,
    pub booking_date: NaiveDate,
    pub city: String,
    pub area: String,
    pub course_name: String,
    pub duration_weeks: i32,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub status: BookingStatus,
    pub instructor_id: Option<InstructorId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct CreateBooking<'a> {
    pub user_id: UserId,
    pub date: NaiveDate,
    pub city: &'a str,
    pub area: &'a str,
    pub course_name: &'a str,
    pub duration_weeks: i32,
    pub window: &'a TimeWindow,
    pub notified: &'a [InstructorId],
}

impl Booking {
    pub fn window(&self) -> TimeWindow {
        TimeWindow {
            start: self.start_time.clone(),
            end: self.end_time.clone(),
        }
    }

    pub async fn find_by_id(id: BookingId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert an `on-hold` booking together with its notified set.
    /// The set is written once here and never changes afterwards.
    pub async fn create(input: CreateBooking<'_>, pool: &PgPool) -> Result<Self> {
        let mut tx = pool.begin().await?;

        let booking = sqlx::query_as::<_, Self>(
            "INSERT INTO bookings
                (id, user_id, booking_date, city, area, course_name, duration_weeks, start_time, end_time)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *",
        )
        .bind(BookingId::new())
        .bind(input.user_id)
        .bind(input.date)
        .bind(input.city)
        .bind(input.area)
        .bind(input.course_name)
        .bind(input.duration_weeks)
        .bind(&input.window.start)
        .bind(&input.window.end)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO booking_notified_instructors (booking_id, instructor_id, position)
             SELECT $1, instructor_id, (ordinality - 1)::INT
             FROM UNNEST($2::UUID[]) WITH ORDINALITY AS t(instructor_id, ordinality)",
        )
        .bind(booking.id)
        .bind(input.notified)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(booking)
    }

    /// The assignment primitive: confirm the booking for `instructor_id` only
    /// if it is still on hold, unassigned, and the instructor was notified.
    ///
    /// Runs as one conditional UPDATE so concurrent callers are serialized by
    /// the row lock; exactly one of them gets `Some`.
    pub async fn try_assign(
        id: BookingId,
        instructor_id: InstructorId,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE bookings
             SET status = 'confirmed', instructor_id = $2, updated_at = NOW()
             WHERE id = $1
               AND status = 'on-hold'
               AND instructor_id IS NULL
               AND EXISTS (
                   SELECT 1 FROM booking_notified_instructors
                   WHERE booking_id = $1 AND instructor_id = $2
               )
             RETURNING *",
        )
        .bind(id)
        .bind(instructor_id)
        .fetch_optional(conn)
        .await
        .map_err(Into::into)
    }

    /// Hard delete. Returns false when no such booking exists.
    pub async fn delete(id: BookingId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn is_notified(
        id: BookingId,
        instructor_id: InstructorId,
        pool: &PgPool,
    ) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                 SELECT 1 FROM booking_notified_instructors
                 WHERE booking_id = $1 AND instructor_id = $2
             )",
        )
        .bind(id)
        .bind(instructor_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Notified instructor ids in the order they were matched
    pub async fn notified_instructors(id: BookingId, executor: impl PgExecutor<'_>) -> Result<Vec<InstructorId>> {
        sqlx::query_scalar::<_, InstructorId>(
            "SELECT instructor_id FROM booking_notified_instructors
             WHERE booking_id = $1
             ORDER BY position",
        )
        .bind(id)
        .fetch_all(executor)
        .await
        .map_err(Into::into)
    }

    /// Bookings an instructor was notified about, in the given status
    pub async fn find_for_notified(
        instructor_id: InstructorId,
        status: BookingStatus,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT b.* FROM bookings b
             JOIN booking_notified_instructors n ON n.booking_id = b.id
             WHERE n.instructor_id = $1 AND b.status = $2
             ORDER BY b.created_at DESC, b.id",
        )
        .bind(instructor_id)
        .bind(status)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Confirmed bookings assigned to an instructor
    pub async fn find_assigned(instructor_id: InstructorId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM bookings
             WHERE instructor_id = $1 AND status = 'confirmed'
             ORDER BY booking_date, start_time",
        )
        .bind(instructor_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_user(user_id: UserId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM bookings
             WHERE user_id = $1
             ORDER BY created_at DESC, id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
