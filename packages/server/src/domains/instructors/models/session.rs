use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::{BookingId, InstructorId, SessionId, TimeOfDay};

/// A confirmed teaching session on an instructor's calendar.
///
/// Sessions are listed in insertion order and addressed by position,
/// the same way availability windows are.
#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InstructorSession {
    pub id: SessionId,
    #[serde(skip)]
    pub instructor_id: InstructorId,
    pub booking_id: Option<BookingId>,
    #[serde(rename = "date")]
    pub session_date: NaiveDate,
    #[serde(rename = "start")]
    pub start_time: TimeOfDay,
    #[serde(rename = "end")]
    pub end_time: TimeOfDay,
    pub course: String,
    pub location: String,
    pub client: String,
    pub created_at: DateTime<Utc>,
}

/// Session fields supplied by a caller or by the assignment step
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewSession {
    #[serde(default)]
    pub booking_id: Option<BookingId>,
    pub date: NaiveDate,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub client: String,
}

impl InstructorSession {
    pub async fn insert(
        instructor_id: InstructorId,
        session: &NewSession,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO instructor_sessions
                (id, instructor_id, booking_id, session_date, start_time, end_time, course, location, client)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING *",
        )
        .bind(SessionId::new())
        .bind(instructor_id)
        .bind(session.booking_id)
        .bind(session.date)
        .bind(&session.start)
        .bind(&session.end)
        .bind(&session.course)
        .bind(&session.location)
        .bind(&session.client)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_instructor(instructor_id: InstructorId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM instructor_sessions
             WHERE instructor_id = $1
             ORDER BY seq",
        )
        .bind(instructor_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_booking(booking_id: BookingId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM instructor_sessions WHERE booking_id = $1")
            .bind(booking_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Delete the session at `index` in list order. Returns None when the
    /// index is out of range.
    pub async fn delete_at(
        instructor_id: InstructorId,
        index: usize,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>> {
        let Ok(offset) = i64::try_from(index) else {
            return Ok(None);
        };

        sqlx::query_as::<_, Self>(
            "DELETE FROM instructor_sessions
             WHERE id = (
                 SELECT id FROM instructor_sessions
                 WHERE instructor_id = $1
                 ORDER BY seq
                 OFFSET $2 LIMIT 1
                 FOR UPDATE
             )
             RETURNING *",
        )
        .bind(instructor_id)
        .bind(offset)
        .fetch_optional(conn)
        .await
        .map_err(Into::into)
    }
}
