use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::common::InstructorId;

use super::availability::Availability;

/// Instructor model - SQL persistence layer
///
/// `city` and `area` are free text matched case-insensitively. Availability
/// is kept inline as JSONB; offerings and sessions live in their own tables.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Instructor {
    pub id: InstructorId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub city: Option<String>,
    pub area: Option<String>,
    pub availability: Json<Availability>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Instructor {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub async fn find_by_id(id: InstructorId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM instructors WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_ids(ids: &[InstructorId], executor: impl PgExecutor<'_>) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM instructors WHERE id = ANY($1) ORDER BY created_at, id",
        )
        .bind(ids)
        .fetch_all(executor)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_email(email: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM instructors WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Row-locks the instructor for a read-modify-write inside a transaction
    pub async fn find_by_email_for_update(
        email: &str,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM instructors WHERE email = $1 FOR UPDATE")
            .bind(email)
            .fetch_optional(conn)
            .await
            .map_err(Into::into)
    }

    /// List instructors, optionally narrowed by city and/or area
    /// (case-insensitive exact match).
    pub async fn find_filtered(
        city: Option<&str>,
        area: Option<&str>,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM instructors
             WHERE ($1::TEXT IS NULL OR LOWER(TRIM(city)) = LOWER(TRIM($1)))
               AND ($2::TEXT IS NULL OR LOWER(TRIM(area)) = LOWER(TRIM($2)))
             ORDER BY created_at, id",
        )
        .bind(city)
        .bind(area)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_in_city(city: &str, pool: &PgPool) -> Result<Vec<Self>> {
        Self::find_filtered(Some(city), None, pool).await
    }

    /// Insert new instructor with an empty weekly schedule
    pub async fn create(
        first_name: &str,
        last_name: &str,
        email: &str,
        city: Option<&str>,
        area: Option<&str>,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO instructors (id, first_name, last_name, email, city, area)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(InstructorId::new())
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(city)
        .bind(area)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Update location fields; `None` leaves a field unchanged
    pub async fn update_location(
        id: InstructorId,
        city: Option<&str>,
        area: Option<&str>,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE instructors
             SET city = COALESCE($2, city),
                 area = COALESCE($3, area),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(city)
        .bind(area)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    pub async fn save_availability(
        id: InstructorId,
        availability: &Availability,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE instructors
             SET availability = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(Json(availability))
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    /// Hard delete. Returns false when no such instructor exists.
    pub async fn delete(id: InstructorId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM instructors WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
