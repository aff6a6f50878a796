use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};
use std::collections::HashMap;

use crate::common::types::deserialize_weeks;
use crate::common::InstructorId;

/// A course an instructor is qualified to teach, at one specific length.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CourseOffering {
    #[serde(rename = "name")]
    pub course_name: String,
    #[serde(rename = "durationWeeks", deserialize_with = "deserialize_weeks")]
    pub duration_weeks: i32,
}

#[derive(sqlx::FromRow)]
struct OfferingRow {
    instructor_id: InstructorId,
    course_name: String,
    duration_weeks: i32,
}

impl CourseOffering {
    pub fn new(course_name: impl Into<String>, duration_weeks: i32) -> Self {
        Self {
            course_name: course_name.into(),
            duration_weeks,
        }
    }

    /// Trimmed, case-insensitive name comparison plus an exact week count.
    pub fn matches(&self, course_name: &str, duration_weeks: i32) -> bool {
        self.duration_weeks == duration_weeks
            && self
                .course_name
                .trim()
                .eq_ignore_ascii_case(course_name.trim())
    }

    pub async fn find_for_instructor(id: InstructorId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT course_name, duration_weeks FROM instructor_offerings
             WHERE instructor_id = $1
             ORDER BY position",
        )
        .bind(id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Offerings for many instructors at once, grouped by instructor
    pub async fn find_for_instructors(
        ids: &[InstructorId],
        pool: &PgPool,
    ) -> Result<HashMap<InstructorId, Vec<Self>>> {
        let rows = sqlx::query_as::<_, OfferingRow>(
            "SELECT instructor_id, course_name, duration_weeks FROM instructor_offerings
             WHERE instructor_id = ANY($1)
             ORDER BY instructor_id, position",
        )
        .bind(ids)
        .fetch_all(pool)
        .await?;

        let mut grouped: HashMap<InstructorId, Vec<Self>> = HashMap::new();
        for row in rows {
            grouped
                .entry(row.instructor_id)
                .or_default()
                .push(Self::new(row.course_name, row.duration_weeks));
        }
        Ok(grouped)
    }

    /// Replace the whole offering list, keeping the given order
    pub async fn replace_for_instructor(
        id: InstructorId,
        offerings: &[Self],
        conn: &mut PgConnection,
    ) -> Result<()> {
        sqlx::query("DELETE FROM instructor_offerings WHERE instructor_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        for (position, offering) in offerings.iter().enumerate() {
            sqlx::query(
                "INSERT INTO instructor_offerings (instructor_id, position, course_name, duration_weeks)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(id)
            .bind(position as i32)
            .bind(offering.course_name.trim())
            .bind(offering.duration_weeks)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }
}
