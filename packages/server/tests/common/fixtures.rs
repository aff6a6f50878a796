//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly. Every email and city is
//! suffixed with a fresh UUID because the database is shared between tests.

use anyhow::Result;
use server_core::common::{Day, TimeWindow};
use server_core::domains::instructors::{Availability, CourseOffering, Instructor};
use server_core::domains::users::User;
use sqlx::PgPool;
use uuid::Uuid;

/// `"{prefix}-{uuid}"`, for values that must not collide across tests
pub fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

pub fn window(start: &str, end: &str) -> TimeWindow {
    TimeWindow::parse(start, end).expect("valid window")
}

pub async fn create_user(pool: &PgPool, name: &str) -> Result<User> {
    let email = format!("{}@example.com", unique("user"));
    User::create(name, &email, pool).await
}

/// Instructor fixture; build it with `InstructorFixture::new(city, area)`
pub struct InstructorFixture {
    pub first_name: String,
    pub city: String,
    pub area: String,
    pub offerings: Vec<CourseOffering>,
    pub availability: Availability,
}

impl InstructorFixture {
    pub fn new(city: &str, area: &str) -> Self {
        Self {
            first_name: "Test".to_string(),
            city: city.to_string(),
            area: area.to_string(),
            offerings: Vec::new(),
            availability: Availability::new(),
        }
    }

    pub fn named(mut self, first_name: &str) -> Self {
        self.first_name = first_name.to_string();
        self
    }

    pub fn teaching(mut self, course: &str, weeks: i32) -> Self {
        self.offerings.push(CourseOffering::new(course, weeks));
        self
    }

    pub fn available(mut self, day: Day, start: &str, end: &str) -> Self {
        self.availability = self.availability.with(day, window(start, end));
        self
    }

    pub async fn create(self, pool: &PgPool) -> Result<Instructor> {
        let email = format!("{}@example.com", unique("instructor"));
        let instructor = Instructor::create(
            &self.first_name,
            "Instructor",
            &email,
            Some(&self.city),
            Some(&self.area),
            pool,
        )
        .await?;

        let mut tx = pool.begin().await?;
        CourseOffering::replace_for_instructor(instructor.id, &self.offerings, &mut *tx).await?;
        Instructor::save_availability(instructor.id, &self.availability, &mut *tx).await?;
        tx.commit().await?;

        Ok(Instructor::find_by_id(instructor.id, pool)
            .await?
            .expect("instructor just created"))
    }
}
