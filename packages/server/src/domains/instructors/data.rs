use serde::{Deserialize, Serialize};

use crate::common::InstructorId;
use crate::domains::instructors::models::{Availability, CourseOffering, Instructor};

/// API representation of an instructor with offerings and schedule
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorData {
    pub id: InstructorId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub city: Option<String>,
    /// Area within the city
    pub location: Option<String>,
    pub subjects: Vec<CourseOffering>,
    pub availability: Availability,
    pub created_at: String,
}

impl InstructorData {
    pub fn new(instructor: Instructor, subjects: Vec<CourseOffering>) -> Self {
        Self {
            id: instructor.id,
            first_name: instructor.first_name,
            last_name: instructor.last_name,
            email: instructor.email,
            city: instructor.city,
            location: instructor.area,
            subjects,
            availability: instructor.availability.0,
            created_at: instructor.created_at.to_rfc3339(),
        }
    }
}

/// Compact instructor reference embedded in booking responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorSummary {
    pub id: InstructorId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&Instructor> for InstructorSummary {
    fn from(instructor: &Instructor) -> Self {
        Self {
            id: instructor.id,
            first_name: instructor.first_name.clone(),
            last_name: instructor.last_name.clone(),
            email: instructor.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInstructorInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    pub location: Option<String>,
}

/// Partial profile update; absent fields are left as they are
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileInput {
    pub city: Option<String>,
    pub location: Option<String>,
    pub subjects: Option<Vec<CourseOffering>>,
}
