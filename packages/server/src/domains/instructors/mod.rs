pub mod activities;
pub mod data;
pub mod models;

// Re-export data types (API types)
pub use data::{InstructorData, InstructorSummary, RegisterInstructorInput, UpdateProfileInput};

// Re-export models (domain models)
pub use models::{Availability, CourseOffering, Instructor, InstructorSession, NewSession};
