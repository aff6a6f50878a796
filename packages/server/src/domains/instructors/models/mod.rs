pub mod availability;
pub mod instructor;
pub mod offering;
pub mod session;

pub use availability::Availability;
pub use instructor::Instructor;
pub use offering::CourseOffering;
pub use session::{InstructorSession, NewSession};
