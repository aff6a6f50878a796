//! Instructors domain activities - entry-point business logic

pub mod availability;
pub mod profile;
pub mod sessions;

pub use availability::{add_windows, delete_window, edit_window, get_availability, replace_availability};
pub use profile::{
    delete_instructor, get_profile, list_instructors, load_profile, register_instructor,
    update_profile,
};
pub use sessions::{add_sessions, delete_session, list_sessions};
