//! Notifications domain - the emails that follow booking creation and
//! assignment.

pub mod dispatcher;
pub mod messages;

pub use dispatcher::{DispatchMode, NotificationDispatcher, NotificationError};
pub use messages::Email;
