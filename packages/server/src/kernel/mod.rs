//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::{MailerAdapter, ServerDeps};
pub use test_dependencies::{MockEmailService, SentEmail, TestDependencies};
pub use traits::*;
