// Skillbridge Portal - booking API core
//
// Matches course booking requests to qualified instructors and resolves
// first-come-first-served assignment. Domain logic lives in domains/*,
// infrastructure traits and the dependency container in kernel/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
