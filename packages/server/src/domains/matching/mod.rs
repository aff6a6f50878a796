//! Matching domain - narrows the instructor directory to the candidates
//! for one booking request (location, then course, then availability).

pub mod activities;
pub mod utils;

pub use activities::find_candidates;
pub use utils::{Candidate, MatchCriteria};
