pub mod filters;

pub use filters::{
    filter_by_availability, filter_by_course, filter_by_location, narrow, Candidate, MatchCriteria,
};
