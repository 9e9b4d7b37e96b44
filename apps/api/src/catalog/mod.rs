//! Company and job-role catalog: read-only lookups backing task
//! generation and browsing.

pub mod handlers;
pub mod queries;
