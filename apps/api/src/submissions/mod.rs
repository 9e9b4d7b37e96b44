//! Submission lifecycle: draft upsert, finalization (which opens the
//! interview thread) and revision.

pub mod handlers;
pub mod lifecycle;
