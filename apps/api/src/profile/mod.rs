//! User profile: overall stats and profile edits.

pub mod handlers;
