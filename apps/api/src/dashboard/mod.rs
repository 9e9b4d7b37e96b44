//! Dashboard: read-only weekly summary and competency overview.

pub mod handlers;
pub mod summary;
