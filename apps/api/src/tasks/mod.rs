//! Practice tasks: AI generation, browsing and detail views.

pub mod handlers;
pub mod service;
