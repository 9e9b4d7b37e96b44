use std::sync::Arc;

use sqlx::PgPool;

use crate::ai::ContentGenerator;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// The AI content generator. Gemini-backed in production; tests inject
    /// a scripted fake through the same trait object.
    pub generator: Arc<dyn ContentGenerator>,
    pub config: Config,
}
