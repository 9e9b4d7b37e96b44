use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Thread status values. `questioning` is the only live state;
/// `completed` is terminal and set in the same transaction that
/// persists the evaluation.
pub mod thread_status {
    pub const QUESTIONING: &str = "questioning";
    pub const COMPLETED: &str = "completed";
}

/// Message speaker roles. Alternation is a convention, not a checked
/// invariant; `message_order` is the sole sequencing mechanism.
pub mod message_role {
    pub const USER: &str = "user";
    pub const AI: &str = "ai";
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ThreadRow {
    pub id: i64,
    pub submission_id: i64,
    pub user_id: i64,
    pub persona_name: String,
    pub persona_department: String,
    pub topic_tag: String,
    pub status: String,
    pub total_questions: i32,
    pub asked_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MessageRow {
    pub id: i64,
    #[serde(skip_serializing)]
    pub thread_id: i64,
    pub role: String,
    pub content: String,
    pub message_order: i32,
    pub created_at: DateTime<Utc>,
}
