use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Submission status values. The status only ever advances
/// draft -> submitted -> evaluated, never backward.
pub mod status {
    pub const DRAFT: &str = "draft";
    pub const SUBMITTED: &str = "submitted";
    pub const EVALUATED: &str = "evaluated";
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SubmissionRow {
    pub id: i64,
    pub user_id: i64,
    pub task_id: i64,
    pub content: String,
    pub is_draft: bool,
    pub status: String,
    pub time_spent_seconds: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
