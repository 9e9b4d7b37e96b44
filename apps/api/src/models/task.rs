use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TaskRow {
    pub id: i64,
    pub company_id: i64,
    pub job_role_id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: String,
    pub estimated_minutes: i32,
    pub answer_type: String,
    pub key_points: Option<Json<Vec<String>>>,
    pub tech_stack: Option<Json<Vec<String>>>,
    pub created_at: DateTime<Utc>,
}
