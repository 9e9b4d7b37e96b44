use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

use crate::ai::{AnalysisPoints, ScoreDetail};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EvaluationRow {
    pub id: i64,
    pub submission_id: i64,
    pub thread_id: i64,
    pub total_score: i32,
    pub score_label: String,
    pub scores_detail: Json<Vec<ScoreDetail>>,
    pub ai_summary: String,
    pub analysis_points: Json<AnalysisPoints>,
    pub feedback: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CompetencyRow {
    pub id: i64,
    pub user_id: i64,
    pub company_id: i64,
    pub job_role_id: i64,
    pub avg_score: f64,
    pub attempt_count: i32,
    pub weak_tags: Option<Json<Vec<String>>>,
    pub updated_at: DateTime<Utc>,
}
