use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json as Jsonb;
use sqlx::FromRow;

use crate::ai::{AnalysisPoints, ScoreDetail};
use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::catalog::{CompanyBrief, JobRoleBrief};
use crate::state::AppState;

/// Fully joined evaluation detail row: the evaluation, its submission,
/// the task and the catalog names, fetched in one query.
#[derive(Debug, FromRow)]
struct EvaluationDetailRow {
    id: i64,
    total_score: i32,
    score_label: String,
    scores_detail: Jsonb<Vec<ScoreDetail>>,
    ai_summary: String,
    analysis_points: Jsonb<AnalysisPoints>,
    feedback: Option<String>,
    created_at: DateTime<Utc>,
    submission_id: i64,
    submission_user_id: i64,
    submission_content: String,
    time_spent_seconds: Option<i32>,
    task_id: i64,
    task_title: String,
    task_category: String,
    task_difficulty: String,
    company_id: i64,
    company_name: String,
    job_role_id: i64,
    job_role_name: String,
    thread_id: i64,
    persona_name: String,
}

#[derive(Debug, Serialize)]
pub struct TaskInEvaluation {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub difficulty: String,
    pub company: CompanyBrief,
    pub job_role: JobRoleBrief,
}

#[derive(Debug, Serialize)]
pub struct SubmissionInEvaluation {
    pub id: i64,
    pub content: String,
    pub time_spent_seconds: Option<i32>,
    pub task: TaskInEvaluation,
}

#[derive(Debug, Serialize)]
pub struct ThreadInEvaluation {
    pub id: i64,
    pub persona_name: String,
}

#[derive(Debug, Serialize)]
pub struct EvaluationDetailResponse {
    pub id: i64,
    pub total_score: i32,
    pub score_label: String,
    pub scores_detail: Vec<ScoreDetail>,
    pub ai_summary: String,
    pub analysis_points: AnalysisPoints,
    pub feedback: Option<String>,
    pub submission: SubmissionInEvaluation,
    pub thread: ThreadInEvaluation,
    pub created_at: DateTime<Utc>,
}

/// GET /evaluations/:id
pub async fn handle_evaluation_detail(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(evaluation_id): Path<i64>,
) -> Result<Json<EvaluationDetailResponse>, AppError> {
    let row: Option<EvaluationDetailRow> = sqlx::query_as(
        r#"
        SELECT e.id, e.total_score, e.score_label, e.scores_detail,
               e.ai_summary, e.analysis_points, e.feedback, e.created_at,
               s.id AS submission_id,
               s.user_id AS submission_user_id,
               s.content AS submission_content,
               s.time_spent_seconds,
               t.id AS task_id,
               t.title AS task_title,
               t.category AS task_category,
               t.difficulty AS task_difficulty,
               c.id AS company_id,
               c.name AS company_name,
               jr.id AS job_role_id,
               jr.name AS job_role_name,
               th.id AS thread_id,
               th.persona_name
        FROM evaluations e
        JOIN submissions s ON s.id = e.submission_id
        JOIN tasks t ON t.id = s.task_id
        JOIN companies c ON c.id = t.company_id
        JOIN job_roles jr ON jr.id = t.job_role_id
        JOIN threads th ON th.id = e.thread_id
        WHERE e.id = $1
        "#,
    )
    .bind(evaluation_id)
    .fetch_optional(&state.db)
    .await?;

    let row = row.ok_or(AppError::EvaluationNotFound(evaluation_id))?;
    if row.submission_user_id != current.user_id {
        return Err(AppError::Forbidden);
    }

    Ok(Json(EvaluationDetailResponse {
        id: row.id,
        total_score: row.total_score,
        score_label: row.score_label,
        scores_detail: row.scores_detail.0,
        ai_summary: row.ai_summary,
        analysis_points: row.analysis_points.0,
        feedback: row.feedback,
        submission: SubmissionInEvaluation {
            id: row.submission_id,
            content: row.submission_content,
            time_spent_seconds: row.time_spent_seconds,
            task: TaskInEvaluation {
                id: row.task_id,
                title: row.task_title,
                category: row.task_category,
                difficulty: row.task_difficulty,
                company: CompanyBrief {
                    id: row.company_id,
                    name: row.company_name,
                },
                job_role: JobRoleBrief {
                    id: row.job_role_id,
                    name: row.job_role_name,
                },
            },
        },
        thread: ThreadInEvaluation {
            id: row.thread_id,
            persona_name: row.persona_name,
        },
        created_at: row.created_at,
    }))
}
