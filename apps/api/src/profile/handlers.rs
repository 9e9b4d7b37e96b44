use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::submission::status;
use crate::models::user::UserRow;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileStats {
    pub total_solved: i64,
    pub avg_score: f64,
    pub rank_percentile: Option<f64>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct RecentEvaluation {
    pub id: i64,
    pub task_title: String,
    pub total_score: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserRow,
    pub stats: ProfileStats,
    pub recent_submissions: Vec<RecentEvaluation>,
}

/// GET /profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let user: Option<UserRow> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(current.user_id)
        .fetch_optional(&state.db)
        .await?;
    let user = user.ok_or(AppError::UserNotFound(current.user_id))?;

    let total_solved: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM submissions WHERE user_id = $1 AND status <> $2",
    )
    .bind(current.user_id)
    .bind(status::DRAFT)
    .fetch_one(&state.db)
    .await?;

    let avg_score: Option<f64> = sqlx::query_scalar(
        r#"
        SELECT AVG(e.total_score)::float8
        FROM evaluations e
        JOIN submissions s ON s.id = e.submission_id
        WHERE s.user_id = $1 AND s.status <> $2
        "#,
    )
    .bind(current.user_id)
    .bind(status::DRAFT)
    .fetch_one(&state.db)
    .await?;

    let recent_submissions: Vec<RecentEvaluation> = sqlx::query_as(
        r#"
        SELECT e.id, t.title AS task_title, e.total_score, e.created_at
        FROM evaluations e
        JOIN submissions s ON s.id = e.submission_id
        JOIN tasks t ON t.id = s.task_id
        WHERE s.user_id = $1
        ORDER BY e.created_at DESC
        LIMIT 5
        "#,
    )
    .bind(current.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(ProfileResponse {
        user,
        stats: ProfileStats {
            total_solved,
            avg_score: ((avg_score.unwrap_or(0.0)) * 10.0).round() / 10.0,
            rank_percentile: None,
        },
        recent_submissions,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    pub name: Option<String>,
    pub bio: Option<String>,
}

/// PATCH /profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(body): Json<ProfileUpdateRequest>,
) -> Result<Json<UserRow>, AppError> {
    let user: Option<UserRow> = sqlx::query_as(
        r#"
        UPDATE users
        SET name = COALESCE($1, name),
            bio = COALESCE($2, bio)
        WHERE id = $3
        RETURNING *
        "#,
    )
    .bind(&body.name)
    .bind(&body.bio)
    .bind(current.user_id)
    .fetch_optional(&state.db)
    .await?;
    user.map(Json)
        .ok_or(AppError::UserNotFound(current.user_id))
}
