use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::interview::{MessageRow, ThreadRow};
use crate::models::submission::SubmissionRow;
use crate::state::AppState;

use super::lifecycle::{self, SubmitParams};

#[derive(Debug, Deserialize)]
pub struct SubmissionCreateRequest {
    pub task_id: i64,
    pub content: String,
    #[serde(default)]
    pub is_draft: bool,
    pub time_spent_seconds: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct SubmissionCreateResponse {
    pub submission: SubmissionRow,
    pub thread: Option<ThreadRow>,
    pub first_message: Option<MessageRow>,
}

/// POST /submissions
/// Saves a draft or finalizes a submission. Finalizing opens the AI
/// interview thread and returns it together with the first question.
pub async fn handle_create_submission(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(body): Json<SubmissionCreateRequest>,
) -> Result<Json<SubmissionCreateResponse>, AppError> {
    if body.content.trim().is_empty() {
        return Err(AppError::Validation("content must not be empty".to_string()));
    }

    let (submission, thread) = lifecycle::submit(
        &state,
        current.user_id,
        SubmitParams {
            task_id: body.task_id,
            content: body.content,
            is_draft: body.is_draft,
            time_spent_seconds: body.time_spent_seconds,
        },
    )
    .await?;

    let (thread, first_message) = match thread {
        Some((t, m)) => (Some(t), Some(m)),
        None => (None, None),
    };
    Ok(Json(SubmissionCreateResponse {
        submission,
        thread,
        first_message,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SubmissionUpdateRequest {
    pub content: String,
    pub time_spent_seconds: Option<i32>,
}

/// PUT /submissions/:id
/// Revises a draft. Finalized submissions are immutable.
pub async fn handle_update_submission(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(submission_id): Path<i64>,
    Json(body): Json<SubmissionUpdateRequest>,
) -> Result<Json<SubmissionRow>, AppError> {
    if body.content.trim().is_empty() {
        return Err(AppError::Validation("content must not be empty".to_string()));
    }
    let updated = lifecycle::revise(
        &state.db,
        current.user_id,
        submission_id,
        &body.content,
        body.time_spent_seconds,
    )
    .await?;
    Ok(Json(updated))
}

/// GET /submissions/:id
pub async fn handle_get_submission(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(submission_id): Path<i64>,
) -> Result<Json<SubmissionRow>, AppError> {
    let submission = lifecycle::get_submission(&state.db, submission_id).await?;
    if submission.user_id != current.user_id {
        return Err(AppError::Forbidden);
    }
    Ok(Json(submission))
}
