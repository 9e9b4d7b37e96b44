use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ai::{InterviewContext, Turn};
use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::evaluation::EvaluationRow;
use crate::models::interview::{thread_status, MessageRow};
use crate::models::{Page, PageQuery};
use crate::state::AppState;
use crate::submissions::lifecycle;

use super::machine::{self, TurnAction};
use super::threads;

const PREVIEW_CHARS: usize = 100;

#[derive(Debug, Serialize)]
pub struct ThreadListItem {
    pub id: i64,
    pub persona_name: String,
    pub persona_department: String,
    pub topic_tag: String,
    pub status: String,
    pub total_questions: i32,
    pub asked_count: i32,
    pub message_count: i64,
    pub last_message_preview: Option<String>,
    pub company_name: String,
    pub job_role_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// GET /threads
pub async fn handle_list_threads(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(page): Query<PageQuery>,
) -> Result<Json<Page<ThreadListItem>>, AppError> {
    let (limit, offset) = page.limits();
    let (rows, total) = threads::list_threads(&state.db, current.user_id, limit, offset).await?;

    let items = rows
        .into_iter()
        .map(|r| ThreadListItem {
            id: r.id,
            persona_name: r.persona_name,
            persona_department: r.persona_department,
            topic_tag: r.topic_tag,
            status: r.status,
            total_questions: r.total_questions,
            asked_count: r.asked_count,
            message_count: r.message_count,
            last_message_preview: r.last_message.map(|m| preview(&m)),
            company_name: r.company_name,
            job_role_name: r.job_role_name,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
        .collect();

    Ok(Json(Page {
        items,
        total,
        page: page.page.max(1),
        page_size: limit,
    }))
}

#[derive(Debug, Serialize)]
pub struct SubmissionInThread {
    pub id: i64,
    pub task_id: i64,
    pub task_title: String,
}

#[derive(Debug, Serialize)]
pub struct EvaluationBrief {
    pub id: i64,
    pub total_score: i32,
    pub score_label: String,
}

#[derive(Debug, Serialize)]
pub struct ThreadDetailResponse {
    pub id: i64,
    pub persona_name: String,
    pub persona_department: String,
    pub topic_tag: String,
    pub status: String,
    pub total_questions: i32,
    pub asked_count: i32,
    pub submission: SubmissionInThread,
    pub evaluation: Option<EvaluationBrief>,
    pub messages: Vec<MessageRow>,
}

/// GET /threads/:id
pub async fn handle_thread_detail(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(thread_id): Path<i64>,
) -> Result<Json<ThreadDetailResponse>, AppError> {
    let thread = threads::get_thread(&state.db, thread_id).await?;
    if thread.user_id != current.user_id {
        return Err(AppError::Forbidden);
    }

    let messages = threads::get_messages(&state.db, thread_id).await?;
    let submission = lifecycle::get_submission(&state.db, thread.submission_id).await?;
    let task_title: Option<String> = sqlx::query_scalar("SELECT title FROM tasks WHERE id = $1")
        .bind(submission.task_id)
        .fetch_optional(&state.db)
        .await?;

    let evaluation: Option<EvaluationBrief> = sqlx::query_as::<_, (i64, i32, String)>(
        "SELECT id, total_score, score_label FROM evaluations WHERE submission_id = $1",
    )
    .bind(thread.submission_id)
    .fetch_optional(&state.db)
    .await?
    .map(|(id, total_score, score_label)| EvaluationBrief {
        id,
        total_score,
        score_label,
    });

    Ok(Json(ThreadDetailResponse {
        id: thread.id,
        persona_name: thread.persona_name,
        persona_department: thread.persona_department,
        topic_tag: thread.topic_tag,
        status: thread.status,
        total_questions: thread.total_questions,
        asked_count: thread.asked_count,
        submission: SubmissionInThread {
            id: submission.id,
            task_id: submission.task_id,
            task_title: task_title.unwrap_or_default(),
        },
        evaluation,
        messages,
    }))
}

#[derive(Debug, Deserialize)]
pub struct MessageCreateRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ThreadProgress {
    pub status: String,
    pub asked_count: i32,
    pub total_questions: i32,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub user_message: MessageRow,
    pub ai_message: Option<MessageRow>,
    pub thread: ThreadProgress,
    pub evaluation: Option<EvaluationRow>,
}

/// POST /threads/:id/messages
///
/// Appends the user's answer, then runs the AI turn: a follow-up question
/// while questions remain, the evaluation once the final question has been
/// answered. The answer is committed before the AI call, so a generation
/// failure leaves the answer durable and the thread state unchanged.
pub async fn handle_post_message(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(thread_id): Path<i64>,
    Json(body): Json<MessageCreateRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if body.content.trim().is_empty() {
        return Err(AppError::Validation("content must not be empty".to_string()));
    }

    let thread = threads::get_thread(&state.db, thread_id).await?;
    if thread.user_id != current.user_id {
        return Err(AppError::Forbidden);
    }
    if thread.status == thread_status::COMPLETED {
        return Err(AppError::ThreadCompleted);
    }

    let messages = threads::get_messages(&state.db, thread_id).await?;
    let next_order = machine::next_order(messages.len());

    let user_message =
        threads::append_user_message(&state.db, thread_id, &body.content, next_order).await?;

    let context = threads::get_submission_context(&state.db, thread.submission_id).await?;
    let ctx = InterviewContext {
        company_name: context.company_name.clone(),
        job_role_name: context.job_role_name.clone(),
        task_title: context.task_title.clone(),
        task_description: context.task_description.clone(),
        submission_content: context.submission_content.clone(),
        persona_name: thread.persona_name.clone(),
        persona_department: thread.persona_department.clone(),
    };

    let mut history: Vec<Turn> = messages
        .iter()
        .map(|m| Turn::new(m.role.clone(), m.content.clone()))
        .collect();
    history.push(Turn::new(user_message.role.clone(), user_message.content.clone()));

    match machine::decide_turn(thread.asked_count, thread.total_questions) {
        TurnAction::FollowUp { question_number } => {
            let question = state
                .generator
                .generate_follow_up(&ctx, &history, question_number, thread.total_questions)
                .await?;

            let (ai_message, updated) =
                threads::append_follow_up(&state.db, &thread, &question, next_order + 1).await?;

            Ok(Json(ChatResponse {
                user_message,
                ai_message: Some(ai_message),
                thread: ThreadProgress {
                    status: updated.status,
                    asked_count: updated.asked_count,
                    total_questions: updated.total_questions,
                },
                evaluation: None,
            }))
        }
        TurnAction::Evaluate => {
            let key_points = context
                .key_points
                .as_ref()
                .map(|kp| kp.0.clone())
                .unwrap_or_default();
            let outcome = state.generator.evaluate(&ctx, &key_points, &history).await?;

            let (evaluation, completed) = threads::complete_and_evaluate(
                &state.db,
                &thread,
                context.company_id,
                context.job_role_id,
                &outcome,
            )
            .await?;

            Ok(Json(ChatResponse {
                user_message,
                ai_message: None,
                thread: ThreadProgress {
                    status: completed.status,
                    asked_count: completed.asked_count,
                    total_questions: completed.total_questions,
                },
                evaluation: Some(evaluation),
            }))
        }
    }
}

/// Truncates to at most `PREVIEW_CHARS` characters on a char boundary.
fn preview(content: &str) -> String {
    content.chars().take(PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_long_messages() {
        let long = "x".repeat(500);
        assert_eq!(preview(&long).chars().count(), PREVIEW_CHARS);
    }

    #[test]
    fn test_preview_keeps_short_messages() {
        assert_eq!(preview("short"), "short");
    }

    #[test]
    fn test_preview_is_char_safe() {
        let text = "한".repeat(200);
        assert_eq!(preview(&text).chars().count(), PREVIEW_CHARS);
    }
}
