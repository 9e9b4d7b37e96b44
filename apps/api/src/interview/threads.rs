use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::info;

use crate::ai::EvaluationOutcome;
use crate::errors::AppError;
use crate::evaluations::competency;
use crate::models::evaluation::EvaluationRow;
use crate::models::interview::{message_role, thread_status, MessageRow, ThreadRow};
use crate::models::submission::status as submission_status;

pub async fn get_thread(pool: &PgPool, thread_id: i64) -> Result<ThreadRow, AppError> {
    let row: Option<ThreadRow> = sqlx::query_as("SELECT * FROM threads WHERE id = $1")
        .bind(thread_id)
        .fetch_optional(pool)
        .await?;
    row.ok_or(AppError::ThreadNotFound(thread_id))
}

pub async fn get_messages(pool: &PgPool, thread_id: i64) -> Result<Vec<MessageRow>, AppError> {
    let rows: Vec<MessageRow> =
        sqlx::query_as("SELECT * FROM messages WHERE thread_id = $1 ORDER BY message_order")
            .bind(thread_id)
            .fetch_all(pool)
            .await?;
    Ok(rows)
}

/// Appends the user's answer. Committed on its own: the answer stays
/// durable even if the AI turn that follows it fails.
pub async fn append_user_message(
    pool: &PgPool,
    thread_id: i64,
    content: &str,
    message_order: i32,
) -> Result<MessageRow, AppError> {
    let row: MessageRow = sqlx::query_as(
        r#"
        INSERT INTO messages (thread_id, role, content, message_order)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(thread_id)
    .bind(message_role::USER)
    .bind(content)
    .bind(message_order)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Appends the AI follow-up and advances `asked_count`, in one transaction.
///
/// The counter update is conditional on the state observed when the turn
/// began; if another writer advanced the thread in the meantime the
/// transaction rolls back and the caller gets `ThreadBusy`.
pub async fn append_follow_up(
    pool: &PgPool,
    thread: &ThreadRow,
    content: &str,
    message_order: i32,
) -> Result<(MessageRow, ThreadRow), AppError> {
    let mut tx = pool.begin().await?;

    let message: MessageRow = sqlx::query_as(
        r#"
        INSERT INTO messages (thread_id, role, content, message_order)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(thread.id)
    .bind(message_role::AI)
    .bind(content)
    .bind(message_order)
    .fetch_one(&mut *tx)
    .await?;

    let updated: Option<ThreadRow> = sqlx::query_as(
        r#"
        UPDATE threads
        SET asked_count = asked_count + 1, updated_at = now()
        WHERE id = $1 AND asked_count = $2 AND status = $3
        RETURNING *
        "#,
    )
    .bind(thread.id)
    .bind(thread.asked_count)
    .bind(thread_status::QUESTIONING)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(updated) = updated else {
        tx.rollback().await?;
        return Err(AppError::ThreadBusy);
    };

    tx.commit().await?;
    Ok((message, updated))
}

/// Completes the thread: persists the evaluation, marks the submission
/// evaluated, records the competency aggregate and flips the thread to
/// `completed`, all in one transaction.
///
/// The status flip is conditional on the state observed when the turn
/// began, and the unique constraints on `evaluations` back it up: a
/// second evaluation for the same submission/thread cannot be committed.
pub async fn complete_and_evaluate(
    pool: &PgPool,
    thread: &ThreadRow,
    company_id: i64,
    job_role_id: i64,
    outcome: &EvaluationOutcome,
) -> Result<(EvaluationRow, ThreadRow), AppError> {
    let mut tx = pool.begin().await?;

    let completed: Option<ThreadRow> = sqlx::query_as(
        r#"
        UPDATE threads
        SET status = $1, updated_at = now()
        WHERE id = $2 AND asked_count = $3 AND status = $4
        RETURNING *
        "#,
    )
    .bind(thread_status::COMPLETED)
    .bind(thread.id)
    .bind(thread.asked_count)
    .bind(thread_status::QUESTIONING)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(completed) = completed else {
        tx.rollback().await?;
        return Err(AppError::ThreadBusy);
    };

    let evaluation: EvaluationRow = sqlx::query_as(
        r#"
        INSERT INTO evaluations
            (submission_id, thread_id, total_score, score_label,
             scores_detail, ai_summary, analysis_points, feedback)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(thread.submission_id)
    .bind(thread.id)
    .bind(outcome.total_score)
    .bind(&outcome.score_label)
    .bind(Json(&outcome.scores_detail))
    .bind(&outcome.ai_summary)
    .bind(Json(&outcome.analysis_points))
    .bind(&outcome.feedback)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("UPDATE submissions SET status = $1, updated_at = now() WHERE id = $2")
        .bind(submission_status::EVALUATED)
        .bind(thread.submission_id)
        .execute(&mut *tx)
        .await?;

    competency::record(
        &mut *tx,
        thread.user_id,
        company_id,
        job_role_id,
        outcome.total_score,
        &outcome.analysis_points.weaknesses,
    )
    .await?;

    tx.commit().await?;

    info!(
        "Thread {} completed; submission {} scored {}/100",
        thread.id, thread.submission_id, outcome.total_score
    );
    Ok((evaluation, completed))
}

/// Joined context for one thread's submission: everything the generator
/// needs plus the (company, role) pair for competency recording.
#[derive(Debug, FromRow)]
pub struct SubmissionContextRow {
    pub submission_id: i64,
    pub submission_content: String,
    pub task_title: String,
    pub task_description: String,
    pub key_points: Option<Json<Vec<String>>>,
    pub company_id: i64,
    pub job_role_id: i64,
    pub company_name: String,
    pub job_role_name: String,
}

pub async fn get_submission_context(
    pool: &PgPool,
    submission_id: i64,
) -> Result<SubmissionContextRow, AppError> {
    let row: Option<SubmissionContextRow> = sqlx::query_as(
        r#"
        SELECT s.id AS submission_id,
               s.content AS submission_content,
               t.title AS task_title,
               t.description AS task_description,
               t.key_points,
               t.company_id,
               t.job_role_id,
               c.name AS company_name,
               jr.name AS job_role_name
        FROM submissions s
        JOIN tasks t ON t.id = s.task_id
        JOIN companies c ON c.id = t.company_id
        JOIN job_roles jr ON jr.id = t.job_role_id
        WHERE s.id = $1
        "#,
    )
    .bind(submission_id)
    .fetch_optional(pool)
    .await?;
    row.ok_or(AppError::SubmissionNotFound(submission_id))
}

/// One row of the thread list view, with the per-thread aggregates the
/// list endpoint shows.
#[derive(Debug, FromRow)]
pub struct ThreadListRow {
    pub id: i64,
    pub persona_name: String,
    pub persona_department: String,
    pub topic_tag: String,
    pub status: String,
    pub total_questions: i32,
    pub asked_count: i32,
    pub message_count: i64,
    pub last_message: Option<String>,
    pub company_name: String,
    pub job_role_name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

pub async fn list_threads(
    pool: &PgPool,
    user_id: i64,
    limit: i64,
    offset: i64,
) -> Result<(Vec<ThreadListRow>, i64), AppError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM threads WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    let rows: Vec<ThreadListRow> = sqlx::query_as(
        r#"
        SELECT th.id, th.persona_name, th.persona_department, th.topic_tag,
               th.status, th.total_questions, th.asked_count,
               (SELECT COUNT(*) FROM messages m WHERE m.thread_id = th.id) AS message_count,
               (SELECT m.content FROM messages m
                 WHERE m.thread_id = th.id
                 ORDER BY m.message_order DESC LIMIT 1) AS last_message,
               c.name AS company_name,
               jr.name AS job_role_name,
               th.created_at, th.updated_at
        FROM threads th
        JOIN submissions s ON s.id = th.submission_id
        JOIN tasks t ON t.id = s.task_id
        JOIN companies c ON c.id = t.company_id
        JOIN job_roles jr ON jr.id = t.job_role_id
        WHERE th.user_id = $1
        ORDER BY th.updated_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok((rows, total))
}
