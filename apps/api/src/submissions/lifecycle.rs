use sqlx::PgPool;
use tracing::info;

use crate::ai::InterviewContext;
use crate::catalog::queries as catalog;
use crate::errors::AppError;
use crate::models::interview::{message_role, MessageRow, ThreadRow};
use crate::models::submission::{status, SubmissionRow};
use crate::state::AppState;
use crate::tasks::service as tasks;

#[derive(Debug)]
pub struct SubmitParams {
    pub task_id: i64,
    pub content: String,
    pub is_draft: bool,
    pub time_spent_seconds: Option<i32>,
}

pub fn status_for(is_draft: bool) -> &'static str {
    if is_draft {
        status::DRAFT
    } else {
        status::SUBMITTED
    }
}

/// Creates or overwrites the caller's submission for a task.
///
/// A draft save is a plain upsert. Finalization additionally generates the
/// interviewer persona and first question, then commits the submission,
/// the thread and its first message in a single transaction. An AI
/// failure leaves no partial state behind.
pub async fn submit(
    state: &AppState,
    user_id: i64,
    params: SubmitParams,
) -> Result<(SubmissionRow, Option<(ThreadRow, MessageRow)>), AppError> {
    let task = tasks::get_task(&state.db, params.task_id).await?;

    if let Some(existing) = get_for_task(&state.db, user_id, params.task_id).await? {
        if !existing.is_draft {
            return Err(AppError::AlreadySubmitted);
        }
    }

    if params.is_draft {
        let submission = upsert_submission(&state.db, user_id, &params)
            .await?
            .ok_or(AppError::AlreadySubmitted)?;
        return Ok((submission, None));
    }

    // Finalization: run all generation before touching the database so the
    // submission, thread and first message commit together or not at all.
    let company = catalog::get_company(&state.db, task.company_id).await?;
    let job_role = catalog::get_job_role(&state.db, task.job_role_id).await?;

    let persona = state
        .generator
        .generate_persona(&company.name, &job_role.name, &task.title)
        .await?;

    let ctx = InterviewContext {
        company_name: company.name,
        job_role_name: job_role.name,
        task_title: task.title,
        task_description: task.description,
        submission_content: params.content.clone(),
        persona_name: persona.persona_name.clone(),
        persona_department: persona.persona_department.clone(),
    };
    let first_question = state.generator.generate_first_question(&ctx).await?;

    let mut tx = state.db.begin().await?;

    let submission = upsert_submission(&mut *tx, user_id, &params)
        .await?
        .ok_or(AppError::AlreadySubmitted)?;

    // The first question counts as asked: asked_count starts at 1.
    let thread: ThreadRow = sqlx::query_as(
        r#"
        INSERT INTO threads
            (submission_id, user_id, persona_name, persona_department,
             topic_tag, total_questions, asked_count)
        VALUES ($1, $2, $3, $4, $5, $6, 1)
        RETURNING *
        "#,
    )
    .bind(submission.id)
    .bind(user_id)
    .bind(&persona.persona_name)
    .bind(&persona.persona_department)
    .bind(&persona.topic_tag)
    .bind(persona.total_questions)
    .fetch_one(&mut *tx)
    .await?;

    let message: MessageRow = sqlx::query_as(
        r#"
        INSERT INTO messages (thread_id, role, content, message_order)
        VALUES ($1, $2, $3, 1)
        RETURNING *
        "#,
    )
    .bind(thread.id)
    .bind(message_role::AI)
    .bind(&first_question)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(
        "Submission {} finalized; thread {} opened with {} questions",
        submission.id, thread.id, thread.total_questions
    );
    Ok((submission, Some((thread, message))))
}

/// Revises a draft submission. Non-draft submissions are immutable.
pub async fn revise(
    pool: &PgPool,
    user_id: i64,
    submission_id: i64,
    content: &str,
    time_spent_seconds: Option<i32>,
) -> Result<SubmissionRow, AppError> {
    let submission = get_submission(pool, submission_id).await?;
    if submission.user_id != user_id {
        return Err(AppError::Forbidden);
    }
    if !submission.is_draft {
        return Err(AppError::AlreadyFinal);
    }

    let updated: SubmissionRow = sqlx::query_as(
        r#"
        UPDATE submissions
        SET content = $1,
            time_spent_seconds = COALESCE($2, time_spent_seconds),
            updated_at = now()
        WHERE id = $3
        RETURNING *
        "#,
    )
    .bind(content)
    .bind(time_spent_seconds)
    .bind(submission_id)
    .fetch_one(pool)
    .await?;
    Ok(updated)
}

pub async fn get_submission(pool: &PgPool, submission_id: i64) -> Result<SubmissionRow, AppError> {
    let row: Option<SubmissionRow> = sqlx::query_as("SELECT * FROM submissions WHERE id = $1")
        .bind(submission_id)
        .fetch_optional(pool)
        .await?;
    row.ok_or(AppError::SubmissionNotFound(submission_id))
}

pub async fn get_for_task(
    pool: &PgPool,
    user_id: i64,
    task_id: i64,
) -> Result<Option<SubmissionRow>, AppError> {
    let row: Option<SubmissionRow> =
        sqlx::query_as("SELECT * FROM submissions WHERE user_id = $1 AND task_id = $2")
            .bind(user_id)
            .bind(task_id)
            .fetch_optional(pool)
            .await?;
    Ok(row)
}

/// Upsert keyed on (user_id, task_id). The `WHERE submissions.is_draft`
/// guard makes a conflicting non-draft row yield no result instead of
/// being overwritten, so a lost race still maps to `ALREADY_SUBMITTED`.
async fn upsert_submission<'e, E>(
    executor: E,
    user_id: i64,
    params: &SubmitParams,
) -> Result<Option<SubmissionRow>, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = sqlx::Postgres>,
{
    sqlx::query_as(
        r#"
        INSERT INTO submissions (user_id, task_id, content, is_draft, status, time_spent_seconds)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (user_id, task_id) DO UPDATE
        SET content = EXCLUDED.content,
            is_draft = EXCLUDED.is_draft,
            status = EXCLUDED.status,
            time_spent_seconds = COALESCE(EXCLUDED.time_spent_seconds, submissions.time_spent_seconds),
            updated_at = now()
        WHERE submissions.is_draft
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(params.task_id)
    .bind(&params.content)
    .bind(params.is_draft)
    .bind(status_for(params.is_draft))
    .bind(params.time_spent_seconds)
    .fetch_optional(executor)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_follows_draft_flag() {
        assert_eq!(status_for(true), status::DRAFT);
        assert_eq!(status_for(false), status::SUBMITTED);
    }
}
