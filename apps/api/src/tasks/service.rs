use sqlx::types::Json;
use sqlx::PgPool;

use crate::ai::TaskDraft;
use crate::errors::AppError;
use crate::models::task::TaskRow;

#[derive(Debug, Default)]
pub struct TaskFilter {
    pub company_id: Option<i64>,
    pub job_role_id: Option<i64>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
}

pub async fn list_tasks(
    pool: &PgPool,
    filter: &TaskFilter,
    limit: i64,
    offset: i64,
) -> Result<(Vec<TaskRow>, i64), AppError> {
    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM tasks
        WHERE ($1::bigint IS NULL OR company_id = $1)
          AND ($2::bigint IS NULL OR job_role_id = $2)
          AND ($3::text IS NULL OR category = $3)
          AND ($4::text IS NULL OR difficulty = $4)
        "#,
    )
    .bind(filter.company_id)
    .bind(filter.job_role_id)
    .bind(&filter.category)
    .bind(&filter.difficulty)
    .fetch_one(pool)
    .await?;

    let items: Vec<TaskRow> = sqlx::query_as(
        r#"
        SELECT * FROM tasks
        WHERE ($1::bigint IS NULL OR company_id = $1)
          AND ($2::bigint IS NULL OR job_role_id = $2)
          AND ($3::text IS NULL OR category = $3)
          AND ($4::text IS NULL OR difficulty = $4)
        ORDER BY created_at DESC
        LIMIT $5 OFFSET $6
        "#,
    )
    .bind(filter.company_id)
    .bind(filter.job_role_id)
    .bind(&filter.category)
    .bind(&filter.difficulty)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok((items, total))
}

pub async fn get_task(pool: &PgPool, task_id: i64) -> Result<TaskRow, AppError> {
    let row: Option<TaskRow> = sqlx::query_as("SELECT * FROM tasks WHERE id = $1")
        .bind(task_id)
        .fetch_optional(pool)
        .await?;
    row.ok_or(AppError::TaskNotFound(task_id))
}

/// Persists a batch of generated task drafts in one transaction.
pub async fn insert_task_drafts(
    pool: &PgPool,
    company_id: i64,
    job_role_id: i64,
    drafts: &[TaskDraft],
) -> Result<Vec<TaskRow>, AppError> {
    let mut tx = pool.begin().await?;
    let mut tasks = Vec::with_capacity(drafts.len());

    for draft in drafts {
        let task: TaskRow = sqlx::query_as(
            r#"
            INSERT INTO tasks
                (company_id, job_role_id, title, description, category,
                 difficulty, estimated_minutes, answer_type, key_points, tech_stack)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(job_role_id)
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(&draft.category)
        .bind(&draft.difficulty)
        .bind(draft.estimated_minutes)
        .bind(&draft.answer_type)
        .bind(Json(&draft.key_points))
        .bind(Json(&draft.tech_stack))
        .fetch_one(&mut *tx)
        .await?;
        tasks.push(task);
    }

    tx.commit().await?;
    Ok(tasks)
}

/// Task ids among `task_ids` for which `user_id` has any submission.
pub async fn submitted_task_ids(
    pool: &PgPool,
    user_id: i64,
    task_ids: &[i64],
) -> Result<Vec<i64>, AppError> {
    if task_ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows: Vec<(i64,)> = sqlx::query_as(
        "SELECT task_id FROM submissions WHERE user_id = $1 AND task_id = ANY($2)",
    )
    .bind(user_id)
    .bind(task_ids)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}
