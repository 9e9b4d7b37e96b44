use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::CurrentUser;
use crate::catalog::queries as catalog;
use crate::errors::AppError;
use crate::models::catalog::{CompanyBrief, JobRoleBrief};
use crate::models::task::TaskRow;
use crate::models::{Page, PageQuery};
use crate::state::AppState;

use super::service::{self, TaskFilter};

const MAX_GENERATED_TASKS: u32 = 10;

#[derive(Debug, Deserialize)]
pub struct TaskGenerateRequest {
    pub company_id: i64,
    pub job_role_id: i64,
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    5
}

#[derive(Debug, Serialize)]
pub struct TaskGeneratedItem {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub difficulty: String,
    pub estimated_minutes: i32,
    pub answer_type: String,
    pub company: CompanyBrief,
    pub job_role: JobRoleBrief,
}

/// POST /tasks/generate
pub async fn handle_generate_tasks(
    State(state): State<AppState>,
    _current: CurrentUser,
    Json(body): Json<TaskGenerateRequest>,
) -> Result<Json<Vec<TaskGeneratedItem>>, AppError> {
    if body.count == 0 || body.count > MAX_GENERATED_TASKS {
        return Err(AppError::Validation(format!(
            "count must be between 1 and {MAX_GENERATED_TASKS}"
        )));
    }

    let company = catalog::get_company(&state.db, body.company_id).await?;
    let job_role = catalog::get_job_role(&state.db, body.job_role_id).await?;

    let drafts = state
        .generator
        .generate_tasks(&company.name, &job_role.name, body.count)
        .await?;

    let tasks =
        service::insert_task_drafts(&state.db, company.id, job_role.id, &drafts).await?;
    info!(
        "Stored {} generated tasks for {} / {}",
        tasks.len(),
        company.name,
        job_role.name
    );

    let items = tasks
        .into_iter()
        .map(|t| TaskGeneratedItem {
            id: t.id,
            title: t.title,
            category: t.category,
            difficulty: t.difficulty,
            estimated_minutes: t.estimated_minutes,
            answer_type: t.answer_type,
            company: CompanyBrief {
                id: company.id,
                name: company.name.clone(),
            },
            job_role: JobRoleBrief {
                id: job_role.id,
                name: job_role.name.clone(),
            },
        })
        .collect();
    Ok(Json(items))
}

// Pagination fields are inlined: serde(flatten) does not mix with
// query-string deserialization of numeric fields.
#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub company_id: Option<i64>,
    pub job_role_id: Option<i64>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TaskListItem {
    pub id: i64,
    pub company_id: i64,
    pub job_role_id: i64,
    pub title: String,
    pub category: String,
    pub difficulty: String,
    pub estimated_minutes: i32,
    pub answer_type: String,
    pub created_at: DateTime<Utc>,
    pub has_submission: bool,
}

/// GET /tasks
pub async fn handle_list_tasks(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(params): Query<TaskListQuery>,
) -> Result<Json<Page<TaskListItem>>, AppError> {
    let filter = TaskFilter {
        company_id: params.company_id,
        job_role_id: params.job_role_id,
        category: params.category,
        difficulty: params.difficulty,
    };
    let page = PageQuery {
        page: params.page.unwrap_or(1),
        page_size: params.page_size.unwrap_or(20),
    };
    let (limit, offset) = page.limits();
    let (tasks, total) = service::list_tasks(&state.db, &filter, limit, offset).await?;

    let ids: Vec<i64> = tasks.iter().map(|t| t.id).collect();
    let submitted = service::submitted_task_ids(&state.db, current.user_id, &ids).await?;

    let items = tasks
        .into_iter()
        .map(|t| TaskListItem {
            has_submission: submitted.contains(&t.id),
            id: t.id,
            company_id: t.company_id,
            job_role_id: t.job_role_id,
            title: t.title,
            category: t.category,
            difficulty: t.difficulty,
            estimated_minutes: t.estimated_minutes,
            answer_type: t.answer_type,
            created_at: t.created_at,
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
pub struct MySubmissionBrief {
    pub id: i64,
    pub status: String,
    pub is_draft: bool,
}

#[derive(Debug, Serialize)]
pub struct TaskDetailResponse {
    #[serde(flatten)]
    pub task: TaskRow,
    pub company: CompanyBrief,
    pub job_role: JobRoleBrief,
    pub my_submission: Option<MySubmissionBrief>,
}

/// GET /tasks/:id
pub async fn handle_task_detail(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(task_id): Path<i64>,
) -> Result<Json<TaskDetailResponse>, AppError> {
    let task = service::get_task(&state.db, task_id).await?;
    let company = catalog::get_company(&state.db, task.company_id).await?;
    let job_role = catalog::get_job_role(&state.db, task.job_role_id).await?;

    let my_submission: Option<MySubmissionBrief> = sqlx::query_as::<_, (i64, String, bool)>(
        "SELECT id, status, is_draft FROM submissions WHERE user_id = $1 AND task_id = $2",
    )
    .bind(current.user_id)
    .bind(task_id)
    .fetch_optional(&state.db)
    .await?
    .map(|(id, status, is_draft)| MySubmissionBrief {
        id,
        status,
        is_draft,
    });

    Ok(Json(TaskDetailResponse {
        task,
        company: CompanyBrief {
            id: company.id,
            name: company.name,
        },
        job_role: JobRoleBrief {
            id: job_role.id,
            name: job_role.name,
        },
        my_submission,
    }))
}
