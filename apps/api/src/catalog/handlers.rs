use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::catalog::{CompanyRow, JobRoleRow};
use crate::state::AppState;

use super::queries;

#[derive(Debug, Deserialize)]
pub struct CompanySearchQuery {
    pub q: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    20
}

/// GET /companies
pub async fn handle_search_companies(
    State(state): State<AppState>,
    Query(params): Query<CompanySearchQuery>,
) -> Result<Json<Vec<CompanyRow>>, AppError> {
    let limit = params.limit.clamp(1, 100);
    let companies = queries::search_companies(&state.db, params.q.as_deref(), limit).await?;
    Ok(Json(companies))
}

#[derive(Debug, Deserialize)]
pub struct JobRoleSearchQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

/// GET /job-roles
pub async fn handle_search_job_roles(
    State(state): State<AppState>,
    Query(params): Query<JobRoleSearchQuery>,
) -> Result<Json<Vec<JobRoleRow>>, AppError> {
    let roles =
        queries::search_job_roles(&state.db, params.category.as_deref(), params.q.as_deref())
            .await?;
    Ok(Json(roles))
}

/// GET /job-roles/categories
pub async fn handle_job_role_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    let categories = queries::get_job_role_categories(&state.db).await?;
    Ok(Json(categories))
}
