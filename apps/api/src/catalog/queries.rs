use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::catalog::{CompanyRow, JobRoleRow};

pub async fn search_companies(
    pool: &PgPool,
    q: Option<&str>,
    limit: i64,
) -> Result<Vec<CompanyRow>, AppError> {
    let rows = match q {
        Some(q) => {
            sqlx::query_as(
                "SELECT * FROM companies WHERE name ILIKE $1 ORDER BY name LIMIT $2",
            )
            .bind(format!("%{q}%"))
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as("SELECT * FROM companies ORDER BY name LIMIT $1")
                .bind(limit)
                .fetch_all(pool)
                .await?
        }
    };
    Ok(rows)
}

pub async fn get_company(pool: &PgPool, company_id: i64) -> Result<CompanyRow, AppError> {
    let row: Option<CompanyRow> = sqlx::query_as("SELECT * FROM companies WHERE id = $1")
        .bind(company_id)
        .fetch_optional(pool)
        .await?;
    row.ok_or(AppError::CompanyNotFound(company_id))
}

pub async fn search_job_roles(
    pool: &PgPool,
    category: Option<&str>,
    q: Option<&str>,
) -> Result<Vec<JobRoleRow>, AppError> {
    let rows = sqlx::query_as(
        r#"
        SELECT * FROM job_roles
        WHERE ($1::text IS NULL OR category = $1)
          AND ($2::text IS NULL OR name ILIKE $2)
        ORDER BY category, name
        "#,
    )
    .bind(category)
    .bind(q.map(|q| format!("%{q}%")))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn get_job_role(pool: &PgPool, job_role_id: i64) -> Result<JobRoleRow, AppError> {
    let row: Option<JobRoleRow> = sqlx::query_as("SELECT * FROM job_roles WHERE id = $1")
        .bind(job_role_id)
        .fetch_optional(pool)
        .await?;
    row.ok_or(AppError::JobRoleNotFound(job_role_id))
}

pub async fn get_job_role_categories(pool: &PgPool) -> Result<Vec<String>, AppError> {
    let rows: Vec<(String,)> =
        sqlx::query_as("SELECT DISTINCT category FROM job_roles ORDER BY category")
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().map(|(c,)| c).collect())
}
