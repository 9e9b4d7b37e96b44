use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CompanyRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub tech_blog_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct JobRoleRow {
    pub id: i64,
    pub category: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Minimal company reference embedded in task/evaluation payloads.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CompanyBrief {
    pub id: i64,
    pub name: String,
}

/// Minimal job-role reference embedded in task/evaluation payloads.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct JobRoleBrief {
    pub id: i64,
    pub name: String,
}
