use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use crate::errors::AppError;
use crate::models::evaluation::CompetencyRow;
use crate::models::submission::status;

/// A recent submission is "correct" when its score clears this bar.
const PASS_SCORE: i32 = 60;

#[derive(Debug, Serialize)]
pub struct WeeklySummary {
    pub score_percentage: f64,
    pub problems_solved: i64,
    pub avg_time_minutes: f64,
    pub weak_tag_count: usize,
}

#[derive(Debug, Serialize)]
pub struct AiInsight {
    pub improvements: String,
    pub weak_areas: String,
}

#[derive(Debug, Serialize, FromRow)]
pub struct RecentSubmission {
    pub id: i64,
    pub task_title: String,
    pub category: String,
    pub total_score: Option<i32>,
    pub is_correct: Option<bool>,
    pub time_spent_seconds: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct CompetencySummary {
    pub company_name: String,
    pub job_role_name: String,
    pub avg_score: f64,
    pub attempt_count: i32,
    pub weak_tags: Option<Json<Vec<String>>>,
}

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub weekly_summary: WeeklySummary,
    pub ai_insight: AiInsight,
    pub recent_submissions: Vec<RecentSubmission>,
    pub competencies: Vec<CompetencySummary>,
}

pub async fn get_dashboard_summary(
    pool: &PgPool,
    user_id: i64,
) -> Result<DashboardSummary, AppError> {
    // Weekly window: non-draft submissions from the last 7 days.
    let (problems_solved, total_time_seconds): (i64, i64) = sqlx::query_as(
        r#"
        SELECT COUNT(*), COALESCE(SUM(time_spent_seconds), 0)::bigint
        FROM submissions
        WHERE user_id = $1 AND status <> $2
          AND created_at >= now() - interval '7 days'
        "#,
    )
    .bind(user_id)
    .bind(status::DRAFT)
    .fetch_one(pool)
    .await?;

    let weekly_avg_score: Option<f64> = sqlx::query_scalar(
        r#"
        SELECT AVG(e.total_score)::float8
        FROM evaluations e
        JOIN submissions s ON s.id = e.submission_id
        WHERE s.user_id = $1 AND s.status <> $2
          AND s.created_at >= now() - interval '7 days'
        "#,
    )
    .bind(user_id)
    .bind(status::DRAFT)
    .fetch_one(pool)
    .await?;

    let competencies: Vec<CompetencyRow> =
        sqlx::query_as("SELECT * FROM user_competencies WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await?;

    let weak_tags: BTreeSet<String> = competencies
        .iter()
        .filter_map(|c| c.weak_tags.as_ref())
        .flat_map(|tags| tags.0.iter().cloned())
        .collect();

    let avg_time_minutes = if problems_solved > 0 {
        total_time_seconds as f64 / problems_solved as f64 / 60.0
    } else {
        0.0
    };

    let weekly_summary = WeeklySummary {
        score_percentage: round1(weekly_avg_score.unwrap_or(0.0)),
        problems_solved,
        avg_time_minutes: round1(avg_time_minutes),
        weak_tag_count: weak_tags.len(),
    };

    let ai_insight = build_insight(problems_solved, &weak_tags);

    let recent_submissions: Vec<RecentSubmission> = sqlx::query_as(
        r#"
        SELECT s.id,
               t.title AS task_title,
               t.category,
               e.total_score,
               CASE WHEN e.total_score IS NULL THEN NULL
                    ELSE e.total_score >= $3 END AS is_correct,
               s.time_spent_seconds,
               s.created_at
        FROM submissions s
        JOIN tasks t ON t.id = s.task_id
        LEFT JOIN evaluations e ON e.submission_id = s.id
        WHERE s.user_id = $1 AND s.status <> $2
        ORDER BY s.created_at DESC
        LIMIT 10
        "#,
    )
    .bind(user_id)
    .bind(status::DRAFT)
    .bind(PASS_SCORE)
    .fetch_all(pool)
    .await?;

    let competency_summaries: Vec<CompetencySummary> = sqlx::query_as(
        r#"
        SELECT c.name AS company_name,
               jr.name AS job_role_name,
               ROUND(uc.avg_score::numeric, 1)::float8 AS avg_score,
               uc.attempt_count,
               uc.weak_tags
        FROM user_competencies uc
        JOIN companies c ON c.id = uc.company_id
        JOIN job_roles jr ON jr.id = uc.job_role_id
        WHERE uc.user_id = $1
        ORDER BY uc.updated_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(DashboardSummary {
        weekly_summary,
        ai_insight,
        recent_submissions,
        competencies: competency_summaries,
    })
}

fn build_insight(problems_solved: i64, weak_tags: &BTreeSet<String>) -> AiInsight {
    let improvements = if problems_solved > 0 {
        "Your skills are improving through steady task practice.".to_string()
    } else {
        "Start this week's tasks to build momentum!".to_string()
    };
    let weak_areas = if weak_tags.is_empty() {
        "Not enough data yet.".to_string()
    } else {
        weak_tags.iter().take(3).cloned().collect::<Vec<_>>().join(", ")
    };
    AiInsight {
        improvements,
        weak_areas,
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insight_with_no_activity() {
        let insight = build_insight(0, &BTreeSet::new());
        assert!(insight.improvements.contains("Start"));
        assert_eq!(insight.weak_areas, "Not enough data yet.");
    }

    #[test]
    fn test_insight_caps_weak_areas_at_three() {
        let tags: BTreeSet<String> = ["a", "b", "c", "d"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let insight = build_insight(2, &tags);
        assert_eq!(insight.weak_areas, "a, b, c");
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(70.04), 70.0);
        assert_eq!(round1(70.05), 70.1);
        assert_eq!(round1(0.0), 0.0);
    }
}
