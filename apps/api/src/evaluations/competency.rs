use sqlx::types::Json;
use sqlx::PgConnection;

use crate::errors::AppError;
use crate::models::evaluation::CompetencyRow;

/// Records one evaluation into the (user, company, role) aggregate.
///
/// First evaluation for the tuple creates the row; later ones fold the
/// score into a running arithmetic mean and bump the attempt count. The
/// weak-tag list is replaced wholesale with the latest evaluation's
/// weaknesses; no history is kept. The whole read-modify-write happens
/// in a single upsert statement, so concurrent recorders cannot lose an
/// attempt.
pub async fn record(
    conn: &mut PgConnection,
    user_id: i64,
    company_id: i64,
    job_role_id: i64,
    score: i32,
    weak_tags: &[String],
) -> Result<CompetencyRow, AppError> {
    let row: CompetencyRow = sqlx::query_as(
        r#"
        INSERT INTO user_competencies
            (user_id, company_id, job_role_id, avg_score, attempt_count, weak_tags)
        VALUES ($1, $2, $3, $4, 1, $5)
        ON CONFLICT (user_id, company_id, job_role_id) DO UPDATE
        SET avg_score = (user_competencies.avg_score * user_competencies.attempt_count
                         + EXCLUDED.avg_score)
                        / (user_competencies.attempt_count + 1),
            attempt_count = user_competencies.attempt_count + 1,
            weak_tags = EXCLUDED.weak_tags,
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(company_id)
    .bind(job_role_id)
    .bind(score as f64)
    .bind(Json(weak_tags))
    .fetch_one(conn)
    .await?;
    Ok(row)
}

/// The incremental mean the upsert computes, kept as a plain function so
/// the arithmetic is testable on its own.
pub fn incremental_mean(avg_score: f64, attempt_count: i32, new_score: i32) -> f64 {
    (avg_score * attempt_count as f64 + new_score as f64) / (attempt_count as f64 + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_scores_average() {
        // First recording seeds the row with the raw score.
        let after_first = 80.0;
        let after_second = incremental_mean(after_first, 1, 60);
        assert!((after_second - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mean_over_many_attempts() {
        let scores = [90, 70, 50, 100];
        let mut avg = scores[0] as f64;
        for (i, &s) in scores.iter().enumerate().skip(1) {
            avg = incremental_mean(avg, i as i32, s);
        }
        let expected = scores.iter().sum::<i32>() as f64 / scores.len() as f64;
        assert!((avg - expected).abs() < 1e-9);
    }

    #[test]
    fn test_repeated_score_is_stable() {
        let mut avg = 75.0;
        for count in 1..20 {
            avg = incremental_mean(avg, count, 75);
        }
        assert!((avg - 75.0).abs() < 1e-9);
    }
}
