use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant maps to a stable machine-readable code; clients branch on
/// the code, never on the message text.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Task not found: {0}")]
    TaskNotFound(i64),

    #[error("Submission not found: {0}")]
    SubmissionNotFound(i64),

    #[error("Thread not found: {0}")]
    ThreadNotFound(i64),

    #[error("Evaluation not found: {0}")]
    EvaluationNotFound(i64),

    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Company not found: {0}")]
    CompanyNotFound(i64),

    #[error("Job role not found: {0}")]
    JobRoleNotFound(i64),

    #[error("Task already has a final submission")]
    AlreadySubmitted,

    #[error("Submission is final and can no longer be revised")]
    AlreadyFinal,

    #[error("Thread is already completed")]
    ThreadCompleted,

    #[error("Thread was modified concurrently")]
    ThreadBusy,

    #[error("Forbidden")]
    Forbidden,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token audience mismatch")]
    InvalidAudience,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("AI generation failed: {0}")]
    Generation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::Generation(e.to_string())
    }
}

impl AppError {
    /// The stable identifier returned to clients for this error.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::TaskNotFound(_) => "TASK_NOT_FOUND",
            AppError::SubmissionNotFound(_) => "SUBMISSION_NOT_FOUND",
            AppError::ThreadNotFound(_) => "THREAD_NOT_FOUND",
            AppError::EvaluationNotFound(_) => "EVALUATION_NOT_FOUND",
            AppError::UserNotFound(_) => "USER_NOT_FOUND",
            AppError::CompanyNotFound(_) => "COMPANY_NOT_FOUND",
            AppError::JobRoleNotFound(_) => "JOB_ROLE_NOT_FOUND",
            AppError::AlreadySubmitted => "ALREADY_SUBMITTED",
            AppError::AlreadyFinal => "ALREADY_FINAL",
            AppError::ThreadCompleted => "THREAD_COMPLETED",
            AppError::ThreadBusy => "THREAD_BUSY",
            AppError::Forbidden => "FORBIDDEN",
            AppError::InvalidToken => "INVALID_TOKEN",
            AppError::TokenExpired => "TOKEN_EXPIRED",
            AppError::InvalidAudience => "INVALID_AUDIENCE",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Generation(_) => "GENERATION_FAILED",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::TaskNotFound(_)
            | AppError::SubmissionNotFound(_)
            | AppError::ThreadNotFound(_)
            | AppError::EvaluationNotFound(_)
            | AppError::UserNotFound(_)
            | AppError::CompanyNotFound(_)
            | AppError::JobRoleNotFound(_) => StatusCode::NOT_FOUND,
            AppError::AlreadySubmitted
            | AppError::AlreadyFinal
            | AppError::ThreadCompleted
            | AppError::ThreadBusy => StatusCode::CONFLICT,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::InvalidToken | AppError::TokenExpired | AppError::InvalidAudience => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Generation(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                "A database error occurred".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal server error occurred".to_string()
            }
            AppError::Generation(msg) => {
                tracing::error!("AI generation error: {msg}");
                "AI generation failed".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message
            }
        }));

        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_codes_are_distinct() {
        let codes = [
            AppError::AlreadySubmitted.code(),
            AppError::AlreadyFinal.code(),
            AppError::ThreadCompleted.code(),
            AppError::ThreadBusy.code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in codes.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_conflicts_map_to_409() {
        assert_eq!(AppError::AlreadySubmitted.status(), StatusCode::CONFLICT);
        assert_eq!(AppError::ThreadCompleted.status(), StatusCode::CONFLICT);
        assert_eq!(AppError::ThreadBusy.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_generation_failure_is_upstream() {
        assert_eq!(
            AppError::Generation("timeout".into()).status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
