//! AI content generator: the boundary contract for all generated content.
//!
//! Callers depend on the `ContentGenerator` trait, injected through app
//! state, so the Gemini-backed implementation can be swapped for a scripted
//! fake in tests. Every structured output is validated here before anything
//! is persisted; a nonconforming response is a generation failure, never a
//! silent default.

pub mod gemini;
pub mod prompts;
mod types;

use async_trait::async_trait;

use crate::errors::AppError;

pub use gemini::GeminiGenerator;
pub use types::{AnalysisPoints, EvaluationOutcome, PersonaSpec, ScoreDetail, TaskDraft, Turn};

/// Everything the generator needs to know about one interview:
/// the company/role framing, the task, the submitted answer and the
/// interviewer persona.
#[derive(Debug, Clone, Default)]
pub struct InterviewContext {
    pub company_name: String,
    pub job_role_name: String,
    pub task_title: String,
    pub task_description: String,
    pub submission_content: String,
    pub persona_name: String,
    pub persona_department: String,
}

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generates `count` practice-task drafts for a company/role pair.
    async fn generate_tasks(
        &self,
        company_name: &str,
        job_role_name: &str,
        count: u32,
    ) -> Result<Vec<TaskDraft>, AppError>;

    /// Generates the interviewer persona for a finalized submission.
    async fn generate_persona(
        &self,
        company_name: &str,
        job_role_name: &str,
        task_title: &str,
    ) -> Result<PersonaSpec, AppError>;

    /// Generates the opening question of the interview.
    async fn generate_first_question(&self, ctx: &InterviewContext) -> Result<String, AppError>;

    /// Generates follow-up question `question_number` of `total_questions`,
    /// given the conversation so far.
    async fn generate_follow_up(
        &self,
        ctx: &InterviewContext,
        history: &[Turn],
        question_number: i32,
        total_questions: i32,
    ) -> Result<String, AppError>;

    /// Scores the submission using the full conversation history and the
    /// task's key evaluation points.
    async fn evaluate(
        &self,
        ctx: &InterviewContext,
        key_points: &[String],
        history: &[Turn],
    ) -> Result<EvaluationOutcome, AppError>;
}
