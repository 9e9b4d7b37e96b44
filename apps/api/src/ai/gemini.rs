use async_trait::async_trait;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::GeminiClient;

use super::prompts::{
    build_evaluate_prompt, build_first_question_prompt, build_follow_up_prompt,
    build_persona_prompt, build_tasks_prompt,
};
use super::{ContentGenerator, EvaluationOutcome, InterviewContext, PersonaSpec, TaskDraft, Turn};

/// Gemini-backed implementation of the content generator.
///
/// Structured responses are validated before they are returned; a response
/// that parses but violates the contract (question count out of range,
/// score out of bounds) is reported as a generation failure.
pub struct GeminiGenerator {
    llm: GeminiClient,
}

impl GeminiGenerator {
    pub fn new(llm: GeminiClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ContentGenerator for GeminiGenerator {
    async fn generate_tasks(
        &self,
        company_name: &str,
        job_role_name: &str,
        count: u32,
    ) -> Result<Vec<TaskDraft>, AppError> {
        let prompt = build_tasks_prompt(company_name, job_role_name, count);
        let drafts: Vec<TaskDraft> = self.llm.call_json(&prompt).await?;

        if drafts.is_empty() {
            return Err(AppError::Generation(
                "task generation returned an empty list".to_string(),
            ));
        }
        for draft in &drafts {
            draft.validate().map_err(AppError::Generation)?;
        }

        info!(
            "Generated {} task drafts for {company_name} / {job_role_name}",
            drafts.len()
        );
        Ok(drafts)
    }

    async fn generate_persona(
        &self,
        company_name: &str,
        job_role_name: &str,
        task_title: &str,
    ) -> Result<PersonaSpec, AppError> {
        let prompt = build_persona_prompt(company_name, job_role_name, task_title);
        let persona: PersonaSpec = self.llm.call_json(&prompt).await?;
        persona.validate().map_err(AppError::Generation)?;
        Ok(persona)
    }

    async fn generate_first_question(&self, ctx: &InterviewContext) -> Result<String, AppError> {
        let prompt = build_first_question_prompt(ctx);
        let question = self.llm.call(&prompt).await?;
        if question.trim().is_empty() {
            return Err(AppError::Generation("empty first question".to_string()));
        }
        Ok(question)
    }

    async fn generate_follow_up(
        &self,
        ctx: &InterviewContext,
        history: &[Turn],
        question_number: i32,
        total_questions: i32,
    ) -> Result<String, AppError> {
        let prompt = build_follow_up_prompt(ctx, history, question_number, total_questions);
        let question = self.llm.call(&prompt).await?;
        if question.trim().is_empty() {
            return Err(AppError::Generation("empty follow-up question".to_string()));
        }
        Ok(question)
    }

    async fn evaluate(
        &self,
        ctx: &InterviewContext,
        key_points: &[String],
        history: &[Turn],
    ) -> Result<EvaluationOutcome, AppError> {
        let prompt = build_evaluate_prompt(ctx, key_points, history);
        let outcome: EvaluationOutcome = self.llm.call_json(&prompt).await?;
        outcome.validate().map_err(AppError::Generation)?;
        info!(
            "Evaluated submission for '{}': {}/100 ({})",
            ctx.task_title, outcome.total_score, outcome.score_label
        );
        Ok(outcome)
    }
}
