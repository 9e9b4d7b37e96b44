//! Prompt templates for the content generator.
//!
//! Templates use `{placeholder}` markers filled with `.replace` at build
//! time. Question prompts return free text; task, persona and evaluation
//! prompts run in JSON mode and describe the exact shape the boundary
//! types deserialize.

use crate::models::interview::message_role;

use super::{InterviewContext, Turn};

pub const TASKS_PROMPT: &str = "\
You design realistic work assignments used to practice for a specific job.

Generate {count} practice tasks for:
- Company: {company_name}
- Role: {job_role_name}

Each task must be something this role at this company would plausibly do.

Respond with a JSON array. Each item:
{
  \"title\": \"task title\",
  \"description\": \"detailed task description (3-5 sentences)\",
  \"category\": \"task category (e.g. planning, development, analysis, design)\",
  \"difficulty\": \"one of: easy, medium, hard\",
  \"estimated_minutes\": expected time in minutes (integer),
  \"answer_type\": \"text\",
  \"key_points\": [\"evaluation point 1\", \"evaluation point 2\", \"evaluation point 3\"],
  \"tech_stack\": [\"relevant technology 1\", \"relevant technology 2\"]
}";

pub const PERSONA_PROMPT: &str = "\
You create interviewer personas.

Create a persona for this situation:
- Company: {company_name}
- Role: {job_role_name}
- Task: {task_title}

The interviewer is a team-lead-level practitioner at the company who will
run a short Q&A probing the intent and understanding behind a submitted
task answer.

Respond with JSON:
{
  \"persona_name\": \"interviewer name\",
  \"persona_department\": \"department (e.g. Frontend Engineering)\",
  \"topic_tag\": \"topic of the questioning (e.g. technical design)\",
  \"total_questions\": number of questions, an integer between 3 and 5
}";

pub const FIRST_QUESTION_PROMPT: &str = "\
You are {persona_name} from the {persona_department} department at {company_name}.

A candidate submitted an answer to this task:
- Task: {task_title}
- Task description: {task_description}
- Submitted answer: {submission_content}

After reviewing the submission, ask your first question to probe the
candidate's intent and understanding. The question must be specific and
practical. Write only the question.";

pub const FOLLOW_UP_PROMPT: &str = "\
You are {persona_name} from the {persona_department} department at {company_name}.

Task: {task_title}
Task description: {task_description}
Candidate's submission: {submission_content}

Conversation so far:
{history}

This is question {question_number} of {total_questions}.
Based on the conversation, ask a follow-up question that probes the
candidate's understanding more deeply. Write only the question.";

pub const EVALUATE_PROMPT: &str = "\
You are a scoring expert. Score the following task submission and Q&A.

Company: {company_name}
Role: {job_role_name}
Task: {task_title}
Task description: {task_description}
Key evaluation points: {key_points}

Submission:
{submission_content}

Q&A:
{history}

Respond with JSON:
{
  \"total_score\": total score (0-100),
  \"score_label\": \"grade, one of S/A/B/C/D\",
  \"scores_detail\": [
    {\"name\": \"problem understanding\", \"score\": score (0-100)},
    {\"name\": \"practical fit\", \"score\": score (0-100)},
    {\"name\": \"logical thinking\", \"score\": score (0-100)},
    {\"name\": \"communication\", \"score\": score (0-100)}
  ],
  \"ai_summary\": \"overall evaluation summary (2-3 sentences)\",
  \"analysis_points\": {
    \"strengths\": [\"strength 1\", \"strength 2\"],
    \"weaknesses\": [\"weakness 1\", \"weakness 2\"]
  },
  \"feedback\": \"concrete feedback and directions for improvement (2-3 sentences)\"
}";

/// Renders the ordered conversation as `Interviewer:`/`Candidate:` lines.
pub fn format_history(history: &[Turn]) -> String {
    history
        .iter()
        .map(|t| {
            let speaker = if t.role == message_role::AI {
                "Interviewer"
            } else {
                "Candidate"
            };
            format!("{speaker}: {}", t.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_tasks_prompt(company_name: &str, job_role_name: &str, count: u32) -> String {
    TASKS_PROMPT
        .replace("{count}", &count.to_string())
        .replace("{company_name}", company_name)
        .replace("{job_role_name}", job_role_name)
}

pub fn build_persona_prompt(company_name: &str, job_role_name: &str, task_title: &str) -> String {
    PERSONA_PROMPT
        .replace("{company_name}", company_name)
        .replace("{job_role_name}", job_role_name)
        .replace("{task_title}", task_title)
}

pub fn build_first_question_prompt(ctx: &InterviewContext) -> String {
    FIRST_QUESTION_PROMPT
        .replace("{persona_name}", &ctx.persona_name)
        .replace("{persona_department}", &ctx.persona_department)
        .replace("{company_name}", &ctx.company_name)
        .replace("{task_title}", &ctx.task_title)
        .replace("{task_description}", &ctx.task_description)
        .replace("{submission_content}", &ctx.submission_content)
}

pub fn build_follow_up_prompt(
    ctx: &InterviewContext,
    history: &[Turn],
    question_number: i32,
    total_questions: i32,
) -> String {
    FOLLOW_UP_PROMPT
        .replace("{persona_name}", &ctx.persona_name)
        .replace("{persona_department}", &ctx.persona_department)
        .replace("{company_name}", &ctx.company_name)
        .replace("{task_title}", &ctx.task_title)
        .replace("{task_description}", &ctx.task_description)
        .replace("{submission_content}", &ctx.submission_content)
        .replace("{history}", &format_history(history))
        .replace("{question_number}", &question_number.to_string())
        .replace("{total_questions}", &total_questions.to_string())
}

pub fn build_evaluate_prompt(
    ctx: &InterviewContext,
    key_points: &[String],
    history: &[Turn],
) -> String {
    let key_points_text = if key_points.is_empty() {
        "none".to_string()
    } else {
        key_points.join(", ")
    };
    EVALUATE_PROMPT
        .replace("{company_name}", &ctx.company_name)
        .replace("{job_role_name}", &ctx.job_role_name)
        .replace("{task_title}", &ctx.task_title)
        .replace("{task_description}", &ctx.task_description)
        .replace("{key_points}", &key_points_text)
        .replace("{submission_content}", &ctx.submission_content)
        .replace("{history}", &format_history(history))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> InterviewContext {
        InterviewContext {
            company_name: "Acme".to_string(),
            job_role_name: "Backend Engineer".to_string(),
            task_title: "Design a webhook relay".to_string(),
            task_description: "Relay events to customer endpoints.".to_string(),
            submission_content: "I would queue and retry.".to_string(),
            persona_name: "Dana Kim".to_string(),
            persona_department: "Platform Engineering".to_string(),
        }
    }

    #[test]
    fn test_first_question_prompt_fills_all_placeholders() {
        let prompt = build_first_question_prompt(&ctx());
        assert!(prompt.contains("Dana Kim"));
        assert!(prompt.contains("Design a webhook relay"));
        assert!(!prompt.contains('{'), "unfilled placeholder in: {prompt}");
    }

    #[test]
    fn test_follow_up_prompt_numbers_questions() {
        let history = vec![
            Turn::new("ai", "Why a queue?"),
            Turn::new("user", "For burst absorption."),
        ];
        let prompt = build_follow_up_prompt(&ctx(), &history, 2, 4);
        assert!(prompt.contains("question 2 of 4"));
        assert!(prompt.contains("Interviewer: Why a queue?"));
        assert!(prompt.contains("Candidate: For burst absorption."));
    }

    #[test]
    fn test_evaluate_prompt_handles_missing_key_points() {
        let prompt = build_evaluate_prompt(&ctx(), &[], &[]);
        assert!(prompt.contains("Key evaluation points: none"));
    }

    #[test]
    fn test_format_history_preserves_order() {
        let history = vec![
            Turn::new("ai", "first"),
            Turn::new("user", "second"),
            Turn::new("ai", "third"),
        ];
        let text = format_history(&history);
        let first = text.find("first").unwrap();
        let second = text.find("second").unwrap();
        let third = text.find("third").unwrap();
        assert!(first < second && second < third);
    }
}
