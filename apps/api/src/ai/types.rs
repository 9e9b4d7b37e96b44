use serde::{Deserialize, Serialize};

/// Bounds on the number of interview questions a persona may specify.
pub const MIN_QUESTIONS: i32 = 3;
pub const MAX_QUESTIONS: i32 = 5;

/// One generated practice-task draft, before it is persisted as a task row.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: String,
    pub estimated_minutes: i32,
    #[serde(default = "default_answer_type")]
    pub answer_type: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
}

fn default_answer_type() -> String {
    "text".to_string()
}

impl TaskDraft {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("task draft has an empty title".to_string());
        }
        if self.estimated_minutes <= 0 {
            return Err(format!(
                "task draft '{}' has non-positive estimated_minutes",
                self.title
            ));
        }
        Ok(())
    }
}

/// The generated interviewer identity driving one thread.
#[derive(Debug, Clone, Deserialize)]
pub struct PersonaSpec {
    pub persona_name: String,
    pub persona_department: String,
    pub topic_tag: String,
    pub total_questions: i32,
}

impl PersonaSpec {
    pub fn validate(&self) -> Result<(), String> {
        if self.persona_name.trim().is_empty() || self.persona_department.trim().is_empty() {
            return Err("persona is missing a name or department".to_string());
        }
        if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&self.total_questions) {
            return Err(format!(
                "persona total_questions {} outside [{MIN_QUESTIONS}, {MAX_QUESTIONS}]",
                self.total_questions
            ));
        }
        Ok(())
    }
}

/// One named sub-score within an evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreDetail {
    pub name: String,
    pub score: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisPoints {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

/// The structured scoring result for one submission/thread pair.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationOutcome {
    pub total_score: i32,
    pub score_label: String,
    pub scores_detail: Vec<ScoreDetail>,
    pub ai_summary: String,
    pub analysis_points: AnalysisPoints,
    pub feedback: Option<String>,
}

impl EvaluationOutcome {
    pub fn validate(&self) -> Result<(), String> {
        if !(0..=100).contains(&self.total_score) {
            return Err(format!("total_score {} outside [0, 100]", self.total_score));
        }
        if self.score_label.trim().is_empty() {
            return Err("evaluation is missing a score_label".to_string());
        }
        if self.scores_detail.is_empty() {
            return Err("evaluation has no sub-scores".to_string());
        }
        for detail in &self.scores_detail {
            if !(0..=100).contains(&detail.score) {
                return Err(format!(
                    "sub-score '{}' = {} outside [0, 100]",
                    detail.name, detail.score
                ));
            }
        }
        Ok(())
    }
}

/// One prior exchange in the interview, oldest first.
#[derive(Debug, Clone)]
pub struct Turn {
    pub role: String,
    pub content: String,
}

impl Turn {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persona(total_questions: i32) -> PersonaSpec {
        PersonaSpec {
            persona_name: "Dana Kim".to_string(),
            persona_department: "Platform Engineering".to_string(),
            topic_tag: "system design".to_string(),
            total_questions,
        }
    }

    #[test]
    fn test_persona_question_count_bounds() {
        assert!(persona(3).validate().is_ok());
        assert!(persona(5).validate().is_ok());
        assert!(persona(2).validate().is_err());
        assert!(persona(6).validate().is_err());
    }

    #[test]
    fn test_persona_requires_identity() {
        let mut p = persona(4);
        p.persona_name = "  ".to_string();
        assert!(p.validate().is_err());
    }

    fn outcome(total_score: i32) -> EvaluationOutcome {
        EvaluationOutcome {
            total_score,
            score_label: "B".to_string(),
            scores_detail: vec![ScoreDetail {
                name: "problem understanding".to_string(),
                score: 70,
            }],
            ai_summary: "Solid attempt.".to_string(),
            analysis_points: AnalysisPoints {
                strengths: vec!["clear structure".to_string()],
                weaknesses: vec!["missing edge cases".to_string()],
            },
            feedback: None,
        }
    }

    #[test]
    fn test_evaluation_score_bounds() {
        assert!(outcome(0).validate().is_ok());
        assert!(outcome(100).validate().is_ok());
        assert!(outcome(-1).validate().is_err());
        assert!(outcome(101).validate().is_err());
    }

    #[test]
    fn test_evaluation_rejects_empty_sub_scores() {
        let mut o = outcome(80);
        o.scores_detail.clear();
        assert!(o.validate().is_err());
    }

    #[test]
    fn test_evaluation_rejects_out_of_range_sub_score() {
        let mut o = outcome(80);
        o.scores_detail[0].score = 120;
        assert!(o.validate().is_err());
    }

    #[test]
    fn test_task_draft_defaults() {
        let raw = r#"{
            "title": "Design a rate limiter",
            "description": "Sketch a limiter for the public API.",
            "category": "development",
            "difficulty": "medium",
            "estimated_minutes": 45
        }"#;
        let draft: TaskDraft = serde_json::from_str(raw).unwrap();
        assert_eq!(draft.answer_type, "text");
        assert!(draft.key_points.is_empty());
        assert!(draft.validate().is_ok());
    }
}
