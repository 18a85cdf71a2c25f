use crate::category::Category;
use thiserror::Error;

/// Errors raised by the session collector
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The user supplied an empty or whitespace-only answer
    #[error("Answer cannot be empty")]
    EmptyAnswer,

    /// A plan was requested before every required category was answered
    #[error("Session is incomplete, still missing: {}", format_missing(.missing))]
    Incomplete { missing: Vec<Category> },
}

fn format_missing(missing: &[Category]) -> String {
    missing
        .iter()
        .map(|category| category.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Failures of the conversational model collaborator
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("LLM request failed: {0}")]
    Llm(#[from] siteplan_llm_sdk::error::LlmError),

    #[error("Model reply is not valid planner JSON: {message}")]
    MalformedReply { message: String },

    #[error("Model returned an empty question")]
    EmptyQuestion,

    #[error("Model repeated an earlier question: {0}")]
    DuplicateQuestion(String),
}

/// Errors surfaced by the conversation driver
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("No question is awaiting an answer")]
    NoPendingQuestion,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_lists_labels() {
        let err = SessionError::Incomplete {
            missing: vec![Category::PrimaryGoals, Category::BudgetTimeline],
        };
        assert_eq!(
            err.to_string(),
            "Session is incomplete, still missing: Primary Goals, Budget & Timeline"
        );
    }
}
