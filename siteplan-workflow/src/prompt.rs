use crate::category::{Category, Section};
use crate::expertise::Expertise;
use crate::response::PlannerResponse;

/// Opening question, asked before the model is involved.
pub const OPENING_QUESTION: &str = "What kind of website are you looking to build? Tell me about your goals and what you want to achieve with this website.";

/// Build the system prompt for the planning conversation.
pub fn build_system_prompt(
    expertise: Option<Expertise>,
    min_questions: usize,
    missing: &[Category],
) -> String {
    let schema = PlannerResponse::json_schema();
    let schema_str = serde_json::to_string_pretty(&schema).unwrap_or_default();

    let mut categories = String::new();
    for section in Section::ALL {
        categories.push_str(&format!("{}:\n", section.title()));
        for category in section.categories() {
            categories.push_str(&format!("  - {} ({})\n", category.key(), category.label()));
        }
    }

    let mut prompt = format!(
        r#"You are a website requirements gathering assistant. You interview the user to collect everything needed for a website plan.

HOW TO ASK:
- Ask ONE clear, concise question at a time.
- Build each question on the previous answers and tailor it to the kind of website being discussed.
- Never repeat a question. If the user could not answer, move on and fill that part of the plan from context.
- Focus on business goals rather than technical implementation.
- Aim for about {min_questions} questions in total.

PLAN CATEGORIES (tag every question with exactly one):
{categories}
You can respond only in JSON conforming to this schema:

{schema_str}

Important:
- Your response MUST be valid JSON only, with no text before or after it.
- To ask a question, set "question" and "category" and leave "complete" false.
- Use additional_notes only when no other category fits; it keeps just the latest answer.
- When you have gathered comprehensive information, respond with {{"complete": true}}."#
    );

    if !missing.is_empty() {
        let labels = missing
            .iter()
            .map(|category| category.key())
            .collect::<Vec<_>>()
            .join(", ");
        prompt.push_str(&format!(
            "\n- These categories are still unanswered and must be covered before completing: {labels}."
        ));
    }

    if let Some(expertise) = expertise {
        prompt.push_str(&format!(
            "\n\nUSER EXPERTISE: {expertise}. {}",
            expertise.guidance()
        ));
    }

    prompt
}
