//! Structured reply the model must produce on every turn.

use crate::category::Category;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Marker that opens a free-text final brief. Treated as a completion
/// signal when a model answers in prose instead of JSON.
pub const BRIEF_MARKER: &str = "BEGIN_BRIEF";

/// Response structure for planning conversations.
/// The LLM must respond with this exact structure in JSON format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlannerResponse {
    /// The next question to ask the user, one question at a time
    #[serde(default)]
    pub question: Option<String>,

    /// Plan category the question gathers information for
    #[serde(default)]
    pub category: Option<Category>,

    /// True once enough information has been gathered to write the plan
    #[serde(default)]
    pub complete: bool,
}

impl PlannerResponse {
    pub fn question(category: Category, text: impl Into<String>) -> Self {
        Self {
            question: Some(text.into()),
            category: Some(category),
            complete: false,
        }
    }

    pub fn complete() -> Self {
        Self {
            question: None,
            category: None,
            complete: true,
        }
    }

    /// Get JSON schema for this type
    pub fn json_schema() -> serde_json::Value {
        let schema = schemars::schema_for!(PlannerResponse);
        serde_json::to_value(&schema).unwrap_or_default()
    }
}

/// Extract JSON from response text, handling markdown code blocks
///
/// This function handles responses that may be wrapped in markdown code blocks:
/// - ```json ... ```
/// - ``` ... ```
/// - Plain JSON
pub fn extract_json(response_text: &str) -> &str {
    if let Some(start_idx) = response_text.find("```json") {
        let start = start_idx + "```json".len();
        if let Some(end_idx) = response_text[start..].find("```") {
            return response_text[start..start + end_idx].trim();
        }
    } else if let Some(start_idx) = response_text.find("```") {
        let start = start_idx + 3;
        if let Some(end_idx) = response_text[start..].find("```") {
            return response_text[start..start + end_idx].trim();
        }
    }

    response_text.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_from_markdown_with_language() {
        let response = r#"Here's the response:
```json
{"question": "Who is your audience?", "category": "target_audience"}
```
"#;
        assert_eq!(
            extract_json(response),
            r#"{"question": "Who is your audience?", "category": "target_audience"}"#
        );
    }

    #[test]
    fn test_extract_json_from_markdown_without_language() {
        let response = "```\n{\"complete\": true}\n```";
        assert_eq!(extract_json(response), r#"{"complete": true}"#);
    }

    #[test]
    fn test_extract_json_plain_with_whitespace() {
        let response = "\n   {\"complete\": false}  \n";
        assert_eq!(extract_json(response), r#"{"complete": false}"#);
    }

    #[test]
    fn test_missing_fields_default() {
        let parsed: PlannerResponse = serde_json::from_str(r#"{"complete": true}"#).unwrap();
        assert_eq!(parsed, PlannerResponse::complete());

        let parsed: PlannerResponse =
            serde_json::from_str(r#"{"question": "Colours?", "category": "branding"}"#).unwrap();
        assert_eq!(parsed, PlannerResponse::question(Category::Branding, "Colours?"));
    }

    #[test]
    fn test_json_schema_generation() {
        let schema = PlannerResponse::json_schema();
        assert!(schema.is_object());
        let schema_str = serde_json::to_string(&schema).unwrap();
        assert!(schema_str.contains("PlannerResponse"));
        assert!(schema_str.contains("design_style"));
    }
}
