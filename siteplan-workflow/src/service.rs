//! The conversational model seam: "given the conversation so far, return the
//! next question or signal that the plan is complete".

use crate::category::Category;
use crate::error::ModelError;
use crate::expertise::Expertise;
use crate::prompt::build_system_prompt;
use crate::response::{extract_json, PlannerResponse, BRIEF_MARKER};
use crate::session::Question;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use siteplan_llm_sdk::client::LlmClient;
use siteplan_llm_sdk::types::{CompletionRequest, Message, ResponseFormat};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Assistant,
    User,
}

/// One entry of the conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

impl Turn {
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }
}

/// What the model service sees on each call.
#[derive(Debug, Clone, Copy)]
pub struct ConversationContext<'a> {
    pub history: &'a [Turn],
    pub expertise: Option<Expertise>,
    pub missing: &'a [Category],
    pub min_questions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelReply {
    Question(Question),
    Complete,
}

#[async_trait]
pub trait ModelService: Send + Sync {
    async fn next_message(
        &self,
        conversation: ConversationContext<'_>,
    ) -> Result<ModelReply, ModelError>;
}

/// Settings for [`LlmModelService`]
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model: siteplan_llm_sdk::models::gemini::GEMINI_3_FLASH.to_string(),
            max_tokens: 2000,
            temperature: 0.7,
        }
    }
}

/// [`ModelService`] backed by any [`LlmClient`].
pub struct LlmModelService {
    client: Arc<dyn LlmClient>,
    settings: ModelSettings,
}

impl LlmModelService {
    pub fn new(client: Arc<dyn LlmClient>, settings: ModelSettings) -> Self {
        Self { client, settings }
    }

    fn build_messages(history: &[Turn]) -> Vec<Message> {
        let mut messages = Vec::with_capacity(history.len() + 1);
        // Providers expect the user to speak first
        if history.first().map(|turn| turn.speaker) == Some(Speaker::Assistant) {
            messages.push(Message::user("I would like help planning a website."));
        }
        messages.extend(history.iter().map(|turn| match turn.speaker {
            Speaker::Assistant => Message::assistant(turn.text.clone()),
            Speaker::User => Message::user(turn.text.clone()),
        }));
        messages
    }
}

/// Interpret raw model output as a [`ModelReply`].
pub fn parse_reply(text: &str) -> Result<ModelReply, ModelError> {
    if text.contains(BRIEF_MARKER) {
        return Ok(ModelReply::Complete);
    }

    let json = extract_json(text);
    let response: PlannerResponse =
        serde_json::from_str(json).map_err(|e| ModelError::MalformedReply {
            message: format!("{}: {}", e, json),
        })?;

    if response.complete {
        return Ok(ModelReply::Complete);
    }

    let question = response
        .question
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .ok_or(ModelError::EmptyQuestion)?;

    let category = response.category.unwrap_or_else(|| {
        tracing::debug!("Model question has no category, filing under additional notes");
        Category::AdditionalNotes
    });

    Ok(ModelReply::Question(Question::new(category, question)))
}

#[async_trait]
impl ModelService for LlmModelService {
    async fn next_message(
        &self,
        conversation: ConversationContext<'_>,
    ) -> Result<ModelReply, ModelError> {
        let request = CompletionRequest {
            messages: Self::build_messages(conversation.history),
            max_tokens: self.settings.max_tokens,
            model: self.settings.model.clone(),
            system: Some(build_system_prompt(
                conversation.expertise,
                conversation.min_questions,
                conversation.missing,
            )),
            temperature: Some(self.settings.temperature),
            top_p: None,
            stop_sequences: None,
            response_format: Some(ResponseFormat::JsonObject),
        };

        let response = self.client.complete(request).await?;
        let text = response.text();

        tracing::debug!(
            provider = self.client.provider_name(),
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Model replied"
        );

        parse_reply(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siteplan_llm_sdk::error::LlmError;
    use siteplan_llm_sdk::types::{CompletionResponse, ContentBlock, Role, Usage};
    use std::sync::Mutex;

    struct MockLlmClient {
        response_content: String,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.requests.lock().unwrap().push(request);
            Ok(CompletionResponse {
                content: vec![ContentBlock::Text {
                    text: self.response_content.clone(),
                }],
                role: Role::Assistant,
                usage: Usage {
                    input_tokens: 10,
                    output_tokens: 20,
                },
                stop_reason: Some("STOP".to_string()),
            })
        }

        fn provider_name(&self) -> &str {
            "mock"
        }

        fn model_name(&self) -> &str {
            "mock-model"
        }
    }

    #[test]
    fn test_parse_reply_question() {
        let reply = parse_reply(
            r#"```json
{"question": "What colours fit your brand?", "category": "branding", "complete": false}
```"#,
        )
        .unwrap();
        assert_eq!(
            reply,
            ModelReply::Question(Question::new(
                Category::Branding,
                "What colours fit your brand?"
            ))
        );
    }

    #[test]
    fn test_parse_reply_completion_signals() {
        assert_eq!(parse_reply(r#"{"complete": true}"#).unwrap(), ModelReply::Complete);
        assert_eq!(
            parse_reply("BEGIN_BRIEF\n1. Project Overview\nEND_BRIEF").unwrap(),
            ModelReply::Complete
        );
    }

    #[test]
    fn test_parse_reply_rejects_bad_output() {
        assert!(matches!(
            parse_reply("What is your budget?"),
            Err(ModelError::MalformedReply { .. })
        ));
        assert!(matches!(
            parse_reply(r#"{"question": "   ", "category": "branding"}"#),
            Err(ModelError::EmptyQuestion)
        ));
    }

    #[test]
    fn test_parse_reply_without_category() {
        let reply = parse_reply(r#"{"question": "Anything else?"}"#).unwrap();
        assert_eq!(
            reply,
            ModelReply::Question(Question::new(Category::AdditionalNotes, "Anything else?"))
        );
    }

    #[tokio::test]
    async fn test_llm_service_builds_request() {
        let client = Arc::new(MockLlmClient {
            response_content: r#"{"question": "Who visits the site?", "category": "target_audience"}"#
                .to_string(),
            requests: Mutex::new(Vec::new()),
        });
        let service = LlmModelService::new(client.clone(), ModelSettings::default());

        let history = vec![Turn::assistant("What kind of website?"), Turn::user("A bakery")];
        let missing = [Category::BudgetTimeline];
        let reply = service
            .next_message(ConversationContext {
                history: &history,
                expertise: Some(Expertise::Beginner),
                missing: &missing,
                min_questions: 15,
            })
            .await
            .unwrap();

        assert_eq!(
            reply,
            ModelReply::Question(Question::new(Category::TargetAudience, "Who visits the site?"))
        );

        let requests = client.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        // Synthetic opener plus the two history turns
        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.messages[0].role, Role::User);
        assert_eq!(request.messages[1].role, Role::Assistant);
        assert_eq!(request.response_format, Some(ResponseFormat::JsonObject));
        let system = request.system.as_deref().unwrap();
        assert!(system.contains("USER EXPERTISE: beginner"));
        assert!(system.contains("budget_timeline"));
    }
}
