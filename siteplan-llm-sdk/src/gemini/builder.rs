use super::client::GeminiClient;
use super::types::*;
use crate::error::LlmError;

pub struct MessageBuilder<'a> {
    client: &'a GeminiClient,
    model: Option<String>,
    contents: Vec<GeminiContent>,
    system_instruction: Option<String>,
    generation_config: GenerationConfig,
}

impl<'a> MessageBuilder<'a> {
    pub fn new(client: &'a GeminiClient) -> Self {
        Self {
            client,
            model: None,
            contents: Vec::new(),
            system_instruction: None,
            generation_config: GenerationConfig::default(),
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn user_message(mut self, text: impl Into<String>) -> Self {
        self.contents.push(GeminiContent::text(GeminiRole::User, text));
        self
    }

    pub fn model_message(mut self, text: impl Into<String>) -> Self {
        self.contents
            .push(GeminiContent::text(GeminiRole::Model, text));
        self
    }

    pub fn content(mut self, content: GeminiContent) -> Self {
        self.contents.push(content);
        self
    }

    pub fn system(mut self, text: impl Into<String>) -> Self {
        self.system_instruction = Some(text.into());
        self
    }

    pub fn thinking_level(mut self, level: impl Into<String>) -> Self {
        self.generation_config.thinking_config = Some(ThinkingConfig {
            thinking_level: level.into(),
        });
        self
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.generation_config.temperature = Some(temp);
        self
    }

    pub fn max_output_tokens(mut self, tokens: u32) -> Self {
        self.generation_config.max_output_tokens = Some(tokens);
        self
    }

    pub fn top_p(mut self, top_p: f32) -> Self {
        self.generation_config.top_p = Some(top_p);
        self
    }

    pub fn stop_sequences(mut self, stops: Vec<String>) -> Self {
        self.generation_config.stop_sequences = Some(stops);
        self
    }

    /// Ask the model to answer with a JSON object
    pub fn json_response(mut self) -> Self {
        self.generation_config.response_mime_type = Some("application/json".to_string());
        self
    }

    pub fn build(self) -> Result<(String, GeminiGenerateContentRequest), LlmError> {
        let model = self
            .model
            .unwrap_or_else(|| self.client.default_model().to_string());

        if self.contents.is_empty() {
            return Err(LlmError::invalid_request(
                "At least one message is required",
            ));
        }

        let request = GeminiGenerateContentRequest {
            contents: self.contents,
            system_instruction: self
                .system_instruction
                .map(|text| GeminiContent::text(GeminiRole::User, text)),
            generation_config: Some(self.generation_config),
        };

        Ok((model, request))
    }

    pub async fn send(self) -> Result<GeminiGenerateContentResponse, LlmError> {
        let client = self.client;
        let (model, request) = self.build()?;
        client.generate_content(model, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_messages() {
        let client = GeminiClient::new("test-key").unwrap();
        let result = client.message_builder().system("only a system prompt").build();
        assert!(matches!(result, Err(LlmError::InvalidRequest { .. })));
    }

    #[test]
    fn test_build_uses_client_default_model() {
        let client = GeminiClient::new("test-key")
            .unwrap()
            .with_model("gemini-3-pro-preview");
        let (model, request) = client
            .message_builder()
            .user_message("Hello")
            .json_response()
            .build()
            .unwrap();
        assert_eq!(model, "gemini-3-pro-preview");
        let config = request.generation_config.unwrap();
        assert_eq!(config.response_mime_type.as_deref(), Some("application/json"));
    }
}
