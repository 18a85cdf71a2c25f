use siteplan_llm_sdk::client::LlmClient;
use siteplan_llm_sdk::gemini::GeminiClient;
use siteplan_llm_sdk::models::gemini::{GEMINI_3_FLASH, GEMINI_3_PRO};

#[test]
fn test_gemini_client_implements_trait() {
    fn assert_implements_trait<T: LlmClient>() {}

    assert_implements_trait::<GeminiClient>();
}

#[test]
fn test_trait_object_usage() {
    let _client: Box<dyn LlmClient> = Box::new(GeminiClient::new("test-key").unwrap());
}

#[test]
fn test_provider_and_model_names() {
    let client = GeminiClient::new("test-key").unwrap();
    assert_eq!(client.provider_name(), "google");
    assert_eq!(client.model_name(), GEMINI_3_FLASH);

    let pro = GeminiClient::new("test-key").unwrap().with_model(GEMINI_3_PRO);
    assert_eq!(pro.model_name(), GEMINI_3_PRO);
}
