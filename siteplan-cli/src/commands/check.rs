//! Verify the API key with a minimal completion

use crate::commands::chat::build_client;
use crate::config::Config;
use crate::error::CliError;
use siteplan_llm_sdk::types::{CompletionRequest, Message};

pub async fn check_api_key(config: &Config) -> Result<(), CliError> {
    let client = build_client(config)?;

    let request = CompletionRequest {
        messages: vec![Message::user("Reply with the single word: ok")],
        max_tokens: 16,
        model: config.model.name.clone(),
        system: None,
        temperature: Some(0.0),
        top_p: None,
        stop_sequences: None,
        response_format: None,
    };

    let response = client.complete(request).await?;
    tracing::debug!(
        input_tokens = response.usage.input_tokens,
        output_tokens = response.usage.output_tokens,
        "Key check completed"
    );

    println!(
        "API key OK ({} / {}): {}",
        client.provider_name(),
        client.model_name(),
        response.text().trim()
    );
    Ok(())
}
