//! # Siteplan LLM SDK
//!
//! Provider-agnostic completion types plus a Google Gemini client.
//! The planning assistant talks to language models only through the
//! [`client::LlmClient`] trait, so any provider can back a session.
//!
//! ## Example
//!
//! ```rust,no_run
//! use siteplan_llm_sdk::gemini::GeminiClient;
//! use siteplan_llm_sdk::models::gemini::GEMINI_3_FLASH;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GeminiClient::new("your-google-api-key")?;
//!     let response = client
//!         .message_builder()
//!         .model(GEMINI_3_FLASH)
//!         .system("You help people plan websites.")
//!         .user_message("I need a site for my bakery.")
//!         .max_output_tokens(256)
//!         .send()
//!         .await?;
//!
//!     println!("Response: {}", response.text());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod gemini;
pub mod models;
pub mod providers;
pub mod types;
