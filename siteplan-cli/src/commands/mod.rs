//! Command implementations for the siteplan CLI

pub mod chat;
pub mod check;
pub mod render;

pub use chat::{run_chat, ChatOptions};
pub use check::check_api_key;
pub use render::render_state;
