//! Model constants for supported LLM providers
//!
//! Model IDs are sourced from official provider documentation.

/// Google Gemini model constants
pub mod gemini {
    /// Gemini 3 Pro - Most intelligent model for complex reasoning
    /// Released: Preview, Context: 1M/64k, Thinking: low/high
    pub const GEMINI_3_PRO_ID: &str = "gemini-3-pro-preview";
    pub const GEMINI_3_PRO_NAME: &str = "Gemini 3 Pro";

    /// Gemini 3 Flash - Pro-level intelligence at Flash speed
    /// Released: Preview, Context: 1M/64k, Thinking: minimal/low/medium/high
    pub const GEMINI_3_FLASH_ID: &str = "gemini-3-flash-preview";
    pub const GEMINI_3_FLASH_NAME: &str = "Gemini 3 Flash";

    pub const GEMINI_3_PRO: &str = GEMINI_3_PRO_ID;
    pub const GEMINI_3_FLASH: &str = GEMINI_3_FLASH_ID;

    /// Human-readable name for a Gemini model id, if known
    pub fn display_name(model_id: &str) -> Option<&'static str> {
        match model_id {
            GEMINI_3_PRO_ID => Some(GEMINI_3_PRO_NAME),
            GEMINI_3_FLASH_ID => Some(GEMINI_3_FLASH_NAME),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::gemini;

    #[test]
    fn test_display_name_known_and_unknown() {
        assert_eq!(gemini::display_name(gemini::GEMINI_3_PRO), Some("Gemini 3 Pro"));
        assert_eq!(gemini::display_name("gemini-1.0-pro"), None);
    }
}
