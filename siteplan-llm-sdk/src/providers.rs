//! Provider name constants
//!
//! This module defines canonical provider names used throughout the SDK

/// Google (Gemini models)
pub const GOOGLE: &str = "google";
