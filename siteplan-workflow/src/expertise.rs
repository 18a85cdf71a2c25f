use serde::{Deserialize, Serialize};
use std::fmt;

const TECHNICAL_TERMS: [&str; 8] = [
    "html",
    "css",
    "javascript",
    "api",
    "database",
    "hosting",
    "dns",
    "ssl",
];

const UNSURE_PHRASES: [&str; 2] = ["don't know", "not sure"];

/// How technical the user appears to be, judged from their first answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expertise {
    Beginner,
    Intermediate,
    Advanced,
}

impl Expertise {
    pub fn assess(response: &str) -> Self {
        let lower = response.to_lowercase();
        if TECHNICAL_TERMS.iter().any(|term| lower.contains(term)) {
            Expertise::Advanced
        } else if UNSURE_PHRASES.iter().any(|phrase| lower.contains(phrase)) {
            Expertise::Beginner
        } else {
            Expertise::Intermediate
        }
    }

    /// Guidance appended to the system prompt
    pub fn guidance(&self) -> &'static str {
        match self {
            Expertise::Beginner => {
                "The user is new to websites. Avoid jargon and offer concrete examples with each question."
            }
            Expertise::Intermediate => {
                "The user has some familiarity with websites. Keep questions plain and business-focused."
            }
            Expertise::Advanced => {
                "The user is technical. You may ask about platforms, integrations and hosting directly."
            }
        }
    }
}

impl fmt::Display for Expertise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expertise::Beginner => write!(f, "beginner"),
            Expertise::Intermediate => write!(f, "intermediate"),
            Expertise::Advanced => write!(f, "advanced"),
        }
    }
}
