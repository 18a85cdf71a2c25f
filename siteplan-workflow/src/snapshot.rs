use crate::expertise::Expertise;
use crate::service::Turn;
use crate::session::{CompletionPolicy, Exchange, Question, SessionCollector, SessionState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything needed to resume or re-render a planning session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub state: SessionState,
    #[serde(default)]
    pub policy: CompletionPolicy,
    pub exchanges: Vec<Exchange>,
    #[serde(default)]
    pub history: Vec<Turn>,
    #[serde(default)]
    pub asked_questions: Vec<String>,
    pub question_count: usize,
    pub expertise: Option<Expertise>,
    pub pending: Option<Question>,
}

impl SessionSnapshot {
    /// Collector rebuilt from the saved exchange log
    pub fn collector(&self) -> SessionCollector {
        SessionCollector::restore(self.exchanges.clone(), self.state, self.policy.clone())
    }
}
