//! The session collector: an ordered log of question/answer exchanges and
//! the category-keyed answer set derived from it.

use crate::category::Category;
use crate::error::SessionError;
use crate::plan::PlanDocument;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A question the assistant asked, tagged with the plan category it fills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub category: Category,
    pub text: String,
}

impl Question {
    pub fn new(category: Category, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
        }
    }
}

/// One recorded question/answer turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub category: Category,
    pub question: String,
    pub answer: String,
    pub timestamp: DateTime<Utc>,
}

/// Latest answer per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionAnswers(BTreeMap<Category, String>);

impl SessionAnswers {
    pub fn get(&self, category: Category) -> Option<&str> {
        self.0.get(&category).map(String::as_str)
    }

    pub fn contains(&self, category: Category) -> bool {
        self.0.contains_key(&category)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Answers in rendering order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &str)> {
        self.0.iter().map(|(category, answer)| (*category, answer.as_str()))
    }

    fn insert(&mut self, category: Category, answer: String) {
        self.0.insert(category, answer);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Collecting,
    Complete,
}

/// Which categories must be answered before a plan can be produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionPolicy {
    required: BTreeSet<Category>,
}

impl CompletionPolicy {
    pub fn new(required: impl IntoIterator<Item = Category>) -> Self {
        Self {
            required: required.into_iter().collect(),
        }
    }

    pub fn required(&self) -> impl Iterator<Item = Category> + '_ {
        self.required.iter().copied()
    }

    /// Required categories without an answer, in rendering order
    pub fn missing(&self, answers: &SessionAnswers) -> Vec<Category> {
        self.required
            .iter()
            .copied()
            .filter(|category| !answers.contains(*category))
            .collect()
    }

    pub fn is_satisfied(&self, answers: &SessionAnswers) -> bool {
        self.missing(answers).is_empty()
    }
}

impl Default for CompletionPolicy {
    /// One anchor category per plan section.
    fn default() -> Self {
        Self::new([
            Category::WebsitePurpose,
            Category::PrimaryGoals,
            Category::DesignStyle,
            Category::KeyFeatures,
            Category::ContentTypes,
            Category::BudgetTimeline,
        ])
    }
}

/// Holds the exchange log and answer set for a single user session.
#[derive(Debug, Clone)]
pub struct SessionCollector {
    exchanges: Vec<Exchange>,
    answers: SessionAnswers,
    state: SessionState,
    policy: CompletionPolicy,
}

impl SessionCollector {
    pub fn new(policy: CompletionPolicy) -> Self {
        Self {
            exchanges: Vec::new(),
            answers: SessionAnswers::default(),
            state: SessionState::Collecting,
            policy,
        }
    }

    /// Rebuild a collector from a saved exchange log.
    ///
    /// Saved files can be edited by hand, so the log is re-validated:
    /// exchanges with a blank answer are dropped, and a session saved as
    /// Complete goes back to Collecting if required answers are missing.
    pub fn restore(
        exchanges: Vec<Exchange>,
        state: SessionState,
        policy: CompletionPolicy,
    ) -> Self {
        let mut collector = Self::new(policy);
        for mut exchange in exchanges {
            let answer = exchange.answer.trim();
            if answer.is_empty() {
                tracing::warn!(
                    category = exchange.category.key(),
                    "Dropping saved exchange with an empty answer"
                );
                continue;
            }
            exchange.answer = answer.to_string();
            collector
                .answers
                .insert(exchange.category, exchange.answer.clone());
            collector.exchanges.push(exchange);
        }

        if state == SessionState::Complete {
            if collector.is_ready() {
                collector.state = SessionState::Complete;
            } else {
                tracing::warn!(
                    missing = ?collector.missing_categories(),
                    "Saved session was marked complete with required answers missing"
                );
            }
        }
        collector
    }

    /// Record an answer to `question`.
    ///
    /// The answer is trimmed; a blank answer is rejected and leaves the
    /// session untouched.
    pub fn record(&mut self, question: &Question, answer: &str) -> Result<&Exchange, SessionError> {
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(SessionError::EmptyAnswer);
        }

        self.answers.insert(question.category, answer.to_string());
        self.exchanges.push(Exchange {
            category: question.category,
            question: question.text.clone(),
            answer: answer.to_string(),
            timestamp: Utc::now(),
        });

        tracing::debug!(
            category = question.category.key(),
            exchanges = self.exchanges.len(),
            "Recorded answer"
        );

        Ok(&self.exchanges[self.exchanges.len() - 1])
    }

    pub fn current_answers(&self) -> SessionAnswers {
        self.answers.clone()
    }

    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn policy(&self) -> &CompletionPolicy {
        &self.policy
    }

    pub fn missing_categories(&self) -> Vec<Category> {
        self.policy.missing(&self.answers)
    }

    pub fn is_ready(&self) -> bool {
        self.policy.is_satisfied(&self.answers)
    }

    /// Collecting -> Complete. Fails, and stays Collecting, while required
    /// categories are unanswered.
    pub fn mark_complete(&mut self) -> Result<(), SessionError> {
        if self.state == SessionState::Complete {
            return Ok(());
        }
        let missing = self.missing_categories();
        if !missing.is_empty() {
            return Err(SessionError::Incomplete { missing });
        }
        self.state = SessionState::Complete;
        tracing::info!(exchanges = self.exchanges.len(), "Session complete");
        Ok(())
    }

    pub fn render_plan(&self) -> Result<PlanDocument, SessionError> {
        let missing = self.missing_categories();
        if !missing.is_empty() {
            return Err(SessionError::Incomplete { missing });
        }
        Ok(PlanDocument::from_answers(&self.answers))
    }
}

impl Default for SessionCollector {
    fn default() -> Self {
        Self::new(CompletionPolicy::default())
    }
}
