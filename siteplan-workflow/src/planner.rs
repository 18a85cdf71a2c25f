//! Conversation driver: asks questions, records answers and decides when the
//! plan is ready.

use crate::category::Category;
use crate::error::{ModelError, PlannerError};
use crate::expertise::Expertise;
use crate::plan::PlanDocument;
use crate::prompt::OPENING_QUESTION;
use crate::service::{ConversationContext, ModelReply, ModelService, Turn};
use crate::session::{CompletionPolicy, Question, SessionCollector, SessionState};
use crate::snapshot::SessionSnapshot;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::sync::Arc;
use uuid::Uuid;

const GENERIC_FALLBACK: &str = "What other requirements do you have for your website?";

#[derive(Debug, Clone)]
pub struct PlannerSettings {
    /// Questions to ask before a completion signal is accepted
    pub min_questions: usize,
    /// Model calls per turn before falling back to a scripted question
    pub retry_attempts: usize,
    pub policy: CompletionPolicy,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            min_questions: 15,
            retry_attempts: 3,
            policy: CompletionPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannerOutcome {
    Question(Question),
    PlanReady(PlanDocument),
}

/// Scripted question used when the model cannot supply one.
pub fn fallback_question(category: Category) -> Question {
    let text = match category {
        Category::WebsiteType => {
            "What type of website is this: a shop, a portfolio, a blog, a business site, or something else?"
        }
        Category::WebsitePurpose => "What is the main purpose of your website?",
        Category::TargetAudience => "Who is the main audience for your website?",
        Category::PrimaryGoals => "What are the most important goals the website should achieve?",
        Category::DesignStyle => {
            "What visual style do you have in mind, for example modern, minimal, playful or classic?"
        }
        Category::Branding => "Do you have existing branding such as a logo, colours or fonts?",
        Category::KeyFeatures => "Which features must the website have at launch?",
        Category::Integrations => {
            "Does the website need to connect to other services, like payments, email or social media?"
        }
        Category::HostingPlatform => "Do you have a preferred platform or hosting provider?",
        Category::Security => {
            "Are there security requirements, such as user accounts, payments or data privacy rules?"
        }
        Category::ContentTypes => {
            "What kind of content will the website show, such as text, photos, videos or products?"
        }
        Category::UpdateFrequency => "How often do you expect to update the content, and who will do it?",
        Category::BudgetTimeline => "What budget and timeline are you working with?",
        Category::PerformanceScalability => {
            "How much traffic do you expect, and how fast does the site need to grow?"
        }
        Category::AdditionalNotes => GENERIC_FALLBACK,
    };
    Question::new(category, text)
}

fn normalize(question: &str) -> String {
    question.trim().to_lowercase()
}

/// One user's planning conversation.
pub struct PlanningSession {
    id: Uuid,
    created_at: DateTime<Utc>,
    collector: SessionCollector,
    service: Arc<dyn ModelService>,
    settings: PlannerSettings,
    history: Vec<Turn>,
    asked: BTreeSet<String>,
    pending: Option<Question>,
    question_count: usize,
    expertise: Option<Expertise>,
}

impl PlanningSession {
    pub fn new(service: Arc<dyn ModelService>, settings: PlannerSettings) -> Self {
        let collector = SessionCollector::new(settings.policy.clone());
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            collector,
            service,
            settings,
            history: Vec::new(),
            asked: BTreeSet::new(),
            pending: None,
            question_count: 0,
            expertise: None,
        }
    }

    /// Resume a saved conversation. The snapshot's completion policy wins
    /// over the one in `settings`.
    pub fn from_snapshot(
        snapshot: SessionSnapshot,
        service: Arc<dyn ModelService>,
        mut settings: PlannerSettings,
    ) -> Self {
        settings.policy = snapshot.policy.clone();
        let collector =
            SessionCollector::restore(snapshot.exchanges, snapshot.state, snapshot.policy);
        Self {
            id: snapshot.id,
            created_at: snapshot.created_at,
            collector,
            service,
            settings,
            history: snapshot.history,
            asked: snapshot.asked_questions.into_iter().collect(),
            pending: snapshot.pending,
            question_count: snapshot.question_count,
            expertise: snapshot.expertise,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn collector(&self) -> &SessionCollector {
        &self.collector
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn pending_question(&self) -> Option<&Question> {
        self.pending.as_ref()
    }

    pub fn question_count(&self) -> usize {
        self.question_count
    }

    pub fn expertise(&self) -> Option<Expertise> {
        self.expertise
    }

    pub fn state(&self) -> SessionState {
        self.collector.state()
    }

    /// The question to show the user: the pending one when resuming,
    /// the opening question for a fresh session, otherwise a scripted
    /// question about what is still unanswered.
    pub fn start(&mut self) -> Question {
        if let Some(pending) = &self.pending {
            return pending.clone();
        }
        let question = if self.question_count == 0 {
            Question::new(Category::WebsitePurpose, OPENING_QUESTION)
        } else {
            fallback_question(self.next_unanswered().unwrap_or(Category::AdditionalNotes))
        };
        self.ask(question.clone());
        question
    }

    /// Record the user's answer to the pending question and move the
    /// conversation forward.
    pub async fn respond(&mut self, answer: &str) -> Result<PlannerOutcome, PlannerError> {
        let pending = self.pending.clone().ok_or(PlannerError::NoPendingQuestion)?;
        let answer = self.collector.record(&pending, answer)?.answer.clone();

        if self.expertise.is_none() {
            let expertise = Expertise::assess(&answer);
            tracing::info!(session_id = %self.id, %expertise, "Assessed user expertise");
            self.expertise = Some(expertise);
        }

        self.history.push(Turn::user(answer));
        self.pending = None;

        self.advance().await
    }

    /// The user asked for the plan explicitly.
    pub fn request_plan(&mut self) -> Result<PlanDocument, PlannerError> {
        self.collector.mark_complete()?;
        Ok(self.collector.render_plan()?)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            created_at: self.created_at,
            updated_at: Utc::now(),
            state: self.collector.state(),
            policy: self.collector.policy().clone(),
            exchanges: self.collector.exchanges().to_vec(),
            history: self.history.clone(),
            asked_questions: self.asked.iter().cloned().collect(),
            question_count: self.question_count,
            expertise: self.expertise,
            pending: self.pending.clone(),
        }
    }

    async fn advance(&mut self) -> Result<PlannerOutcome, PlannerError> {
        let missing = self.collector.missing_categories();

        for attempt in 1..=self.settings.retry_attempts {
            let reply = self
                .service
                .next_message(ConversationContext {
                    history: &self.history,
                    expertise: self.expertise,
                    missing: &missing,
                    min_questions: self.settings.min_questions,
                })
                .await;

            let error = match reply {
                Ok(ModelReply::Question(question)) => {
                    if self.asked.contains(&normalize(&question.text)) {
                        ModelError::DuplicateQuestion(question.text)
                    } else {
                        return Ok(self.ask(question));
                    }
                }
                Ok(ModelReply::Complete) => return self.on_completion_signal(&missing),
                Err(error) => error,
            };

            tracing::warn!(
                session_id = %self.id,
                attempt,
                error = %error,
                "Question generation failed"
            );
        }

        tracing::warn!(session_id = %self.id, "Falling back to a scripted question");
        if let Some(category) = self.next_unanswered() {
            return Ok(self.ask(fallback_question(category)));
        }
        if !self.asked.contains(&normalize(GENERIC_FALLBACK)) {
            return Ok(self.ask(fallback_question(Category::AdditionalNotes)));
        }

        // Every scripted question has been used and the required
        // categories are answered
        tracing::info!(session_id = %self.id, "No scripted questions left, finalizing plan");
        self.finalize()
    }

    fn finalize(&mut self) -> Result<PlannerOutcome, PlannerError> {
        self.collector.mark_complete()?;
        let plan = self.collector.render_plan()?;
        Ok(PlannerOutcome::PlanReady(plan))
    }

    fn on_completion_signal(
        &mut self,
        missing: &[Category],
    ) -> Result<PlannerOutcome, PlannerError> {
        if let Some(category) = missing.first() {
            tracing::info!(
                session_id = %self.id,
                category = category.key(),
                "Completion signalled with required categories unanswered"
            );
            return Ok(self.ask(fallback_question(*category)));
        }

        if self.question_count < self.settings.min_questions {
            if let Some(category) = self.next_unanswered() {
                tracing::debug!(
                    session_id = %self.id,
                    questions = self.question_count,
                    "Completion signalled early, asking about {}",
                    category.label()
                );
                return Ok(self.ask(fallback_question(category)));
            }
        }

        self.finalize()
    }

    /// First required category without an answer, else the first optional
    /// one whose scripted question has not been asked yet.
    fn next_unanswered(&self) -> Option<Category> {
        if let Some(category) = self.collector.missing_categories().first() {
            return Some(*category);
        }
        let answers = self.collector.current_answers();
        Category::ALL.into_iter().find(|category| {
            *category != Category::AdditionalNotes
                && !answers.contains(*category)
                && !self
                    .asked
                    .contains(&normalize(&fallback_question(*category).text))
        })
    }

    fn ask(&mut self, question: Question) -> PlannerOutcome {
        self.history.push(Turn::assistant(question.text.clone()));
        self.asked.insert(normalize(&question.text));
        self.question_count += 1;
        self.pending = Some(question.clone());
        tracing::debug!(
            session_id = %self.id,
            category = question.category.key(),
            count = self.question_count,
            "Asking question"
        );
        PlannerOutcome::Question(question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fallback_questions_are_distinct() {
        let texts: HashSet<String> = Category::ALL
            .into_iter()
            .map(|category| normalize(&fallback_question(category).text))
            .collect();
        assert_eq!(texts.len(), Category::ALL.len());
    }

    #[test]
    fn test_fallback_keeps_category() {
        for category in Category::ALL {
            assert_eq!(fallback_question(category).category, category);
        }
        assert_eq!(
            fallback_question(Category::AdditionalNotes).text,
            GENERIC_FALLBACK
        );
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  What Is Your Budget? "), "what is your budget?");
    }
}
