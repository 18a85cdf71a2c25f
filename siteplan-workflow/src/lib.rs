//! # Siteplan Workflow
//!
//! Conversational website planning. A [`planner::PlanningSession`] asks the
//! user questions (with help from a [`service::ModelService`]), records each
//! answer in a [`session::SessionCollector`] under a plan [`category::Category`],
//! and renders a six-section [`plan::PlanDocument`] once the
//! [`session::CompletionPolicy`] is met.
//!
//! Each user gets their own `PlanningSession`; nothing is shared between
//! sessions.

pub mod category;
pub mod error;
pub mod expertise;
pub mod export;
pub mod plan;
pub mod planner;
pub mod prompt;
pub mod response;
pub mod service;
pub mod session;
pub mod snapshot;
pub mod storage;

pub use category::{Category, Section};
pub use error::{ModelError, PlannerError, SessionError};
pub use expertise::Expertise;
pub use plan::{PlanDocument, NOT_SPECIFIED};
pub use planner::{PlannerOutcome, PlannerSettings, PlanningSession};
pub use service::{ConversationContext, LlmModelService, ModelReply, ModelService, Turn};
pub use session::{CompletionPolicy, Exchange, Question, SessionAnswers, SessionCollector, SessionState};
pub use snapshot::SessionSnapshot;
