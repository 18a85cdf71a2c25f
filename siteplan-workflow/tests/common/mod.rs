use async_trait::async_trait;
use siteplan_workflow::error::ModelError;
use siteplan_workflow::{Category, ConversationContext, ModelReply, ModelService, Question};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub enum Scripted {
    Ask(Category, &'static str),
    Complete,
    Fail,
}

/// Model service that replays a fixed script and then keeps failing.
pub struct ScriptedModel {
    script: Mutex<VecDeque<Scripted>>,
    pub calls: AtomicUsize,
    pub last_missing: Mutex<Vec<Category>>,
}

impl ScriptedModel {
    pub fn new(script: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
            last_missing: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelService for ScriptedModel {
    async fn next_message(
        &self,
        conversation: ConversationContext<'_>,
    ) -> Result<ModelReply, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_missing.lock().unwrap() = conversation.missing.to_vec();

        match self.script.lock().unwrap().pop_front() {
            Some(Scripted::Ask(category, text)) => {
                Ok(ModelReply::Question(Question::new(category, text)))
            }
            Some(Scripted::Complete) => Ok(ModelReply::Complete),
            Some(Scripted::Fail) | None => Err(ModelError::MalformedReply {
                message: "scripted failure".to_string(),
            }),
        }
    }
}
