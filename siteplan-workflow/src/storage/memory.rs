use super::{SessionStore, StorageError};
use crate::snapshot::SessionSnapshot;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Keeps the latest snapshot of each session in memory. Sessions never see
/// each other's state; the map is the only shared structure.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    snapshots: Arc<Mutex<HashMap<Uuid, SessionSnapshot>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save(&self, snapshot: &SessionSnapshot) -> Result<String, StorageError> {
        self.snapshots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(snapshot.id, snapshot.clone());
        Ok(snapshot.id.to_string())
    }

    async fn load(&self, session_id: Uuid) -> Result<Option<SessionSnapshot>, StorageError> {
        Ok(self
            .snapshots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&session_id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Uuid>, StorageError> {
        let mut ids: Vec<Uuid> = self
            .snapshots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .keys()
            .copied()
            .collect();
        ids.sort();
        Ok(ids)
    }
}
