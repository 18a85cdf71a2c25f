use crate::snapshot::SessionSnapshot;
use async_trait::async_trait;
use uuid::Uuid;

mod file;
mod memory;

pub use file::FileSessionStore;
pub use memory::InMemorySessionStore;

/// Where session snapshots are saved between turns or runs.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a snapshot, returning a locator for it (a file path or id)
    async fn save(&self, snapshot: &SessionSnapshot) -> Result<String, StorageError>;
    /// Latest snapshot of a session
    async fn load(&self, session_id: Uuid) -> Result<Option<SessionSnapshot>, StorageError>;
    /// Ids of all sessions with at least one snapshot
    async fn list(&self) -> Result<Vec<Uuid>, StorageError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Resource not found: {0}")]
    NotFound(String),
}
