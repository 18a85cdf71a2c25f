use super::{SessionStore, StorageError};
use crate::snapshot::SessionSnapshot;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const STATE_PREFIX: &str = "conversation_state_";

/// Writes pretty-printed snapshots as
/// `conversation_state_{YYYYmmdd_HHMMSS}.json` under an output directory.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    output_dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Read a snapshot from an explicit path
    pub async fn read_file(path: &Path) -> Result<SessionSnapshot, StorageError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(path.display().to_string())
            } else {
                StorageError::Io(e)
            }
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    fn snapshot_path(&self, snapshot: &SessionSnapshot) -> PathBuf {
        let timestamp = snapshot.updated_at.format("%Y%m%d_%H%M%S");
        let mut path = self
            .output_dir
            .join(format!("{STATE_PREFIX}{timestamp}.json"));
        // Two saves within the same second must not overwrite another session
        if path.exists() {
            let short_id = snapshot.id.simple().to_string();
            path = self
                .output_dir
                .join(format!("{STATE_PREFIX}{timestamp}_{}.json", &short_id[..8]));
        }
        path
    }

    async fn read_all(&self) -> Result<Vec<(PathBuf, SessionSnapshot)>, StorageError> {
        let mut snapshots = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.output_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(snapshots),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_state = path
                .file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.starts_with(STATE_PREFIX) && name.ends_with(".json"))
                .unwrap_or(false);
            if !is_state {
                continue;
            }
            match Self::read_file(&path).await {
                Ok(snapshot) => snapshots.push((path, snapshot)),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable state file")
                }
            }
        }

        Ok(snapshots)
    }
}

#[async_trait::async_trait]
impl SessionStore for FileSessionStore {
    async fn save(&self, snapshot: &SessionSnapshot) -> Result<String, StorageError> {
        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self.snapshot_path(snapshot);
        let json = serde_json::to_string_pretty(snapshot)?;
        tokio::fs::write(&path, json).await?;
        tracing::info!(session_id = %snapshot.id, path = %path.display(), "Saved session state");
        Ok(path.display().to_string())
    }

    async fn load(&self, session_id: Uuid) -> Result<Option<SessionSnapshot>, StorageError> {
        Ok(self
            .read_all()
            .await?
            .into_iter()
            .map(|(_, snapshot)| snapshot)
            .filter(|snapshot| snapshot.id == session_id)
            .max_by_key(|snapshot| snapshot.updated_at))
    }

    async fn list(&self) -> Result<Vec<Uuid>, StorageError> {
        let mut ids: Vec<Uuid> = self
            .read_all()
            .await?
            .into_iter()
            .map(|(_, snapshot)| snapshot.id)
            .collect();
        ids.sort();
        ids.dedup();
        Ok(ids)
    }
}
