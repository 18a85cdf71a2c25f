use siteplan_llm_sdk::error::LlmError;
use siteplan_workflow::export::ExportError;
use siteplan_workflow::storage::StorageError;
use siteplan_workflow::{PlannerError, SessionError};
use std::fmt;

/// Main error type for the siteplan CLI
#[derive(Debug)]
pub enum CliError {
    /// Configuration errors, including a missing API key
    Config(String),
    /// File I/O errors
    Io(std::io::Error),
    /// The session cannot produce a plan yet
    Session(SessionError),
    /// Saving or loading session state failed
    Storage(StorageError),
    /// Writing the brief failed
    Export(ExportError),
    /// Talking to the language model failed
    Model(String),
    /// Generic errors from anyhow
    Other(anyhow::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Session(err) => write!(f, "{err}"),
            CliError::Storage(err) => write!(f, "Session state error: {err}"),
            CliError::Export(err) => write!(f, "Export error: {err}"),
            CliError::Model(msg) => write!(f, "Model error: {msg}"),
            CliError::Other(err) => write!(f, "Error: {err}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(err) => Some(err),
            CliError::Session(err) => Some(err),
            CliError::Storage(err) => Some(err),
            CliError::Export(err) => Some(err),
            CliError::Other(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl CliError {
    /// Get the exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 2,
            CliError::Io(_) => 3,
            CliError::Session(_) => 4,
            CliError::Storage(_) => 5,
            CliError::Export(_) => 6,
            CliError::Model(_) => 7,
            CliError::Other(_) => 1,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err)
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::Other(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Other(err.into())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::Config(err.to_string())
    }
}

impl From<SessionError> for CliError {
    fn from(err: SessionError) -> Self {
        CliError::Session(err)
    }
}

impl From<PlannerError> for CliError {
    fn from(err: PlannerError) -> Self {
        match err {
            PlannerError::Session(err) => CliError::Session(err),
            other => CliError::Other(other.into()),
        }
    }
}

impl From<StorageError> for CliError {
    fn from(err: StorageError) -> Self {
        CliError::Storage(err)
    }
}

impl From<ExportError> for CliError {
    fn from(err: ExportError) -> Self {
        CliError::Export(err)
    }
}

impl From<LlmError> for CliError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Authentication { .. } => CliError::Config(err.to_string()),
            other => CliError::Model(other.to_string()),
        }
    }
}
