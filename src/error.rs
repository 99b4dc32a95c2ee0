use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while obtaining a raw agent configuration payload.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Could not read payload file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse agent config JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to fetch agent config from upstream ({status}): {details}")]
    Upstream { status: u16, details: String },

    #[error("Upstream returned an unexpected payload for agent config")]
    UnexpectedPayload,

    #[error("No payload is known for agent '{0}'")]
    UnknownAgent(String),

    #[error("Invalid provider base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("HTTP request failed: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Errors raised when provider settings are incomplete.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Missing ELEVENLABS_API_KEY")]
    MissingApiKey,

    #[error("Missing MJRVS_ELEVENLABS_AGENT_ID")]
    MissingAgentId,
}

/// Errors surfaced by the snapshot cache to its callers.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("No agent id was requested and the source has no default agent")]
    MissingAgentId,

    #[error("Snapshot request failed for agent '{agent_id}': {source}")]
    Request {
        agent_id: String,
        #[source]
        source: SourceError,
    },
}
