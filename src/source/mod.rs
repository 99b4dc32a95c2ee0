//! Where raw agent configuration payloads come from.

#[cfg(feature = "fetch")]
mod elevenlabs;

#[cfg(feature = "fetch")]
pub use elevenlabs::ElevenLabsSource;

use crate::error::SourceError;
use ahash::AHashMap;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

pub const TRACING_TARGET: &str = "convai_snapshot::source";

/// Supplies the raw configuration payload of an agent.
pub trait ConfigSource: Send + Sync {
    /// Agent used when a caller does not name one.
    fn default_agent_id(&self) -> Option<String> {
        None
    }

    /// Returns the agent's configuration as a JSON object.
    fn fetch(&self, agent_id: &str) -> Result<Value, SourceError>;
}

/// In-memory payloads keyed by agent id.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    payloads: AHashMap<String, Value>,
    default_agent: Option<String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(mut self, agent_id: &str, payload: Value) -> Self {
        self.payloads.insert(agent_id.to_string(), payload);
        self
    }

    pub fn with_default_agent(mut self, agent_id: &str) -> Self {
        self.default_agent = Some(agent_id.to_string());
        self
    }
}

impl ConfigSource for StaticSource {
    fn default_agent_id(&self) -> Option<String> {
        self.default_agent.clone()
    }

    fn fetch(&self, agent_id: &str) -> Result<Value, SourceError> {
        let payload = self
            .payloads
            .get(agent_id)
            .cloned()
            .ok_or_else(|| SourceError::UnknownAgent(agent_id.to_string()))?;
        ensure_object(payload)
    }
}

/// Payloads stored on disk.
///
/// When `root` is a file, that file is served for every agent. When it is a
/// directory, agent `x` is read from `root/x.json`.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
    default_agent: Option<String>,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            default_agent: None,
        }
    }

    pub fn with_default_agent(mut self, agent_id: &str) -> Self {
        self.default_agent = Some(agent_id.to_string());
        self
    }

    fn path_for(&self, agent_id: &str) -> Result<PathBuf, SourceError> {
        if self.root.is_file() {
            return Ok(self.root.clone());
        }
        let usable = !agent_id.is_empty()
            && !agent_id.contains(['/', '\\'])
            && agent_id != "."
            && agent_id != "..";
        if !usable {
            return Err(SourceError::UnknownAgent(agent_id.to_string()));
        }
        Ok(self.root.join(format!("{}.json", agent_id)))
    }
}

impl ConfigSource for FileSource {
    fn default_agent_id(&self) -> Option<String> {
        self.default_agent.clone()
    }

    fn fetch(&self, agent_id: &str) -> Result<Value, SourceError> {
        let path = self.path_for(agent_id)?;
        tracing::debug!(target: TRACING_TARGET, path = %path.display(), "Reading agent config");
        ensure_object(read_payload_file(&path)?)
    }
}

/// Reads and parses a JSON payload file without any shape checks.
pub fn read_payload_file(path: &Path) -> Result<Value, SourceError> {
    let content = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Agent configurations are always JSON objects.
pub(crate) fn ensure_object(payload: Value) -> Result<Value, SourceError> {
    if payload.is_object() {
        Ok(payload)
    } else {
        Err(SourceError::UnexpectedPayload)
    }
}
