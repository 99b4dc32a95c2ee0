//! An injectable cache of the latest decomposition per agent.

use crate::chunk::{ConfigChunk, timestamp};
use crate::decomposer::Decomposer;
use crate::error::SnapshotError;
use crate::source::ConfigSource;
use ahash::AHashMap;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;

pub const TRACING_TARGET: &str = "convai_snapshot::cache";

/// One decomposition of one agent's configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub agent_id: String,
    #[serde(with = "timestamp")]
    pub snapshot_at: DateTime<Utc>,
    pub chunks: Vec<ConfigChunk>,
}

/// Whether a snapshot was served from the cache or freshly fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotOrigin {
    Cache,
    Live,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotResult {
    #[serde(flatten)]
    pub snapshot: Arc<Snapshot>,
    pub source: SnapshotOrigin,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: AHashMap<String, Arc<Snapshot>>,
    latest: Option<String>,
}

impl CacheState {
    fn latest(&self) -> Option<Arc<Snapshot>> {
        self.latest
            .as_ref()
            .and_then(|agent_id| self.entries.get(agent_id))
            .cloned()
    }
}

/// Latest snapshot per agent id.
///
/// All reads and refreshes go through one lock, and a refresh holds it for the
/// whole fetch-and-decompose step, so two concurrent refreshes can never
/// interleave their writes.
pub struct SnapshotCache {
    decomposer: Decomposer,
    clock: fn() -> DateTime<Utc>,
    state: Mutex<CacheState>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::with_decomposer(Decomposer::default())
    }

    pub fn with_decomposer(decomposer: Decomposer) -> Self {
        Self {
            decomposer,
            clock: Utc::now,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Replaces the timestamp source used for new snapshots.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn get(&self, agent_id: &str) -> Option<Arc<Snapshot>> {
        self.state.lock().entries.get(agent_id).cloned()
    }

    /// The most recently stored snapshot of any agent.
    pub fn latest(&self) -> Option<Arc<Snapshot>> {
        self.state.lock().latest()
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.entries.clear();
        state.latest = None;
    }

    /// Fetches, decomposes and stores a fresh snapshot of `agent_id`.
    pub fn refresh(
        &self,
        agent_id: &str,
        source: &dyn ConfigSource,
    ) -> Result<SnapshotResult, SnapshotError> {
        let mut state = self.state.lock();
        self.refresh_locked(&mut state, agent_id, source)
    }

    /// Serves a cached snapshot when possible, otherwise refreshes.
    ///
    /// Without a requested agent the latest snapshot of any agent is served;
    /// if nothing is cached the source's default agent is fetched.
    pub fn get_or_refresh(
        &self,
        agent_id: Option<&str>,
        source: &dyn ConfigSource,
    ) -> Result<SnapshotResult, SnapshotError> {
        let requested = agent_id.map(str::trim).filter(|id| !id.is_empty());
        let mut state = self.state.lock();

        let cached = match requested {
            Some(id) => state.entries.get(id).cloned(),
            None => state.latest(),
        };
        if let Some(snapshot) = cached {
            tracing::debug!(
                target: TRACING_TARGET,
                agent_id = %snapshot.agent_id,
                "Serving cached snapshot"
            );
            return Ok(SnapshotResult {
                snapshot,
                source: SnapshotOrigin::Cache,
            });
        }

        let agent_id = requested
            .map(str::to_string)
            .or_else(|| source.default_agent_id())
            .ok_or(SnapshotError::MissingAgentId)?;
        self.refresh_locked(&mut state, &agent_id, source)
    }

    fn refresh_locked(
        &self,
        state: &mut CacheState,
        agent_id: &str,
        source: &dyn ConfigSource,
    ) -> Result<SnapshotResult, SnapshotError> {
        let agent_id = agent_id.trim();
        if agent_id.is_empty() {
            return Err(SnapshotError::MissingAgentId);
        }

        let payload = source
            .fetch(agent_id)
            .map_err(|source| SnapshotError::Request {
                agent_id: agent_id.to_string(),
                source,
            })?;
        let snapshot_at = (self.clock)();
        let chunks = self.decomposer.decompose(&payload, snapshot_at);

        tracing::info!(
            target: TRACING_TARGET,
            agent_id,
            chunks = chunks.len(),
            "Stored fresh snapshot"
        );

        let snapshot = Arc::new(Snapshot {
            agent_id: agent_id.to_string(),
            snapshot_at,
            chunks,
        });
        state
            .entries
            .insert(agent_id.to_string(), Arc::clone(&snapshot));
        state.latest = Some(agent_id.to_string());

        Ok(SnapshotResult {
            snapshot,
            source: SnapshotOrigin::Live,
        })
    }
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new()
    }
}
