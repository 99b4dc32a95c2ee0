//! Decomposition of an agent configuration payload into [`ConfigChunk`]s.
//!
//! A pass emits chunks in a fixed order: the global config, the root prompt,
//! node prompts, edge conditions and finally tool schemas. Each group after the
//! first two is sorted by `component_id`, so equal inputs always produce equal
//! outputs.

use crate::chunk::{ComponentType, ConfigChunk};
use crate::payload::AgentDefinition;
use chrono::{DateTime, Utc};
use serde_json::Value;

mod edges;
mod nodes;
mod prompts;
mod tools;

use edges::edge_condition_chunks;
use nodes::{NodeNames, node_prompt_chunks};
use prompts::{global_config_chunk, root_prompt_chunk};
use tools::{ToolRegistrations, tool_schema_chunks};

pub const TRACING_TARGET: &str = "convai_snapshot::decomposer";

/// Label under which tools referenced by the root agent are registered.
pub const ROOT_AGENT_LABEL: &str = "Root Agent";

/// Stateless decomposer. Cheap to build and safe to share across threads.
#[derive(Debug, Clone)]
pub struct Decomposer {
    root_agent_label: String,
}

pub struct DecomposerBuilder {
    root_agent_label: String,
}

impl DecomposerBuilder {
    pub fn new() -> Self {
        Self {
            root_agent_label: ROOT_AGENT_LABEL.to_string(),
        }
    }

    /// Overrides the name listed in `registered_on_nodes` for root-level tools.
    pub fn with_root_agent_label(mut self, label: &str) -> Self {
        self.root_agent_label = label.to_string();
        self
    }

    pub fn build(self) -> Decomposer {
        Decomposer {
            root_agent_label: self.root_agent_label,
        }
    }
}

impl Default for DecomposerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Decomposer {
    fn default() -> Self {
        DecomposerBuilder::new().build()
    }
}

impl Decomposer {
    pub fn builder() -> DecomposerBuilder {
        DecomposerBuilder::new()
    }

    /// Decomposes a raw payload. Never fails; malformed sections degrade to defaults.
    pub fn decompose(&self, payload: &Value, snapshot_at: DateTime<Utc>) -> Vec<ConfigChunk> {
        let definition = AgentDefinition::from_value(payload);
        self.decompose_definition(&definition, snapshot_at)
    }

    /// Decomposes an already narrowed definition.
    pub fn decompose_definition(
        &self,
        definition: &AgentDefinition,
        snapshot_at: DateTime<Utc>,
    ) -> Vec<ConfigChunk> {
        let mut registrations = ToolRegistrations::default();
        registrations.register(&definition.root.prompt.tool_ids, &self.root_agent_label);

        let names = NodeNames::new(&definition.nodes);
        let node_chunks = node_prompt_chunks(definition, &mut registrations, snapshot_at);
        let edge_chunks = edge_condition_chunks(definition, &names, snapshot_at);
        let tool_chunks = tool_schema_chunks(&definition.root.prompt, &registrations, snapshot_at);

        let mut chunks =
            Vec::with_capacity(2 + node_chunks.len() + edge_chunks.len() + tool_chunks.len());
        chunks.push(global_config_chunk(&definition.root, snapshot_at));
        chunks.push(root_prompt_chunk(&definition.root, snapshot_at));
        chunks.extend(node_chunks);
        chunks.extend(edge_chunks);
        chunks.extend(tool_chunks);

        tracing::debug!(
            target: TRACING_TARGET,
            nodes = count(&chunks, ComponentType::NodePrompt),
            edges = count(&chunks, ComponentType::EdgeCondition),
            tools = count(&chunks, ComponentType::ToolSchema),
            "Decomposed agent config"
        );

        chunks
    }
}

fn count(chunks: &[ConfigChunk], component_type: ComponentType) -> usize {
    chunks
        .iter()
        .filter(|chunk| chunk.component_type() == component_type)
        .count()
}

/// Decomposes `payload` with the default [`Decomposer`].
pub fn decompose(payload: &Value, snapshot_at: DateTime<Utc>) -> Vec<ConfigChunk> {
    Decomposer::default().decompose(payload, snapshot_at)
}
