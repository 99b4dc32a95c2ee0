use super::tools::ToolRegistrations;
use crate::chunk::{ChunkContent, ConfigChunk, NodePromptContent};
use crate::collation::{locale_cmp, unique_sorted};
use crate::payload::{AgentDefinition, WorkflowNode};
use ahash::AHashMap;
use chrono::{DateTime, Utc};

const UNKNOWN_NODE_TYPE: &str = "unknown";

/// Maps workflow node ids to their display names.
pub(super) struct NodeNames<'a> {
    by_id: AHashMap<&'a str, &'a str>,
}

impl<'a> NodeNames<'a> {
    pub(super) fn new(nodes: &'a [WorkflowNode]) -> Self {
        let by_id = nodes
            .iter()
            .map(|node| (node.id.as_str(), display_name(node)))
            .collect();
        Self { by_id }
    }

    /// The node's display name, or the id itself for ids that match no node.
    pub(super) fn resolve<'b>(&self, id: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.by_id.get(id).copied().unwrap_or(id)
    }
}

/// A node is shown by its label, falling back to its id.
pub(super) fn display_name(node: &WorkflowNode) -> &str {
    node.label.as_deref().unwrap_or(&node.id)
}

/// Builds one chunk per workflow node and records each node's tool usage.
pub(super) fn node_prompt_chunks(
    definition: &AgentDefinition,
    registrations: &mut ToolRegistrations,
    snapshot_at: DateTime<Utc>,
) -> Vec<ConfigChunk> {
    let root_llm = definition.root.prompt.llm.as_deref();

    let mut chunks: Vec<ConfigChunk> = definition
        .nodes
        .iter()
        .map(|node| {
            let node_name = display_name(node);
            let tool_list = unique_sorted(
                node.additional_tool_ids
                    .iter()
                    .chain(&node.tool_refs)
                    .cloned(),
            );
            registrations.register(&tool_list, node_name);

            let content = NodePromptContent {
                node_name: node_name.to_string(),
                node_id: node.id.clone(),
                node_type: node
                    .node_type
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_NODE_TYPE.to_string()),
                additional_prompt: node.additional_prompt.clone().unwrap_or_default(),
                llm_assignment: node.llm.as_deref().or(root_llm).map(str::to_string),
                tool_list,
                node_prompt_config: node.prompt_config.clone(),
            };

            ConfigChunk::new(
                node_name,
                node.id.as_str(),
                ChunkContent::NodePrompt(content),
                snapshot_at,
            )
        })
        .collect();

    chunks.sort_by(|left, right| locale_cmp(&left.component_id, &right.component_id));
    chunks
}
