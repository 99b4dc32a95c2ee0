use super::nodes::NodeNames;
use crate::chunk::{ChunkContent, ConfigChunk, EdgeConditionContent};
use crate::collation::locale_cmp;
use crate::payload::AgentDefinition;
use chrono::{DateTime, Utc};

const UNKNOWN_SOURCE: &str = "unknown_source";
const UNKNOWN_TARGET: &str = "unknown_target";

/// Builds one chunk per workflow edge. Endpoints that match no node keep
/// their raw id as display name; such edges are never dropped.
pub(super) fn edge_condition_chunks(
    definition: &AgentDefinition,
    names: &NodeNames<'_>,
    snapshot_at: DateTime<Utc>,
) -> Vec<ConfigChunk> {
    let mut chunks: Vec<ConfigChunk> = definition
        .edges
        .iter()
        .map(|edge| {
            let source_id = edge.source.as_deref().unwrap_or(UNKNOWN_SOURCE);
            let target_id = edge.target.as_deref().unwrap_or(UNKNOWN_TARGET);
            let source_name = names.resolve(source_id);
            let target_name = names.resolve(target_id);

            let content = EdgeConditionContent {
                edge_id: edge.id.clone(),
                source_node_name: source_name.to_string(),
                source_node_id: source_id.to_string(),
                target_node_name: target_name.to_string(),
                target_node_id: target_id.to_string(),
                forward_condition: edge.forward.to_text(),
                backward_condition: edge.backward.to_text(),
                forward_condition_raw: edge.forward.raw(),
                backward_condition_raw: edge.backward.raw(),
            };

            ConfigChunk::new(
                format!("{} -> {}", source_name, target_name),
                edge.id.as_str(),
                ChunkContent::EdgeCondition(content),
                snapshot_at,
            )
        })
        .collect();

    chunks.sort_by(|left, right| locale_cmp(&left.component_id, &right.component_id));
    chunks
}
