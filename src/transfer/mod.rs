//! Node/edge transfer graph derived from node-prompt and edge-condition chunks.

mod formatter;
mod index;

pub use formatter::TransferMapFormatter;
pub use index::{TransferIndex, TransferRow};

use crate::chunk::{ChunkContent, ConfigChunk};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferNode {
    pub id: String,
    pub name: String,
}

/// A transition between two nodes, identified by display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEdge {
    pub source: String,
    pub target: String,
    pub forward_condition: String,
    pub backward_condition: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferMap {
    pub nodes: Vec<TransferNode>,
    pub edges: Vec<TransferEdge>,
}

impl TransferMap {
    /// Builds the graph. Every edge endpoint ends up in `nodes`, including
    /// endpoints that have no node-prompt chunk of their own.
    pub fn build(chunks: &[ConfigChunk]) -> Self {
        let mut map = TransferMap::default();
        let mut seen = AHashSet::new();

        for chunk in chunks {
            if let ChunkContent::NodePrompt(_) = &chunk.content {
                map.add_node(&mut seen, &chunk.raw_id, &chunk.component_id);
            }
        }

        for chunk in chunks {
            let ChunkContent::EdgeCondition(edge) = &chunk.content else {
                continue;
            };
            map.add_node(&mut seen, &edge.source_node_id, &edge.source_node_name);
            map.add_node(&mut seen, &edge.target_node_id, &edge.target_node_name);
            map.edges.push(TransferEdge {
                source: edge.source_node_name.clone(),
                target: edge.target_node_name.clone(),
                forward_condition: edge.forward_condition.clone(),
                backward_condition: edge.backward_condition.clone(),
            });
        }

        map
    }

    /// First node registered under a name wins.
    fn add_node(&mut self, seen: &mut AHashSet<String>, id: &str, name: &str) {
        if seen.insert(name.to_string()) {
            self.nodes.push(TransferNode {
                id: id.to_string(),
                name: name.to_string(),
            });
        }
    }

    pub fn node(&self, name: &str) -> Option<&TransferNode> {
        self.nodes.iter().find(|node| node.name == name)
    }

    /// Edges leaving `name`. Scans every edge; use [`TransferMap::index`] for
    /// repeated queries.
    pub fn outgoing<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a TransferEdge> {
        self.edges.iter().filter(move |edge| edge.source == name)
    }

    /// Edges entering `name`. Scans every edge.
    pub fn incoming<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a TransferEdge> {
        self.edges.iter().filter(move |edge| edge.target == name)
    }

    /// Builds an adjacency index for repeated neighbourhood queries.
    pub fn index(&self) -> TransferIndex<'_> {
        TransferIndex::new(self)
    }
}

/// Builds the transfer map for a list of chunks.
pub fn build_transfer_map(chunks: &[ConfigChunk]) -> TransferMap {
    TransferMap::build(chunks)
}
