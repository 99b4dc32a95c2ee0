use super::{TransferEdge, TransferMap};
use crate::collation::locale_cmp;
use ahash::AHashMap;

/// Adjacency lists over a [`TransferMap`], built once and queried many times.
#[derive(Debug, Clone)]
pub struct TransferIndex<'a> {
    map: &'a TransferMap,
    outgoing: AHashMap<&'a str, Vec<usize>>,
    incoming: AHashMap<&'a str, Vec<usize>>,
}

/// A node together with every edge that leaves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRow<'a> {
    pub node_name: &'a str,
    pub outgoing: Vec<&'a TransferEdge>,
}

impl<'a> TransferIndex<'a> {
    pub fn new(map: &'a TransferMap) -> Self {
        let mut outgoing: AHashMap<&'a str, Vec<usize>> = AHashMap::new();
        let mut incoming: AHashMap<&'a str, Vec<usize>> = AHashMap::new();

        for (position, edge) in map.edges.iter().enumerate() {
            outgoing.entry(&edge.source).or_default().push(position);
            incoming.entry(&edge.target).or_default().push(position);
        }

        Self {
            map,
            outgoing,
            incoming,
        }
    }

    pub fn map(&self) -> &'a TransferMap {
        self.map
    }

    /// Edges whose source is `name`, in map order.
    pub fn outgoing(&self, name: &str) -> impl Iterator<Item = &'a TransferEdge> + '_ {
        self.edges_at(self.outgoing.get(name))
    }

    /// Edges whose target is `name`, in map order.
    pub fn incoming(&self, name: &str) -> impl Iterator<Item = &'a TransferEdge> + '_ {
        self.edges_at(self.incoming.get(name))
    }

    /// Names of the nodes reachable over one outgoing edge, without repeats.
    pub fn successors(&self, name: &str) -> Vec<&'a str> {
        let mut names: Vec<&'a str> = Vec::new();
        for edge in self.outgoing(name) {
            if !names.contains(&edge.target.as_str()) {
                names.push(&edge.target);
            }
        }
        names
    }

    /// One row per node, sorted by name, each with its outgoing edges.
    pub fn rows(&self) -> Vec<TransferRow<'a>> {
        let mut names: Vec<&'a str> = self.map.nodes.iter().map(|node| node.name.as_str()).collect();
        names.sort_by(|left, right| locale_cmp(left, right));
        names.dedup();

        names
            .into_iter()
            .map(|node_name| TransferRow {
                node_name,
                outgoing: self.outgoing(node_name).collect(),
            })
            .collect()
    }

    fn edges_at<'s>(
        &'s self,
        positions: Option<&'s Vec<usize>>,
    ) -> impl Iterator<Item = &'a TransferEdge> + 's {
        let map: &'a TransferMap = self.map;
        let edges = &map.edges;
        positions
            .into_iter()
            .flatten()
            .map(move |&position| &edges[position])
    }
}
