//! Tests for the transfer map, its adjacency index and the text formatter.
mod common;
use common::*;
use convai_snapshot::prelude::*;
use serde_json::json;

#[cfg(test)]
mod transfer_tests {
    use super::*;

    #[test]
    fn test_every_edge_endpoint_is_a_node() {
        let chunks = decompose(&support_agent_payload(), fixed_time());
        let map = TransferMap::build(&chunks);

        let names: Vec<&str> = map.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Billing", "Greeting", "Support", "n9"]);
        assert_eq!(map.edges.len(), 4);

        for edge in &map.edges {
            assert!(map.node(&edge.source).is_some(), "missing {}", edge.source);
            assert!(map.node(&edge.target).is_some(), "missing {}", edge.target);
        }
        assert_eq!(map.node("n9").map(|n| n.id.as_str()), Some("n9"));
        assert_eq!(map.node("Billing").map(|n| n.id.as_str()), Some("n2"));
    }

    #[test]
    fn test_index_matches_linear_queries() {
        let chunks = decompose(&support_agent_payload(), fixed_time());
        let map = build_transfer_map(&chunks);
        let index = map.index();
        assert!(std::ptr::eq(index.map(), &map));

        for node in &map.nodes {
            let scanned: Vec<_> = map.outgoing(&node.name).collect();
            let indexed: Vec<_> = index.outgoing(&node.name).collect();
            assert_eq!(scanned, indexed);

            let scanned: Vec<_> = map.incoming(&node.name).collect();
            let indexed: Vec<_> = index.incoming(&node.name).collect();
            assert_eq!(scanned, indexed);
        }

        assert_eq!(index.successors("Greeting"), vec!["Billing", "Support"]);
        assert_eq!(index.incoming("Greeting").count(), 1);
        assert_eq!(index.outgoing("nobody").count(), 0);
    }

    #[test]
    fn test_rows_are_sorted_with_outgoing_edges() {
        let chunks = decompose(&support_agent_payload(), fixed_time());
        let map = TransferMap::build(&chunks);
        let index = map.index();
        let rows = index.rows();

        let names: Vec<&str> = rows.iter().map(|row| row.node_name).collect();
        assert_eq!(names, vec!["Billing", "Greeting", "n9", "Support"]);
        assert_eq!(rows[1].outgoing.len(), 2);
        assert!(rows[2].outgoing.is_empty());
        assert_eq!(rows[3].outgoing[0].forward_condition, "escalate");
    }

    #[test]
    fn test_duplicate_labels_keep_first_node() {
        let payload = json!({
            "workflow": {
                "nodes": {
                    "a": { "label": "Intake" },
                    "b": { "label": "Intake" }
                }
            }
        });
        let chunks = decompose(&payload, fixed_time());
        let map = TransferMap::build(&chunks);

        assert_eq!(map.nodes.len(), 1);
        assert_eq!(map.nodes[0].id, "a");
    }

    #[test]
    fn test_formatter_renders_backward_conditions() {
        let chunks = decompose(&support_agent_payload(), fixed_time());
        let text = TransferMapFormatter::format(&TransferMap::build(&chunks));

        let expected = "\
Billing
  -> Greeting  [forward: unconditional]
Greeting
  -> Billing  [forward: asks about invoices]
  -> Support  [forward: needs help; backward: successful == false]
n9
  (no outgoing edges)
Support
  -> n9  [forward: escalate]
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_map_serializes_as_plain_lists() {
        let chunks = decompose(&empty_payload(), fixed_time());
        let map = TransferMap::build(&chunks);
        assert_eq!(
            serde_json::to_value(&map).unwrap(),
            json!({ "nodes": [], "edges": [] })
        );
    }
}
