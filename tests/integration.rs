//! Integration tests for convai-snapshot
//!
//! End-to-end scenarios over raw payloads, plus the serialized shape of chunks.
//!
mod common;
use common::*;
use convai_snapshot::chunk::ChunkContent;
use convai_snapshot::prelude::*;
use serde_json::json;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_empty_workflow_yields_root_chunks_only() {
        let chunks = decompose(&empty_payload(), fixed_time());
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].component_type(), ComponentType::GlobalConfig);
        assert_eq!(chunks[1].component_type(), ComponentType::RootPrompt);

        let map = build_transfer_map(&chunks);
        assert!(map.nodes.is_empty());
        assert!(map.edges.is_empty());
    }

    #[test]
    fn test_self_loop() {
        let payload = json!({
            "workflow": {
                "nodes": { "n1": { "label": "Greeting" } },
                "edges": {
                    "e1": {
                        "source": "n1",
                        "target": "n1",
                        "forward_condition": { "type": "unconditional" }
                    }
                }
            }
        });
        let chunks = decompose(&payload, fixed_time());
        let edge = chunk_named(&chunks, "Greeting -> Greeting");
        let ChunkContent::EdgeCondition(content) = &edge.content else {
            panic!("expected an edge condition chunk");
        };
        assert_eq!(content.forward_condition, "unconditional");
        assert_eq!(
            content.forward_condition_raw,
            json!({ "type": "unconditional" })
        );

        let map = build_transfer_map(&chunks);
        assert_eq!(map.nodes.len(), 1);
        assert_eq!(map.edges.len(), 1);
    }

    #[test]
    fn test_self_loop_with_plain_string_condition() {
        let payload = json!({
            "workflow": {
                "nodes": { "n1": { "label": "Greeting" } },
                "edges": {
                    "e1": { "source": "n1", "target": "n1", "forward_condition": "unconditional" }
                }
            }
        });
        let chunks = decompose(&payload, fixed_time());
        assert_eq!(chunks.len(), 4);

        let edge = chunk_named(&chunks, "Greeting -> Greeting");
        let ChunkContent::EdgeCondition(content) = &edge.content else {
            panic!("expected an edge condition chunk");
        };
        assert_eq!(content.source_node_name, "Greeting");
        assert_eq!(content.target_node_name, "Greeting");
        assert_eq!(content.forward_condition, "unconditional");
        assert_eq!(content.forward_condition_raw, json!("unconditional"));
        assert_eq!(content.backward_condition, "(none)");

        let map = build_transfer_map(&chunks);
        assert_eq!(map.nodes.len(), 1);
        assert_eq!(map.outgoing("Greeting").count(), 1);
        assert_eq!(map.incoming("Greeting").count(), 1);
    }

    #[test]
    fn test_root_tool_id_becomes_unresolved_tool() {
        let payload = json!({
            "conversation_config": { "agent": { "prompt": { "tool_ids": ["search_tool"] } } }
        });
        let chunks = decompose(&payload, fixed_time());
        let tools = of_type(&chunks, ComponentType::ToolSchema);
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].component_id, "search_tool");
        assert_eq!(tools[0].raw_id, "search_tool");

        let ChunkContent::ToolSchema(content) = &tools[0].content else {
            panic!("expected a tool schema chunk");
        };
        assert_eq!(content.tool_type, "unknown");
        assert_eq!(content.registered_on_nodes, vec!["Root Agent"]);
        assert_eq!(
            content.full_tool_config,
            json!({ "tool_id": "search_tool", "unresolved": true })
        );
    }

    #[test]
    fn test_result_condition_text() {
        let payload = json!({
            "workflow": {
                "edges": {
                    "e1": {
                        "source": "a",
                        "target": "b",
                        "forward_condition": { "type": "result", "successful": true }
                    }
                }
            }
        });
        let chunks = decompose(&payload, fixed_time());
        let ChunkContent::EdgeCondition(content) = &chunks[2].content else {
            panic!("expected an edge condition chunk");
        };
        assert_eq!(content.forward_condition, "successful == true");
        assert_eq!(content.backward_condition, "(none)");
    }

    #[test]
    fn test_same_input_gives_byte_identical_output() {
        let payload = support_agent_payload();
        let first = serde_json::to_string(&decompose(&payload, fixed_time())).unwrap();
        let second = serde_json::to_string(&decompose(&payload, fixed_time())).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_chunk_json_shape() {
        let chunks = decompose(&support_agent_payload(), fixed_time());
        let encoded = serde_json::to_value(&chunks).unwrap();
        let edge = encoded
            .as_array()
            .unwrap()
            .iter()
            .find(|chunk| chunk["component_id"] == "Greeting -> Billing")
            .unwrap();

        assert_eq!(edge["component_type"], "edge_condition");
        assert_eq!(edge["raw_id"], "e1");
        assert_eq!(edge["snapshot_at"], "2025-03-14T09:26:53.000Z");
        assert_eq!(edge["content"]["forward_condition"], "asks about invoices");
        assert_eq!(edge["content"]["source_node_id"], "n1");
        assert_eq!(edge["content"]["target_node_name"], "Billing");
    }

    #[test]
    fn test_legacy_chunks_carry_text_content() {
        let chunks = decompose(&empty_payload(), fixed_time());
        let legacy = chunks[1].to_legacy();

        assert_eq!(legacy.component_type, ComponentType::RootPrompt);
        assert_eq!(legacy.snapshot_at, "2025-03-14T09:26:53.000Z");
        let content: serde_json::Value = serde_json::from_str(&legacy.content).unwrap();
        assert_eq!(content["prompt"], "Hello");
        assert_eq!(content["llm"], "gemini-2.0-flash");
        assert!(legacy.content.contains('\n'));
    }

    #[test]
    fn test_groups_follow_display_order() {
        let chunks = decompose(&support_agent_payload(), fixed_time());
        let groups = ChunkGroups::new(&chunks);

        let order: Vec<ComponentType> = groups.iter().map(|(kind, _)| kind).collect();
        assert_eq!(order, ComponentType::DISPLAY_ORDER.to_vec());
        assert_eq!(groups.get(ComponentType::NodePrompt).len(), 3);
        assert_eq!(groups.get(ComponentType::GlobalConfig).len(), 1);
        assert_eq!(groups.get(ComponentType::ToolSchema)[0].component_id, "kb_search");
    }

    #[test]
    fn test_one_chunk_per_node_and_edge_key() {
        let payload = support_agent_payload();
        let chunks = decompose(&payload, fixed_time());

        let mut node_ids: Vec<&str> = of_type(&chunks, ComponentType::NodePrompt)
            .iter()
            .map(|c| c.raw_id.as_str())
            .collect();
        node_ids.sort_unstable();
        assert_eq!(node_ids, vec!["n1", "n2", "n3"]);

        let mut edge_ids: Vec<&str> = of_type(&chunks, ComponentType::EdgeCondition)
            .iter()
            .map(|c| c.raw_id.as_str())
            .collect();
        edge_ids.sort_unstable();
        assert_eq!(edge_ids, vec!["e1", "e2", "e3", "e4"]);
    }

    #[test]
    fn test_payload_file_is_read_and_decomposed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.json");
        std::fs::write(&path, support_agent_payload().to_string()).unwrap();

        let payload = read_payload_file(&path).unwrap();
        let chunks = decompose(&payload, fixed_time());
        assert_eq!(chunks.len(), 13);
    }
}
