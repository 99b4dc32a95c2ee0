//! Common test utilities for building agent configuration payloads.
use chrono::{DateTime, TimeZone, Utc};
use convai_snapshot::prelude::*;
use serde_json::{Value, json};

/// A fixed snapshot time so outputs are comparable across runs.
#[allow(dead_code)]
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
}

/// A payload with no workflow at all.
#[allow(dead_code)]
pub fn empty_payload() -> Value {
    json!({
        "conversation_config": {
            "agent": { "prompt": { "prompt": "Hello", "llm": "gemini-2.0-flash" } }
        },
        "workflow": { "nodes": {}, "edges": {} }
    })
}

/// A support agent with three nodes, four edges and a mix of tool sources.
///
/// Graph: Greeting -> Billing, Greeting -> Support, Billing -> Greeting,
/// Support -> n9 (dangling).
#[allow(dead_code)]
pub fn support_agent_payload() -> Value {
    json!({
        "conversation_config": {
            "agent": {
                "first_message": "  Hi there!  ",
                "language": "en",
                "disable_first_message_interruptions": true,
                "prompt": {
                    "prompt": "You are a support agent.",
                    "llm": "gemini-2.0-flash",
                    "temperature": 0.3,
                    "max_tokens": -1,
                    "tool_ids": ["lookup_order"],
                    "tools": [
                        {
                            "tool_id": "lookup_order",
                            "name": "Lookup Order",
                            "type": "webhook",
                            "params": { "url": "https://example.invalid/orders" }
                        },
                        { "type": "client", "description": "no identifiers" }
                    ]
                }
            },
            "tts": { "voice_id": "v1" },
            "turn": { "turn_timeout": 7 }
        },
        "workflow": {
            "nodes": {
                "n1": {
                    "label": "Greeting",
                    "type": "start",
                    "additional_prompt": "Welcome the caller.",
                    "additional_tool_ids": ["lookup_order"]
                },
                "n2": {
                    "label": "Billing",
                    "type": "override_agent",
                    "additional_tool_ids": ["refund", "Lookup_Order"],
                    "conversation_config": {
                        "agent": { "prompt": { "llm": "gpt-4o-mini" } }
                    }
                },
                "n3": {
                    "label": "Support",
                    "tools": ["kb_search", { "tool_id": "refund", "name": "Refund" }]
                }
            },
            "edges": {
                "e1": {
                    "source": "n1",
                    "target": "n2",
                    "forward_condition": { "type": "llm", "condition": "asks about invoices" }
                },
                "e2": {
                    "source": "n1",
                    "target": "n3",
                    "forward_condition": { "type": "llm", "condition": "needs help" },
                    "backward_condition": { "type": "result", "successful": false }
                },
                "e3": {
                    "source": "n2",
                    "target": "n1",
                    "forward_condition": { "type": "unconditional" }
                },
                "e4": {
                    "source": "n3",
                    "target": "n9",
                    "forward_condition": "escalate"
                }
            }
        }
    })
}

/// Chunks of the given type, in output order.
#[allow(dead_code)]
pub fn of_type(chunks: &[ConfigChunk], component_type: ComponentType) -> Vec<&ConfigChunk> {
    chunks
        .iter()
        .filter(|chunk| chunk.component_type() == component_type)
        .collect()
}

/// The single chunk with the given component id.
#[allow(dead_code)]
pub fn chunk_named<'a>(chunks: &'a [ConfigChunk], component_id: &str) -> &'a ConfigChunk {
    chunks
        .iter()
        .find(|chunk| chunk.component_id == component_id)
        .unwrap_or_else(|| panic!("no chunk named '{}'", component_id))
}
