//! Boundary narrowing of the upstream agent configuration payload.
//!
//! The provider's JSON is narrowed exactly once into the typed records below.
//! Narrowing is total: wrong-typed or missing fields degrade to defaults, so a
//! malformed payload still yields a usable [`AgentDefinition`].

pub mod access;
pub mod condition;

pub use condition::{Condition, NO_CONDITION};

use access::{entries, field, items, path, record, text, text_list};
use serde_json::Value;

/// The canonical, typed view of one agent configuration payload.
#[derive(Debug, Clone, Default)]
pub struct AgentDefinition {
    pub root: RootAgent,
    /// Workflow nodes in document order.
    pub nodes: Vec<WorkflowNode>,
    /// Workflow edges in document order.
    pub edges: Vec<WorkflowEdge>,
}

/// `conversation_config.agent` plus the passthrough `tts`/`turn` sections.
#[derive(Debug, Clone, Default)]
pub struct RootAgent {
    pub prompt: RootPrompt,
    pub first_message: Option<String>,
    pub language: Option<String>,
    pub disable_first_message_interruptions: Value,
    pub tts: Value,
    pub turn: Value,
}

/// `conversation_config.agent.prompt`.
#[derive(Debug, Clone, Default)]
pub struct RootPrompt {
    pub prompt: Option<String>,
    pub llm: Option<String>,
    pub reasoning_effort: Value,
    pub thinking_budget: Value,
    pub temperature: Value,
    pub max_tokens: Value,
    pub backup_llm_config: Value,
    pub cascade_timeout_seconds: Value,
    pub tool_ids: Vec<String>,
    pub tools: Vec<RootTool>,
    /// The whole prompt object, `{}` when it was not an object.
    pub config: Value,
}

/// One entry of the root `tools[]` array.
#[derive(Debug, Clone)]
pub struct RootTool {
    /// Zero-based position in `tools[]`.
    pub index: usize,
    pub tool_id: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub tool_type: Option<String>,
    /// The full tool object, `{}` when the entry was not an object.
    pub config: Value,
}

/// One record of `workflow.nodes`.
#[derive(Debug, Clone)]
pub struct WorkflowNode {
    pub id: String,
    pub label: Option<String>,
    pub node_type: Option<String>,
    pub additional_prompt: Option<String>,
    pub additional_tool_ids: Vec<String>,
    /// Identifiers collected from the node's `tools[]` array.
    pub tool_refs: Vec<String>,
    /// Node-level `conversation_config.agent.prompt.llm` override.
    pub llm: Option<String>,
    pub prompt_config: Value,
}

/// One record of `workflow.edges`.
#[derive(Debug, Clone)]
pub struct WorkflowEdge {
    pub id: String,
    pub source: Option<String>,
    pub target: Option<String>,
    pub forward: Condition,
    pub backward: Condition,
}

const PROMPT_PATH: [&str; 3] = ["conversation_config", "agent", "prompt"];

impl AgentDefinition {
    pub fn from_value(payload: &Value) -> Self {
        let conversation_config = field(payload, "conversation_config");
        let agent = field(conversation_config, "agent");
        let workflow = field(payload, "workflow");

        Self {
            root: RootAgent {
                prompt: RootPrompt::from_value(field(agent, "prompt")),
                first_message: text(field(agent, "first_message")),
                language: text(field(agent, "language")),
                disable_first_message_interruptions: field(
                    agent,
                    "disable_first_message_interruptions",
                )
                .clone(),
                tts: field(conversation_config, "tts").clone(),
                turn: field(conversation_config, "turn").clone(),
            },
            nodes: entries(field(workflow, "nodes"))
                .map(|(id, node)| WorkflowNode::from_value(id, node))
                .collect(),
            edges: entries(field(workflow, "edges"))
                .map(|(id, edge)| WorkflowEdge::from_value(id, edge))
                .collect(),
        }
    }
}

impl From<&Value> for AgentDefinition {
    fn from(payload: &Value) -> Self {
        Self::from_value(payload)
    }
}

impl RootPrompt {
    fn from_value(prompt: &Value) -> Self {
        Self {
            prompt: text(field(prompt, "prompt")),
            llm: text(field(prompt, "llm")),
            reasoning_effort: field(prompt, "reasoning_effort").clone(),
            thinking_budget: field(prompt, "thinking_budget").clone(),
            temperature: field(prompt, "temperature").clone(),
            max_tokens: field(prompt, "max_tokens").clone(),
            backup_llm_config: field(prompt, "backup_llm_config").clone(),
            cascade_timeout_seconds: field(prompt, "cascade_timeout_seconds").clone(),
            tool_ids: text_list(field(prompt, "tool_ids")),
            tools: items(field(prompt, "tools"))
                .enumerate()
                .map(|(index, tool)| RootTool {
                    index,
                    tool_id: text(field(tool, "tool_id")),
                    id: text(field(tool, "id")),
                    name: text(field(tool, "name")),
                    tool_type: text(field(tool, "type")),
                    config: record(tool),
                })
                .collect(),
            config: record(prompt),
        }
    }
}

impl WorkflowNode {
    fn from_value(id: &str, node: &Value) -> Self {
        let prompt_config = path(node, &PROMPT_PATH);
        Self {
            id: id.to_string(),
            label: text(field(node, "label")),
            node_type: text(field(node, "type")),
            additional_prompt: text(field(node, "additional_prompt")),
            additional_tool_ids: text_list(field(node, "additional_tool_ids")),
            tool_refs: tool_references(field(node, "tools")),
            llm: text(field(prompt_config, "llm")),
            prompt_config: record(prompt_config),
        }
    }
}

impl WorkflowEdge {
    fn from_value(id: &str, edge: &Value) -> Self {
        Self {
            id: id.to_string(),
            source: text(field(edge, "source")),
            target: text(field(edge, "target")),
            forward: Condition::from_value(field(edge, "forward_condition")),
            backward: Condition::from_value(field(edge, "backward_condition")),
        }
    }
}

/// Collects tool identifiers from a node's `tools[]` array.
///
/// Entries may be bare strings or objects; for objects every present
/// `tool_id`, `id` and `name` is collected as a candidate identifier.
fn tool_references(tools: &Value) -> Vec<String> {
    items(tools)
        .flat_map(|entry| match entry {
            Value::String(_) => text(entry).into_iter().collect::<Vec<_>>(),
            Value::Object(_) => ["tool_id", "id", "name"]
                .iter()
                .filter_map(|key| text(field(entry, key)))
                .collect(),
            _ => Vec::new(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn node_tool_references_accept_strings_and_objects() {
        let refs = tool_references(&json!([
            "lookup",
            { "tool_id": "t1", "name": "Search" },
            { "id": "t2" },
            42,
            "  "
        ]));
        assert_eq!(refs, vec!["lookup", "t1", "Search", "t2"]);
    }

    #[test]
    fn non_object_payload_narrows_to_defaults() {
        let definition = AgentDefinition::from_value(&json!([1, 2, 3]));
        assert!(definition.nodes.is_empty());
        assert!(definition.edges.is_empty());
        assert_eq!(definition.root.prompt.config, json!({}));
        assert!(definition.root.tts.is_null());
    }
}
