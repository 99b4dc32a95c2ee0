//! The output unit of a decomposition pass.

pub mod timestamp;

use crate::collation::locale_cmp;
use crate::payload::access::pretty;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The kind of configuration component a chunk describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    GlobalConfig,
    RootPrompt,
    NodePrompt,
    EdgeCondition,
    ToolSchema,
}

impl ComponentType {
    /// Order used when chunks are shown grouped by type.
    pub const DISPLAY_ORDER: [ComponentType; 5] = [
        ComponentType::RootPrompt,
        ComponentType::NodePrompt,
        ComponentType::EdgeCondition,
        ComponentType::ToolSchema,
        ComponentType::GlobalConfig,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::GlobalConfig => "global_config",
            ComponentType::RootPrompt => "root_prompt",
            ComponentType::NodePrompt => "node_prompt",
            ComponentType::EdgeCondition => "edge_condition",
            ComponentType::ToolSchema => "tool_schema",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed chunk payload. The variant doubles as the chunk's `component_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "component_type", content = "content", rename_all = "snake_case")]
pub enum ChunkContent {
    GlobalConfig(GlobalConfigContent),
    RootPrompt(RootPromptContent),
    NodePrompt(NodePromptContent),
    EdgeCondition(EdgeConditionContent),
    ToolSchema(ToolSchemaContent),
}

impl ChunkContent {
    pub fn component_type(&self) -> ComponentType {
        match self {
            ChunkContent::GlobalConfig(_) => ComponentType::GlobalConfig,
            ChunkContent::RootPrompt(_) => ComponentType::RootPrompt,
            ChunkContent::NodePrompt(_) => ComponentType::NodePrompt,
            ChunkContent::EdgeCondition(_) => ComponentType::EdgeCondition,
            ChunkContent::ToolSchema(_) => ComponentType::ToolSchema,
        }
    }

    /// The content alone as JSON, without the type tag.
    pub fn to_value(&self) -> Value {
        let encoded = match self {
            ChunkContent::GlobalConfig(c) => serde_json::to_value(c),
            ChunkContent::RootPrompt(c) => serde_json::to_value(c),
            ChunkContent::NodePrompt(c) => serde_json::to_value(c),
            ChunkContent::EdgeCondition(c) => serde_json::to_value(c),
            ChunkContent::ToolSchema(c) => serde_json::to_value(c),
        };
        // Content structs only hold strings, lists and JSON values.
        encoded.unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfigContent {
    pub llm_selection: LlmSelection,
    pub tts_settings: Value,
    pub turn_config: Value,
    pub conversation_initiation_settings: ConversationInitiation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmSelection {
    pub llm: Option<String>,
    pub reasoning_effort: Value,
    pub thinking_budget: Value,
    pub temperature: Value,
    pub max_tokens: Value,
    pub backup_llm_config: Value,
    pub cascade_timeout_seconds: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationInitiation {
    pub first_message: String,
    pub disable_first_message_interruptions: Value,
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootPromptContent {
    pub prompt: String,
    pub llm: Option<String>,
    pub full_prompt_config: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePromptContent {
    pub node_name: String,
    pub node_id: String,
    pub node_type: String,
    pub additional_prompt: String,
    /// Node-level LLM override, falling back to the root agent's LLM.
    pub llm_assignment: Option<String>,
    pub tool_list: Vec<String>,
    pub node_prompt_config: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeConditionContent {
    pub edge_id: String,
    pub source_node_name: String,
    pub source_node_id: String,
    pub target_node_name: String,
    pub target_node_id: String,
    pub forward_condition: String,
    pub backward_condition: String,
    pub forward_condition_raw: Value,
    pub backward_condition_raw: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchemaContent {
    pub tool_name: String,
    pub tool_type: String,
    pub registered_on_nodes: Vec<String>,
    pub full_tool_config: Value,
}

/// One inspectable piece of an agent configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigChunk {
    #[serde(flatten)]
    pub content: ChunkContent,
    pub component_id: String,
    pub raw_id: String,
    #[serde(with = "timestamp")]
    pub snapshot_at: DateTime<Utc>,
}

impl ConfigChunk {
    pub fn new(
        component_id: impl Into<String>,
        raw_id: impl Into<String>,
        content: ChunkContent,
        snapshot_at: DateTime<Utc>,
    ) -> Self {
        Self {
            content,
            component_id: component_id.into(),
            raw_id: raw_id.into(),
            snapshot_at,
        }
    }

    pub fn component_type(&self) -> ComponentType {
        self.content.component_type()
    }

    /// Converts to the string-content form older inspector clients expect.
    pub fn to_legacy(&self) -> LegacyChunk {
        LegacyChunk {
            component_type: self.component_type(),
            component_id: self.component_id.clone(),
            content: pretty(&self.content.to_value()),
            raw_id: self.raw_id.clone(),
            snapshot_at: timestamp::format(&self.snapshot_at),
        }
    }
}

/// A chunk whose content is pre-rendered JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyChunk {
    pub component_type: ComponentType,
    pub component_id: String,
    pub content: String,
    pub raw_id: String,
    pub snapshot_at: String,
}

/// Chunks grouped by component type, each group sorted by `component_id`.
#[derive(Debug, Clone, Default)]
pub struct ChunkGroups<'a> {
    groups: Vec<(ComponentType, Vec<&'a ConfigChunk>)>,
}

impl<'a> ChunkGroups<'a> {
    pub fn new(chunks: &'a [ConfigChunk]) -> Self {
        let groups = ComponentType::DISPLAY_ORDER
            .iter()
            .map(|&component_type| {
                let mut members: Vec<&ConfigChunk> = chunks
                    .iter()
                    .filter(|chunk| chunk.component_type() == component_type)
                    .collect();
                members.sort_by(|left, right| locale_cmp(&left.component_id, &right.component_id));
                (component_type, members)
            })
            .collect();
        Self { groups }
    }

    pub fn get(&self, component_type: ComponentType) -> &[&'a ConfigChunk] {
        self.groups
            .iter()
            .find(|(kind, _)| *kind == component_type)
            .map(|(_, members)| members.as_slice())
            .unwrap_or(&[])
    }

    /// Groups in display order, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentType, &[&'a ConfigChunk])> {
        self.groups
            .iter()
            .map(|(kind, members)| (*kind, members.as_slice()))
    }
}
