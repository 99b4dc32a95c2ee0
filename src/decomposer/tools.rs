use super::TRACING_TARGET;
use crate::chunk::{ChunkContent, ConfigChunk, ToolSchemaContent};
use crate::collation::{locale_cmp, unique_sorted};
use crate::payload::access::{key_count, normalize_key};
use crate::payload::{RootPrompt, RootTool};
use ahash::{AHashMap, AHashSet};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};

const UNKNOWN_TOOL_TYPE: &str = "unknown";

/// Which node names reference which tool identifiers, keyed case-insensitively.
#[derive(Debug, Default)]
pub(super) struct ToolRegistrations {
    /// Normalized keys in first-seen order.
    order: Vec<String>,
    /// First spelling seen for each normalized key.
    display: AHashMap<String, String>,
    nodes: AHashMap<String, AHashSet<String>>,
}

impl ToolRegistrations {
    pub(super) fn register(&mut self, tool_ids: &[String], node_name: &str) {
        for tool_id in tool_ids {
            let trimmed = tool_id.trim();
            if trimmed.is_empty() {
                continue;
            }
            let key = normalize_key(trimmed);
            if !self.display.contains_key(&key) {
                self.display.insert(key.clone(), trimmed.to_string());
                self.order.push(key.clone());
            }
            self.nodes
                .entry(key)
                .or_default()
                .insert(node_name.to_string());
        }
    }

    /// Node names registered under any of the given lookup keys.
    fn nodes_for(&self, lookup_keys: &[String]) -> Vec<String> {
        unique_sorted(
            lookup_keys
                .iter()
                .filter_map(|key| self.nodes.get(&normalize_key(key)))
                .flatten()
                .cloned(),
        )
    }

    /// Registered identifiers in first-seen order, with their display spelling.
    fn identifiers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order.iter().map(|key| {
            let display = self.display.get(key).map_or(key.as_str(), String::as_str);
            (key.as_str(), display)
        })
    }
}

#[derive(Debug, Clone)]
struct ToolEntry {
    raw_id: String,
    name: String,
    tool_type: String,
    config: Value,
    lookup_keys: Vec<String>,
}

impl ToolEntry {
    fn from_root_tool(tool: &RootTool) -> Self {
        let raw_id = tool
            .tool_id
            .clone()
            .or_else(|| tool.id.clone())
            .or_else(|| tool.name.clone())
            .unwrap_or_else(|| format!("tool_{}", tool.index + 1));
        let name = tool.name.clone().unwrap_or_else(|| raw_id.clone());
        let lookup_keys = unique_sorted(
            [
                Some(raw_id.clone()),
                Some(name.clone()),
                tool.tool_id.clone(),
                tool.id.clone(),
            ]
            .into_iter()
            .flatten(),
        );

        Self {
            raw_id,
            name,
            tool_type: tool
                .tool_type
                .clone()
                .unwrap_or_else(|| UNKNOWN_TOOL_TYPE.to_string()),
            config: tool.config.clone(),
            lookup_keys,
        }
    }

    fn unresolved(identifier: &str, config: Value) -> Self {
        Self {
            raw_id: identifier.to_string(),
            name: identifier.to_string(),
            tool_type: UNKNOWN_TOOL_TYPE.to_string(),
            config,
            lookup_keys: vec![identifier.to_string()],
        }
    }
}

/// Compatibility heuristic: a config object with more than one key counts as
/// the full definition of a tool.
fn is_rich(config: &Value) -> bool {
    key_count(config).is_some_and(|count| count > 1)
}

/// Tool entries merged by normalized id, in insertion order.
#[derive(Debug, Default)]
struct ToolCatalog {
    entries: Vec<ToolEntry>,
    by_key: AHashMap<String, usize>,
}

impl ToolCatalog {
    fn add(&mut self, entry: ToolEntry) {
        let key = normalize_key(&entry.raw_id);
        let Some(&index) = self.by_key.get(&key) else {
            self.by_key.insert(key, self.entries.len());
            self.entries.push(entry);
            return;
        };

        let existing = &mut self.entries[index];
        let promote = is_rich(&entry.config) && !is_rich(&existing.config);
        let lookup_keys = unique_sorted(
            existing
                .lookup_keys
                .drain(..)
                .chain(entry.lookup_keys.iter().cloned()),
        );
        if promote {
            tracing::debug!(
                target: TRACING_TARGET,
                tool = %entry.raw_id,
                "Replacing tool entry with a richer config"
            );
            *existing = entry;
        }
        existing.lookup_keys = lookup_keys;
    }

    /// Every normalized lookup key known to the catalog.
    fn known_keys(&self) -> AHashSet<String> {
        self.entries
            .iter()
            .flat_map(|entry| entry.lookup_keys.iter().map(|key| normalize_key(key)))
            .collect()
    }
}

/// Builds one chunk per distinct tool.
///
/// Sources, in precedence order: root `tools[]` objects, then root
/// `tool_ids[]` and node-registered identifiers that match none of the former.
pub(super) fn tool_schema_chunks(
    prompt: &RootPrompt,
    registrations: &ToolRegistrations,
    snapshot_at: DateTime<Utc>,
) -> Vec<ConfigChunk> {
    let mut catalog = ToolCatalog::default();

    for tool in &prompt.tools {
        catalog.add(ToolEntry::from_root_tool(tool));
    }

    // A bare id naming a tool already in the catalog under any of its
    // identifiers adds nothing; the root registration resolves through it.
    let mut known = catalog.known_keys();
    for tool_id in &prompt.tool_ids {
        let key = normalize_key(tool_id);
        if known.contains(&key) {
            continue;
        }
        catalog.add(ToolEntry::unresolved(
            tool_id,
            json!({ "tool_id": tool_id, "unresolved": true }),
        ));
        known.insert(key);
    }

    for (key, display) in registrations.identifiers() {
        if known.contains(key) {
            continue;
        }
        catalog.add(ToolEntry::unresolved(
            display,
            json!({ "tool_reference": display, "unresolved": true }),
        ));
    }

    let mut chunks: Vec<ConfigChunk> = catalog
        .entries
        .into_iter()
        .map(|entry| {
            let content = ToolSchemaContent {
                registered_on_nodes: registrations.nodes_for(&entry.lookup_keys),
                tool_name: entry.name.clone(),
                tool_type: entry.tool_type,
                full_tool_config: entry.config,
            };
            ConfigChunk::new(
                entry.name,
                entry.raw_id,
                ChunkContent::ToolSchema(content),
                snapshot_at,
            )
        })
        .collect();

    chunks.sort_by(|left, right| locale_cmp(&left.component_id, &right.component_id));
    chunks
}
