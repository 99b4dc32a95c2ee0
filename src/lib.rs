//! # convai-snapshot - Agent Configuration Snapshot Decomposer
//!
//! **convai-snapshot** takes the deeply nested JSON configuration of a
//! conversational voice agent (root prompt, workflow nodes, transition edges,
//! tool bindings, global settings) and decomposes it into a flat, ordered list
//! of typed, cross-referenced [`ConfigChunk`](chunk::ConfigChunk)s. From those
//! chunks it derives a node/edge transfer graph for navigation.
//!
//! ## Core Workflow
//!
//! 1.  **Obtain a payload**: any `serde_json::Value`, usually fetched through a
//!     [`ConfigSource`](source::ConfigSource).
//! 2.  **Decompose**: [`Decomposer::decompose`](decomposer::Decomposer::decompose)
//!     narrows the payload into typed records and emits chunks. It never fails:
//!     missing or wrong-typed fields degrade to defaults.
//! 3.  **Navigate**: [`TransferMap::build`](transfer::TransferMap::build) derives
//!     the transfer graph; [`TransferMap::index`](transfer::TransferMap::index)
//!     prepares it for repeated neighbourhood queries.
//! 4.  **Cache** (optional): [`SnapshotCache`](cache::SnapshotCache) keeps the
//!     latest snapshot per agent.
//!
//! ## Quick Start
//!
//! ```rust
//! use convai_snapshot::prelude::*;
//! use serde_json::json;
//!
//! let payload = json!({
//!     "conversation_config": {
//!         "agent": { "prompt": { "prompt": "You are helpful.", "llm": "gemini-2.0-flash" } }
//!     },
//!     "workflow": {
//!         "nodes": {
//!             "n1": { "label": "Greeting", "type": "override_agent" },
//!             "n2": { "label": "Billing" }
//!         },
//!         "edges": {
//!             "e1": {
//!                 "source": "n1",
//!                 "target": "n2",
//!                 "forward_condition": { "type": "llm", "condition": "asks about invoices" }
//!             }
//!         }
//!     }
//! });
//!
//! let chunks = Decomposer::builder().build().decompose(&payload, Utc::now());
//! assert_eq!(chunks[0].component_type(), ComponentType::GlobalConfig);
//! assert_eq!(chunks[1].component_type(), ComponentType::RootPrompt);
//!
//! let map = TransferMap::build(&chunks);
//! let index = map.index();
//! let targets: Vec<_> = index.outgoing("Greeting").map(|edge| edge.target.as_str()).collect();
//! assert_eq!(targets, vec!["Billing"]);
//! ```

pub mod cache;
pub mod chunk;
pub mod collation;
pub mod decomposer;
pub mod error;
pub mod payload;
pub mod prelude;
pub mod settings;
pub mod source;
pub mod transfer;
