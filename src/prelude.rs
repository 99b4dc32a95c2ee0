//! Prelude module for convenient imports
//!
//! Re-exports the types most callers need to decompose a payload, inspect its
//! chunks and walk the transfer graph.
//!
//! # Example
//!
//! ```rust,no_run
//! use convai_snapshot::prelude::*;
//!
//! # fn run_example() -> Result<(), Box<dyn std::error::Error>> {
//! let payload = read_payload_file(Path::new("agent.json"))?;
//! let chunks = decompose(&payload, Utc::now());
//!
//! for chunk in &chunks {
//!     println!("[{}] {}", chunk.component_type(), chunk.component_id);
//! }
//! print!("{}", TransferMapFormatter::format(&TransferMap::build(&chunks)));
//! # Ok(())
//! # }
//! ```

// Decomposition
pub use crate::decomposer::{Decomposer, DecomposerBuilder, decompose};
pub use crate::payload::{AgentDefinition, Condition};

// Chunks
pub use crate::chunk::{ChunkContent, ChunkGroups, ComponentType, ConfigChunk, LegacyChunk};

// Transfer graph
pub use crate::transfer::{
    TransferEdge, TransferIndex, TransferMap, TransferMapFormatter, TransferNode, TransferRow,
    build_transfer_map,
};

// Snapshots and sources
pub use crate::cache::{Snapshot, SnapshotCache, SnapshotOrigin, SnapshotResult};
pub use crate::settings::ProviderSettings;
pub use crate::source::{ConfigSource, FileSource, StaticSource, read_payload_file};

// Error types
pub use crate::error::{SettingsError, SnapshotError, SourceError};

// Commonly used alongside this crate
pub use chrono::{DateTime, Utc};
pub use std::path::Path;
