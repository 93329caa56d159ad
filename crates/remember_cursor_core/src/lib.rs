#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Codec between ephemeral state and frontmatter fields
pub mod codec;

/// Manual save/restore commands
pub mod commands;

/// Configuration options
pub mod config;

/// Error (common error types)
pub mod error;

/// Frontmatter parsing and serialization
pub mod frontmatter;

/// Filesystem abstraction
pub mod fs;

/// Open-event deduplication
pub mod gate;

/// Host editor boundary
pub mod host;

/// Frontmatter-backed metadata store
pub mod metadata;

/// Restore state machine
pub mod orchestrator;

/// Top-level registration point
pub mod plugin;

/// Ephemeral state types
pub mod state;

#[cfg(test)]
pub mod test_utils;

pub use codec::{decode, encode};
pub use commands::CommandId;
pub use config::Config;
pub use error::{CursorError, Result};
pub use host::{Host, HostEvent, PaneHandle};
pub use metadata::{DocumentMetadata, FsMetadataStore, MetadataStore};
pub use orchestrator::{RestoreOrchestrator, RestoreOutcome};
pub use plugin::{CursorMemory, EventOutcome};
pub use state::{CursorRange, EphemeralState, Position};
