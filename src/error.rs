//! Error types
//!
//! One enum per layer: node sources fail to load, the tree rejects stale
//! handles, the search reports expansion and depth failures, and `ApiError`
//! wraps everything the CLI and configuration surface.

use crate::tree::NodeId;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to materialize a node's children from backing data
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Malformed {what}: {source}")]
    Decode {
        what: String,
        #[source]
        source: bincode::Error,
    },

    #[error("Failed to encode {what}: {source}")]
    Encode {
        what: String,
        #[source]
        source: bincode::Error,
    },

    #[error("Chunk [{x}, {z}] root tag is not a compound")]
    NotCompound { x: i32, z: i32 },

    #[error("Unsupported root {0}: expected a directory or a .region file")]
    UnsupportedRoot(PathBuf),
}

/// Node arena errors
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Stale node handle: {0}")]
    StaleNode(NodeId),

    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Search errors
///
/// `NotFound` is not an error; see [`crate::search::SearchOutcome`].
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Failed to expand {path}: {source}")]
    Expand {
        path: String,
        #[source]
        source: SourceError,
    },

    #[error("Traversal depth limit of {limit} exceeded below {path}")]
    DepthLimit { limit: usize, path: String },

    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Top-level error for configuration, logging and the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("Failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}
