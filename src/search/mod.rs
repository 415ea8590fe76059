//! Heavy List Search
//!
//! Finds the first list tag, in document order, whose entry count exceeds a
//! threshold and whose name matches a target. Regions are gathered from the
//! root, then every chunk's tag tree is walked depth-first with an explicit
//! frame stack, expanding nodes just before they are visited and collapsing
//! subtrees as soon as they are fully explored.

pub mod engine;
pub mod gather;
pub mod scope;

pub use engine::{search, Searcher};
pub use gather::gather;
pub use scope::ExpansionScope;

use crate::tree::NodeId;
use serde::{Deserialize, Serialize};

/// Frame stack depth of the original fixed-size traversal.
///
/// The stack here grows on demand; set `max_depth` to this value to restore
/// the old bound as a hard error.
pub const LEGACY_FRAME_CAPACITY: usize = 256;

/// What to look for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// List name to match
    pub name: String,
    /// A list qualifies only with strictly more entries than this
    pub count_threshold: usize,
}

impl SearchQuery {
    pub fn new(name: impl Into<String>, count_threshold: usize) -> Self {
        Self {
            name: name.into(),
            count_threshold,
        }
    }
}

/// How a candidate's name is compared to the target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameMatch {
    /// Fingerprints equal; a collision is accepted as a match
    FingerprintOnly,
    /// Fingerprints equal, then the strings are compared
    #[default]
    Verified,
}

/// What happens when a node fails to expand mid-search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpandFailurePolicy {
    /// Stop the search and return the error; everything the search expanded
    /// is collapsed first
    #[default]
    Abort,
    /// Log a warning and continue with the failing node's next sibling
    SkipSubtree,
}

/// Search tuning
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub name_match: NameMatch,
    pub on_expand_error: ExpandFailurePolicy,
    /// Maximum frame stack depth below a chunk; `None` grows without bound
    pub max_depth: Option<usize>,
}

/// Result of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(NodeId),
    NotFound,
}

impl SearchOutcome {
    pub fn found(&self) -> Option<NodeId> {
        match self {
            SearchOutcome::Found(id) => Some(*id),
            SearchOutcome::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }
}

/// Counters collected while searching
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Regions returned by the gatherer
    pub regions: usize,
    /// Chunks entered
    pub chunks: usize,
    /// Tag nodes visited below chunks
    pub nodes_visited: usize,
    /// Subtrees skipped under [`ExpandFailurePolicy::SkipSubtree`]
    pub skipped: usize,
    /// Largest number of nodes materialized at once
    pub peak_live_nodes: usize,
    /// Deepest frame stack reached
    pub max_depth_reached: usize,
}

/// Outcome plus counters
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
    pub duration_ms: u64,
}
