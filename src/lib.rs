//! Heavylist: bounded-memory search for oversized tag lists
//!
//! Walks a lazily expanded forest of regions, chunks and tags, looking for the
//! first list tag with a given name and more entries than a threshold. Nodes
//! are materialized just before they are visited and released as soon as
//! their subtree is exhausted, so memory stays proportional to the active
//! path rather than the size of the world.

pub mod concurrency;
pub mod config;
pub mod error;
pub mod logging;
pub mod search;
pub mod source;
pub mod tooling;
pub mod tree;

pub use error::{ApiError, SearchError, SourceError, TreeError};
pub use search::{search, SearchOutcome, SearchQuery, Searcher};
pub use tree::{NodeId, NodeKind, NodeSeed, NodeTree};
