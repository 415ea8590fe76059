//! Node Sources
//!
//! The collaborator side of the tree: a [`NodeSource`] knows how to turn a
//! node's backing data into child seeds. The search never decodes bytes
//! itself; it only calls `expand`, which calls `load`.

pub mod directory;
pub mod region;
pub mod tag;

use crate::error::SourceError;
use crate::tree::NodeSeed;
use std::fmt;

/// Backing data for one node's children
///
/// `load` must be deterministic: repeated calls yield the same seeds in the
/// same order, so document order survives a collapse and re-expand.
pub trait NodeSource: Send + Sync + fmt::Debug {
    fn load(&self) -> Result<Vec<NodeSeed>, SourceError>;
}

/// Fixed list of seeds, for trees assembled in code
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    seeds: Vec<NodeSeed>,
}

impl StaticSource {
    pub fn new(seeds: Vec<NodeSeed>) -> Self {
        Self { seeds }
    }
}

impl NodeSource for StaticSource {
    fn load(&self) -> Result<Vec<NodeSeed>, SourceError> {
        Ok(self.seeds.clone())
    }
}
