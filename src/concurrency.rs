//! Single-writer access to a shared tree
//!
//! Searches mutate expansion state, so two searches must never walk the same
//! tree at once. Within one thread `&mut NodeTree` already guarantees that;
//! [`SharedTree`] extends it across threads by holding a lock for the whole
//! duration of each search.

use crate::error::SearchError;
use crate::search::{SearchQuery, SearchReport, Searcher};
use crate::tree::{NodeId, NodeSeed, NodeTree};
use parking_lot::Mutex;
use std::sync::Arc;

/// A node tree behind a per-tree lock
#[derive(Clone, Default)]
pub struct SharedTree {
    inner: Arc<Mutex<NodeTree>>,
}

impl SharedTree {
    pub fn new(tree: NodeTree) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tree)),
        }
    }

    pub fn insert_root(&self, seed: NodeSeed) -> NodeId {
        self.inner.lock().insert_root(seed)
    }

    /// Run one search with exclusive access to the tree
    pub fn search(
        &self,
        searcher: &Searcher,
        root: NodeId,
        query: &SearchQuery,
    ) -> Result<SearchReport, SearchError> {
        let mut tree = self.inner.lock();
        searcher.search(&mut tree, root, query)
    }

    /// Run `f` with exclusive access to the tree
    pub fn with<R>(&self, f: impl FnOnce(&mut NodeTree) -> R) -> R {
        let mut tree = self.inner.lock();
        f(&mut tree)
    }
}
