//! Scoped expansion
//!
//! Every node the search expands is held by an [`ExpansionScope`]. Nodes are
//! released as their subtrees are exhausted; whatever is still held when the
//! scope drops is collapsed, so an error or early return never leaves stray
//! expanded subtrees behind. The one exception is a match: see
//! [`ExpansionScope::retain_match_path`].

use crate::error::TreeError;
use crate::tree::{NodeId, NodeTree};
use std::ops::Deref;

/// Expansion guard over a borrowed tree
pub struct ExpansionScope<'t> {
    tree: &'t mut NodeTree,
    held: Vec<NodeId>,
}

impl<'t> ExpansionScope<'t> {
    pub fn new(tree: &'t mut NodeTree) -> Self {
        Self {
            tree,
            held: Vec::new(),
        }
    }

    /// Expand `id` (if needed) and hold it until released
    pub fn acquire(&mut self, id: NodeId) -> Result<(), TreeError> {
        self.tree.expand(id)?;
        self.held.push(id);
        Ok(())
    }

    /// Collapse `id` and stop holding it
    pub fn release(&mut self, id: NodeId) -> Result<(), TreeError> {
        if self.held.last() == Some(&id) {
            self.held.pop();
        } else if let Some(position) = self.held.iter().rposition(|held| *held == id) {
            self.held.remove(position);
        }
        self.tree.collapse(id)?;
        Ok(())
    }

    /// Number of nodes currently held
    pub fn held(&self) -> usize {
        self.held.len()
    }

    /// Keep everything still held expanded.
    ///
    /// Called when a match is found: the path from the root to the match
    /// stays materialized so the caller can inspect or display it. Regions
    /// and chunks after the match were never expanded. Callers repeating
    /// searches on the same tree should collapse the path themselves.
    pub fn retain_match_path(mut self) {
        self.held.clear();
    }
}

impl Deref for ExpansionScope<'_> {
    type Target = NodeTree;

    fn deref(&self) -> &NodeTree {
        &*self.tree
    }
}

impl Drop for ExpansionScope<'_> {
    fn drop(&mut self) {
        // Deepest first; a stale handle means an ancestor already freed it.
        while let Some(id) = self.held.pop() {
            let _ = self.tree.collapse(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::tag::{Tag, TagSource};
    use crate::tree::NodeSeed;
    use std::sync::Arc;

    fn tree_with_chunk() -> (NodeTree, NodeId) {
        let mut tree = NodeTree::new();
        let root = Tag::compound([("Level", Tag::compound([("xPos", Tag::Int(0))]))]);
        let chunk = tree.insert_root(NodeSeed::chunk(
            "Chunk [0, 0]",
            Arc::new(TagSource::new(Arc::new(root))),
        ));
        (tree, chunk)
    }

    #[test]
    fn test_drop_collapses_held_nodes() {
        let (mut tree, chunk) = tree_with_chunk();
        {
            let mut scope = ExpansionScope::new(&mut tree);
            scope.acquire(chunk).unwrap();
            let level = scope.children(chunk).unwrap()[0];
            scope.acquire(level).unwrap();
            assert_eq!(scope.held(), 2);
            assert_eq!(scope.live_count(), 3);
        }
        assert!(!tree.is_expanded(chunk).unwrap());
        assert_eq!(tree.live_count(), 1);
    }

    #[test]
    fn test_release_collapses_immediately() {
        let (mut tree, chunk) = tree_with_chunk();
        let mut scope = ExpansionScope::new(&mut tree);
        scope.acquire(chunk).unwrap();
        scope.release(chunk).unwrap();
        assert_eq!(scope.held(), 0);
        assert!(!scope.is_expanded(chunk).unwrap());
    }

    #[test]
    fn test_retain_match_path_keeps_nodes_expanded() {
        let (mut tree, chunk) = tree_with_chunk();
        let level;
        {
            let mut scope = ExpansionScope::new(&mut tree);
            scope.acquire(chunk).unwrap();
            level = scope.children(chunk).unwrap()[0];
            scope.acquire(level).unwrap();
            scope.retain_match_path();
        }
        assert!(tree.is_expanded(chunk).unwrap());
        assert!(tree.is_expanded(level).unwrap());
    }
}
