//! Lazily expanded node tree
//!
//! Nodes live in a slot arena and are addressed by generational [`NodeId`]
//! handles. A node's children exist only while it is expanded: `expand`
//! asks the node's source for child seeds, `collapse` frees the whole
//! subtree below the node. Collapse is the only way memory is released.

pub mod hasher;
pub mod node;

pub use hasher::{fingerprint, Fingerprint};
pub use node::{Node, NodeId, NodeKind, NodeSeed, TagType};

use crate::error::TreeError;

#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena of lazily expanded nodes
#[derive(Debug, Default)]
pub struct NodeTree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl NodeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parentless node; the caller owns it
    pub fn insert_root(&mut self, seed: NodeSeed) -> NodeId {
        self.allocate(Node::from_seed(seed, None))
    }

    /// Number of nodes currently materialized
    pub fn live_count(&self) -> usize {
        self.live
    }

    pub fn get(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
            .ok_or(TreeError::StaleNode(id))
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, TreeError> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or(TreeError::StaleNode(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_ok()
    }

    pub fn kind(&self, id: NodeId) -> Result<NodeKind, TreeError> {
        Ok(self.get(id)?.kind)
    }

    pub fn name(&self, id: NodeId) -> Result<Option<&str>, TreeError> {
        Ok(self.get(id)?.name())
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId], TreeError> {
        Ok(self.get(id)?.children())
    }

    /// Child at `position`, or `None` past the last child
    pub fn child_at(&self, id: NodeId, position: usize) -> Result<Option<NodeId>, TreeError> {
        Ok(self.get(id)?.children.get(position).copied())
    }

    pub fn is_expanded(&self, id: NodeId) -> Result<bool, TreeError> {
        Ok(self.get(id)?.expanded)
    }

    pub fn list_count(&self, id: NodeId) -> Result<Option<usize>, TreeError> {
        Ok(self.get(id)?.list_count())
    }

    /// Materialize a node's children from its source.
    ///
    /// Does nothing when the node is already expanded. A node without a source
    /// expands to zero children. On a source failure the node stays collapsed.
    pub fn expand(&mut self, id: NodeId) -> Result<(), TreeError> {
        let node = self.get(id)?;
        if node.expanded {
            return Ok(());
        }

        let seeds = match &node.source {
            Some(source) => source.clone().load()?,
            None => Vec::new(),
        };

        let children: Vec<NodeId> = seeds
            .into_iter()
            .map(|seed| self.allocate(Node::from_seed(seed, Some(id))))
            .collect();

        let node = self.get_mut(id)?;
        node.children = children;
        node.expanded = true;
        Ok(())
    }

    /// Release every descendant of `id` and mark it collapsed.
    ///
    /// Returns the number of nodes freed. Handles to freed nodes become stale.
    pub fn collapse(&mut self, id: NodeId) -> Result<usize, TreeError> {
        let node = self.get_mut(id)?;
        if !node.expanded {
            return Ok(0);
        }
        node.expanded = false;
        let mut pending = std::mem::take(&mut node.children);

        let mut freed = 0;
        while let Some(child) = pending.pop() {
            if let Some(node) = self.release(child) {
                pending.extend(node.children);
                freed += 1;
            }
        }
        Ok(freed)
    }

    /// Names from the root down to `id`.
    ///
    /// Unnamed nodes (list entries) are rendered as `[position]`.
    pub fn path_of(&self, id: NodeId) -> Result<Vec<String>, TreeError> {
        let mut segments = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.get(current)?;
            let segment = match node.name() {
                Some(name) => name.to_string(),
                None => {
                    let position = match node.parent {
                        Some(parent) => self
                            .children(parent)?
                            .iter()
                            .position(|child| *child == current)
                            .unwrap_or_default(),
                        None => 0,
                    };
                    format!("[{}]", position)
                }
            };
            segments.push(segment);
            cursor = node.parent;
        }
        segments.reverse();
        Ok(segments)
    }

    /// `path_of` joined with `/`
    pub fn display_path(&self, id: NodeId) -> String {
        match self.path_of(id) {
            Ok(segments) => segments.join("/"),
            Err(_) => format!("<stale {}>", id),
        }
    }

    fn allocate(&mut self, node: Node) -> NodeId {
        self.live += 1;
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index,
                    generation: 0,
                }
            }
        }
    }

    fn release(&mut self, id: NodeId) -> Option<Node> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        Some(node)
    }
}
