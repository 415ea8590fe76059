//! Node types and handles

use crate::source::NodeSource;
use std::fmt;
use std::sync::Arc;

/// Handle to a node in a [`NodeTree`](super::NodeTree).
///
/// The generation is bumped every time a slot is freed, so a handle that
/// outlives a collapse is detected instead of aliasing a newer node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// Tag types other than lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagType {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    ByteArray,
    String,
    Compound,
    IntArray,
    LongArray,
}

/// Node variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Directory-like container of containers and regions
    Container,
    /// Region file; children are chunks
    Region,
    /// Chunk; children are the root compound's entries
    Chunk,
    /// List tag with `count` entries
    TagList { count: usize },
    /// Any other tag
    Tag(TagType),
}

impl NodeKind {
    pub fn is_region(&self) -> bool {
        matches!(self, NodeKind::Region)
    }

    /// Entry count when this is a list tag
    pub fn list_count(&self) -> Option<usize> {
        match self {
            NodeKind::TagList { count } => Some(*count),
            _ => None,
        }
    }
}

/// Description of a node before it is placed in a tree
///
/// Sources hand these out from [`NodeSource::load`]; the tree turns each one
/// into a live node.
#[derive(Debug, Clone)]
pub struct NodeSeed {
    pub name: Option<String>,
    pub kind: NodeKind,
    /// Backing for this node's own children; `None` means a leaf
    pub source: Option<Arc<dyn NodeSource>>,
}

impl NodeSeed {
    pub fn new(
        name: Option<String>,
        kind: NodeKind,
        source: Option<Arc<dyn NodeSource>>,
    ) -> Self {
        Self { name, kind, source }
    }

    pub fn container(name: impl Into<String>, source: Arc<dyn NodeSource>) -> Self {
        Self::new(Some(name.into()), NodeKind::Container, Some(source))
    }

    pub fn region(name: impl Into<String>, source: Arc<dyn NodeSource>) -> Self {
        Self::new(Some(name.into()), NodeKind::Region, Some(source))
    }

    pub fn chunk(name: impl Into<String>, source: Arc<dyn NodeSource>) -> Self {
        Self::new(Some(name.into()), NodeKind::Chunk, Some(source))
    }

    pub fn leaf(name: Option<String>, tag_type: TagType) -> Self {
        Self::new(name, NodeKind::Tag(tag_type), None)
    }
}

/// Live node in the arena
#[derive(Debug)]
pub struct Node {
    pub(crate) name: Option<String>,
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) expanded: bool,
    pub(crate) source: Option<Arc<dyn NodeSource>>,
}

impl Node {
    pub(crate) fn from_seed(seed: NodeSeed, parent: Option<NodeId>) -> Self {
        Self {
            name: seed.name,
            kind: seed.kind,
            parent,
            children: Vec::new(),
            expanded: false,
            source: seed.source,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in document order; empty unless expanded
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn list_count(&self) -> Option<usize> {
        self.kind.list_count()
    }
}
