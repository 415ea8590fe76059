//! Tag values
//!
//! An in-memory model of the typed tag tree stored in each chunk, and the
//! source that exposes a compound or list tag's entries as child nodes.

use super::NodeSource;
use crate::error::SourceError;
use crate::tree::{NodeKind, NodeSeed, TagType};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A typed tag value
///
/// Nested values sit behind `Arc` so a child source can share a subtree with
/// its parent instead of copying it on every expand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Tag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(Vec<Arc<Tag>>),
    Compound(Vec<(String, Arc<Tag>)>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Tag {
    /// Build a compound from `(name, value)` pairs, keeping their order
    pub fn compound<'a>(entries: impl IntoIterator<Item = (&'a str, Tag)>) -> Self {
        Tag::Compound(
            entries
                .into_iter()
                .map(|(name, value)| (name.to_string(), Arc::new(value)))
                .collect(),
        )
    }

    pub fn list(entries: impl IntoIterator<Item = Tag>) -> Self {
        Tag::List(entries.into_iter().map(Arc::new).collect())
    }

    pub fn node_kind(&self) -> NodeKind {
        match self {
            Tag::Byte(_) => NodeKind::Tag(TagType::Byte),
            Tag::Short(_) => NodeKind::Tag(TagType::Short),
            Tag::Int(_) => NodeKind::Tag(TagType::Int),
            Tag::Long(_) => NodeKind::Tag(TagType::Long),
            Tag::Float(_) => NodeKind::Tag(TagType::Float),
            Tag::Double(_) => NodeKind::Tag(TagType::Double),
            Tag::ByteArray(_) => NodeKind::Tag(TagType::ByteArray),
            Tag::String(_) => NodeKind::Tag(TagType::String),
            Tag::List(entries) => NodeKind::TagList {
                count: entries.len(),
            },
            Tag::Compound(_) => NodeKind::Tag(TagType::Compound),
            Tag::IntArray(_) => NodeKind::Tag(TagType::IntArray),
            Tag::LongArray(_) => NodeKind::Tag(TagType::LongArray),
        }
    }

    pub fn is_compound(&self) -> bool {
        matches!(self, Tag::Compound(_))
    }
}

/// Seed for a tag node; only lists and compounds get a child source
pub fn tag_seed(name: Option<String>, tag: Arc<Tag>) -> NodeSeed {
    let kind = tag.node_kind();
    let source: Option<Arc<dyn NodeSource>> = match tag.as_ref() {
        Tag::List(_) | Tag::Compound(_) => Some(Arc::new(TagSource::new(tag))),
        _ => None,
    };
    NodeSeed::new(name, kind, source)
}

/// Exposes the entries of a compound (named) or list (unnamed) tag
#[derive(Debug, Clone)]
pub struct TagSource {
    tag: Arc<Tag>,
}

impl TagSource {
    pub fn new(tag: Arc<Tag>) -> Self {
        Self { tag }
    }
}

impl NodeSource for TagSource {
    fn load(&self) -> Result<Vec<NodeSeed>, SourceError> {
        let seeds = match self.tag.as_ref() {
            Tag::Compound(entries) => entries
                .iter()
                .map(|(name, value)| tag_seed(Some(name.clone()), value.clone()))
                .collect(),
            Tag::List(entries) => entries
                .iter()
                .map(|value| tag_seed(None, value.clone()))
                .collect(),
            _ => Vec::new(),
        };
        Ok(seeds)
    }
}
