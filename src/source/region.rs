//! Region snapshots
//!
//! A region file is a bincode-encoded [`RegionImage`]. Each chunk keeps its
//! tag tree as a separately encoded payload, so opening a region only costs
//! the chunk headers; a chunk's tags are decoded when the chunk is expanded.

use super::tag::{Tag, TagSource};
use super::NodeSource;
use crate::error::SourceError;
use crate::tree::NodeSeed;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::trace;

/// One persisted chunk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkImage {
    pub x: i32,
    pub z: i32,
    /// bincode-encoded root [`Tag`]; must decode to a compound
    pub payload: Vec<u8>,
}

impl ChunkImage {
    /// Encode a chunk; the root tag must be a compound
    pub fn encode(x: i32, z: i32, root: &Tag) -> Result<Self, SourceError> {
        if !root.is_compound() {
            return Err(SourceError::NotCompound { x, z });
        }
        let payload = bincode::serialize(root).map_err(|source| SourceError::Encode {
            what: format!("chunk [{}, {}]", x, z),
            source,
        })?;
        Ok(Self { x, z, payload })
    }

    pub fn name(&self) -> String {
        chunk_name(self.x, self.z)
    }
}

fn chunk_name(x: i32, z: i32) -> String {
    format!("Chunk [{}, {}]", x, z)
}

/// On-disk layout of a region file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegionImage {
    pub chunks: Vec<ChunkImage>,
}

impl RegionImage {
    pub fn new(chunks: Vec<ChunkImage>) -> Self {
        Self { chunks }
    }

    pub fn decode(bytes: &[u8], what: &Path) -> Result<Self, SourceError> {
        bincode::deserialize(bytes).map_err(|source| SourceError::Decode {
            what: format!("region {}", what.display()),
            source,
        })
    }

    pub fn read_from(path: &Path) -> Result<Self, SourceError> {
        let bytes = std::fs::read(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::decode(&bytes, path)
    }

    pub fn write_to(&self, path: &Path) -> Result<(), SourceError> {
        let bytes = bincode::serialize(self).map_err(|source| SourceError::Encode {
            what: format!("region {}", path.display()),
            source,
        })?;
        std::fs::write(path, bytes).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Seed for a region file, named after the file
pub fn region_seed(path: &Path) -> NodeSeed {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    NodeSeed::region(name, Arc::new(RegionFileSource::new(path)))
}

/// Reads a region file on expand and yields its chunks
#[derive(Debug, Clone)]
pub struct RegionFileSource {
    path: PathBuf,
}

impl RegionFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl NodeSource for RegionFileSource {
    fn load(&self) -> Result<Vec<NodeSeed>, SourceError> {
        let image = RegionImage::read_from(&self.path)?;
        trace!(path = %self.path.display(), chunks = image.chunks.len(), "Region loaded");
        Ok(image
            .chunks
            .into_iter()
            .map(|chunk| {
                let name = chunk.name();
                NodeSeed::chunk(
                    name,
                    Arc::new(ChunkSource {
                        x: chunk.x,
                        z: chunk.z,
                        payload: chunk.payload.into(),
                    }),
                )
            })
            .collect())
    }
}

/// Decodes a chunk payload on expand and yields the root compound's entries
#[derive(Debug, Clone)]
pub struct ChunkSource {
    x: i32,
    z: i32,
    payload: Arc<[u8]>,
}

impl ChunkSource {
    pub fn from_image(chunk: &ChunkImage) -> Self {
        Self {
            x: chunk.x,
            z: chunk.z,
            payload: chunk.payload.as_slice().into(),
        }
    }
}

impl NodeSource for ChunkSource {
    fn load(&self) -> Result<Vec<NodeSeed>, SourceError> {
        let root: Tag = bincode::deserialize(&self.payload).map_err(|source| SourceError::Decode {
            what: format!("chunk [{}, {}]", self.x, self.z),
            source,
        })?;
        if !root.is_compound() {
            return Err(SourceError::NotCompound {
                x: self.x,
                z: self.z,
            });
        }
        TagSource::new(Arc::new(root)).load()
    }
}

/// In-memory region, for trees assembled in code
#[derive(Debug, Clone)]
pub struct RegionImageSource {
    image: Arc<RegionImage>,
}

impl RegionImageSource {
    pub fn new(image: RegionImage) -> Self {
        Self {
            image: Arc::new(image),
        }
    }
}

impl NodeSource for RegionImageSource {
    fn load(&self) -> Result<Vec<NodeSeed>, SourceError> {
        Ok(self
            .image
            .chunks
            .iter()
            .map(|chunk| NodeSeed::chunk(chunk.name(), Arc::new(ChunkSource::from_image(chunk))))
            .collect())
    }
}
