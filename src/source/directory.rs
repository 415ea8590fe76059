//! Filesystem directories
//!
//! A directory expands one level at a time: sub-directories become
//! containers, `.region` files become regions, anything else is ignored.
//! Entries are sorted by file name so document order is stable.

use super::region::region_seed;
use super::NodeSource;
use crate::error::SourceError;
use crate::tree::NodeSeed;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

/// File extension recognized as a region snapshot
pub const REGION_EXTENSION: &str = "region";

/// Lists a directory on expand
#[derive(Debug, Clone)]
pub struct DirectorySource {
    path: PathBuf,
}

impl DirectorySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl NodeSource for DirectorySource {
    fn load(&self) -> Result<Vec<NodeSeed>, SourceError> {
        let mut seeds = Vec::new();
        for entry in WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            if entry.file_type().is_dir() {
                seeds.push(directory_seed(entry.path()));
            } else if is_region_file(entry.path()) {
                seeds.push(region_seed(entry.path()));
            }
        }
        Ok(seeds)
    }
}

pub fn is_region_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == REGION_EXTENSION)
        .unwrap_or(false)
}

/// Seed for a directory, named after its last component
pub fn directory_seed(path: &Path) -> NodeSeed {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    NodeSeed::container(name, Arc::new(DirectorySource::new(path)))
}

/// Seed for a search root: a directory or a single region file
pub fn root_seed(path: &Path) -> Result<NodeSeed, SourceError> {
    let path = dunce::canonicalize(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if path.is_dir() {
        Ok(directory_seed(&path))
    } else if is_region_file(&path) {
        Ok(region_seed(&path))
    } else {
        Err(SourceError::UnsupportedRoot(path))
    }
}
