//! Iterative search engine
//!
//! Depth-first, pre-order walk of each chunk's tag tree using an explicit,
//! growable frame stack, so native stack usage stays flat however deep the
//! tags nest.

use super::gather::gather_with;
use super::scope::ExpansionScope;
use super::{
    ExpandFailurePolicy, NameMatch, SearchOptions, SearchOutcome, SearchQuery, SearchReport,
    SearchStats,
};
use crate::error::{SearchError, TreeError};
use crate::tree::{Fingerprint, Node, NodeId, NodeKind, NodeTree};
use std::time::Instant;
use tracing::{debug, info, trace, warn};

/// Search with default options
pub fn search(
    tree: &mut NodeTree,
    root: NodeId,
    query: &SearchQuery,
) -> Result<SearchOutcome, SearchError> {
    Searcher::default()
        .search(tree, root, query)
        .map(|report| report.outcome)
}

/// Position within one node's children
#[derive(Debug, Clone, Copy)]
struct Frame {
    parent: NodeId,
    next: usize,
}

impl Frame {
    fn new(parent: NodeId) -> Self {
        Self { parent, next: 0 }
    }
}

/// Heavy list search with configurable options
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    options: SearchOptions,
}

impl Searcher {
    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Find the first qualifying list under `root`.
    ///
    /// Order is region gather order, then chunk order, then pre-order among
    /// each chunk's descendants. On `Found`, every node on the path from the
    /// root to the match is left expanded; on `NotFound` or an error every
    /// region and chunk the search touched is collapsed again.
    pub fn search(
        &self,
        tree: &mut NodeTree,
        root: NodeId,
        query: &SearchQuery,
    ) -> Result<SearchReport, SearchError> {
        let start_time = Instant::now();
        let target = Fingerprint::of(&query.name);

        let (regions, skipped) = gather_with(tree, root, self.options.on_expand_error)?;
        let mut stats = SearchStats {
            regions: regions.len(),
            skipped,
            peak_live_nodes: tree.live_count(),
            ..SearchStats::default()
        };
        debug!(
            regions = regions.len(),
            target = %query.name,
            threshold = query.count_threshold,
            "Starting heavy list search"
        );

        let mut scope = ExpansionScope::new(tree);
        for region in regions {
            if !self.open(&mut scope, region, &mut stats)? {
                continue;
            }
            debug!(region = %scope.display_path(region), "Searching region");

            let chunks = scope.children(region)?.to_vec();
            for chunk in chunks {
                stats.chunks += 1;
                if !self.open(&mut scope, chunk, &mut stats)? {
                    continue;
                }
                trace!(chunk = %scope.display_path(chunk), "Searching chunk");

                if let Some(found) = self.search_chunk(&mut scope, chunk, query, target, &mut stats)? {
                    let count = scope.list_count(found)?.unwrap_or_default();
                    info!(path = %scope.display_path(found), count, "Heavy list found");
                    scope.retain_match_path();
                    return Ok(SearchReport {
                        outcome: SearchOutcome::Found(found),
                        stats,
                        duration_ms: start_time.elapsed().as_millis() as u64,
                    });
                }
                scope.release(chunk)?;
            }
            scope.release(region)?;
        }

        info!(
            regions = stats.regions,
            chunks = stats.chunks,
            nodes = stats.nodes_visited,
            "Heavy list not found"
        );
        Ok(SearchReport {
            outcome: SearchOutcome::NotFound,
            stats,
            duration_ms: start_time.elapsed().as_millis() as u64,
        })
    }

    /// Walk one expanded chunk. The chunk itself is released by the caller.
    fn search_chunk(
        &self,
        scope: &mut ExpansionScope<'_>,
        chunk: NodeId,
        query: &SearchQuery,
        target: Fingerprint,
        stats: &mut SearchStats,
    ) -> Result<Option<NodeId>, SearchError> {
        let mut frames = vec![Frame::new(chunk)];

        while let Some(top) = frames.last_mut() {
            let parent = top.parent;
            let Some(current) = scope.child_at(parent, top.next)? else {
                // Subtree exhausted without a match.
                frames.pop();
                if parent != chunk {
                    scope.release(parent)?;
                }
                continue;
            };
            top.next += 1;
            stats.nodes_visited += 1;

            if !self.open(scope, current, stats)? {
                continue;
            }

            if self.is_match(scope.get(current)?, query, target) {
                return Ok(Some(current));
            }

            if scope.children(current)?.is_empty() {
                scope.release(current)?;
            } else {
                if let Some(limit) = self.options.max_depth {
                    if frames.len() >= limit {
                        return Err(SearchError::DepthLimit {
                            limit,
                            path: scope.display_path(current),
                        });
                    }
                }
                frames.push(Frame::new(current));
                stats.max_depth_reached = stats.max_depth_reached.max(frames.len());
            }
        }
        Ok(None)
    }

    /// Expand `id` under the scope. `Ok(false)` means the node was skipped.
    fn open(
        &self,
        scope: &mut ExpansionScope<'_>,
        id: NodeId,
        stats: &mut SearchStats,
    ) -> Result<bool, SearchError> {
        match scope.acquire(id) {
            Ok(()) => {
                stats.peak_live_nodes = stats.peak_live_nodes.max(scope.live_count());
                Ok(true)
            }
            Err(TreeError::Source(source)) => {
                let path = scope.display_path(id);
                match self.options.on_expand_error {
                    ExpandFailurePolicy::SkipSubtree => {
                        warn!(path = %path, error = %source, "Skipping unreadable subtree");
                        stats.skipped += 1;
                        Ok(false)
                    }
                    ExpandFailurePolicy::Abort => Err(SearchError::Expand { path, source }),
                }
            }
            Err(other) => Err(other.into()),
        }
    }

    fn is_match(&self, node: &Node, query: &SearchQuery, target: Fingerprint) -> bool {
        let NodeKind::TagList { count } = node.kind() else {
            return false;
        };
        if count <= query.count_threshold {
            return false;
        }
        let Some(name) = node.name() else {
            return false;
        };
        if Fingerprint::of(name) != target {
            return false;
        }
        match self.options.name_match {
            NameMatch::FingerprintOnly => true,
            NameMatch::Verified => name == query.name,
        }
    }
}
