//! Region gathering
//!
//! Flattens a directory or region root into the ordered list of regions to
//! search. Containers are expanded and left expanded; directory listings are
//! cheap next to tag data.

use super::ExpandFailurePolicy;
use crate::error::{SearchError, TreeError};
use crate::tree::{NodeId, NodeKind, NodeTree};
use tracing::warn;

/// Regions under `root`, in document order.
///
/// A region root yields itself; any root that is neither a container nor a
/// region yields nothing.
pub fn gather(tree: &mut NodeTree, root: NodeId) -> Result<Vec<NodeId>, SearchError> {
    gather_with(tree, root, ExpandFailurePolicy::Abort).map(|(regions, _)| regions)
}

/// Like [`gather`], returning the number of containers skipped as well
pub(crate) fn gather_with(
    tree: &mut NodeTree,
    root: NodeId,
    on_error: ExpandFailurePolicy,
) -> Result<(Vec<NodeId>, usize), SearchError> {
    let mut regions = Vec::new();
    let mut skipped = 0;
    gather_into(tree, root, on_error, &mut regions, &mut skipped)?;
    Ok((regions, skipped))
}

fn gather_into(
    tree: &mut NodeTree,
    node: NodeId,
    on_error: ExpandFailurePolicy,
    regions: &mut Vec<NodeId>,
    skipped: &mut usize,
) -> Result<(), SearchError> {
    match tree.kind(node)? {
        NodeKind::Region => regions.push(node),
        NodeKind::Container => {
            if let Err(e) = tree.expand(node) {
                let source = match e {
                    TreeError::Source(source) => source,
                    other => return Err(other.into()),
                };
                let path = tree.display_path(node);
                if on_error == ExpandFailurePolicy::SkipSubtree {
                    warn!(path = %path, error = %source, "Skipping unreadable container");
                    *skipped += 1;
                    return Ok(());
                }
                return Err(SearchError::Expand { path, source });
            }

            let children = tree.children(node)?.to_vec();
            for child in children {
                if tree.kind(child)?.is_region() {
                    regions.push(child);
                } else {
                    gather_into(tree, child, on_error, regions, skipped)?;
                }
            }
        }
        _ => {}
    }
    Ok(())
}
