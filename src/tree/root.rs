use crate::error::{Result, TyperError};
use crate::tree::store::TreeStore;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Nodes that are never listed as anyone's child, in insertion order.
pub fn root_candidates(store: &TreeStore) -> Vec<&str> {
    let referenced: HashSet<&str> = store
        .nodes()
        .flat_map(|node| node.children.iter().map(String::as_str))
        .collect();
    store
        .nodes()
        .map(|node| node.name.as_str())
        .filter(|name| !referenced.contains(name))
        .collect()
}

/// Returns the root of the organism's tree: the first node (insertion order)
/// that appears in no children list.
///
/// A malformed import can leave several such nodes; the first one wins and the
/// others are reported as a warning.
pub fn find_root(store: &TreeStore) -> Result<&str> {
    let candidates = root_candidates(store);
    let root = *candidates.first().ok_or_else(|| TyperError::NoRoot {
        organism: store.organism().to_string(),
    })?;
    if candidates.len() > 1 {
        warn!(
            "{} tree has {} parentless nodes, using {} as root; ignored: {}",
            store.organism(),
            candidates.len(),
            root,
            candidates[1..].join(" ")
        );
    }
    debug!("root {} tree: {}", store.organism(), root);
    Ok(root)
}
