use crate::tree::types::TreeNode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Name-indexed arena holding one organism's tree relation.
///
/// Nodes keep their insertion order, which drives root selection, newick
/// child order and classifier tie-breaking. Children are resolved by name
/// lookup into the same index, so there are no back-pointers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "StoredTree", into = "StoredTree")]
pub struct TreeStore {
    organism: String,
    nodes: Vec<TreeNode>,
    index: HashMap<String, usize>,
}

#[derive(Serialize, Deserialize)]
struct StoredTree {
    organism: String,
    #[serde(default)]
    nodes: Vec<TreeNode>,
}

impl From<StoredTree> for TreeStore {
    fn from(stored: StoredTree) -> Self {
        let index = stored
            .nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.name.clone(), idx))
            .collect();
        Self {
            organism: stored.organism,
            nodes: stored.nodes,
            index,
        }
    }
}

impl From<TreeStore> for StoredTree {
    fn from(store: TreeStore) -> Self {
        Self {
            organism: store.organism,
            nodes: store.nodes,
        }
    }
}

impl TreeStore {
    pub fn new(organism: impl Into<String>) -> Self {
        Self {
            organism: organism.into(),
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Builds a store from tree-file text, see [`TreeStore::import_paths`].
    pub fn from_paths(organism: impl Into<String>, text: &str) -> Self {
        let mut store = Self::new(organism);
        store.import_paths(text);
        store
    }

    pub fn organism(&self) -> &str {
        &self.organism
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&TreeNode> {
        self.index.get(name).map(|&idx| &self.nodes[idx])
    }

    /// Children of `name` in recorded order. Unknown nodes have none.
    pub fn children(&self, name: &str) -> &[String] {
        self.get(name).map(|node| node.children.as_slice()).unwrap_or(&[])
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.iter()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.index.clear();
    }

    /// Replaces the tree with the one described by `text`.
    ///
    /// Each line is a `;`-separated path from the root, e.g. `ROOT;N2;N5`.
    /// Lines starting with `#` and empty path elements are skipped. Returns
    /// the number of paths read.
    pub fn import_paths(&mut self, text: &str) -> usize {
        self.clear();
        let mut paths = 0;
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let path: Vec<&str> = line.split(';').map(str::trim).collect();
            self.insert_path(&path);
            paths += 1;
        }
        debug!(
            "Imported {} paths into {} tree ({} nodes)",
            paths,
            self.organism,
            self.nodes.len()
        );
        paths
    }

    /// Merges one root-to-leaf path into the relation.
    pub fn insert_path(&mut self, path: &[&str]) {
        for (i, name) in path.iter().enumerate() {
            if name.is_empty() {
                continue;
            }
            let child = path.get(i + 1).copied().filter(|c| !c.is_empty());
            let idx = self.ensure_node(name);
            if let Some(child) = child {
                self.nodes[idx].add_child(child);
            }
        }
    }

    fn ensure_node(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(TreeNode::new(name, self.organism.clone()));
        self.index.insert(name.to_string(), idx);
        idx
    }
}
