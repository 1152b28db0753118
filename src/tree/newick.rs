use crate::tree::root::root_candidates;
use crate::tree::store::TreeStore;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Maximum nesting resolved before a tree is declared broken.
pub const MAX_ROUNDS: usize = 10_000;

/// Newick-style rendering of a tree, plus the nodes that could not be placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewickConversion {
    pub newick: String,
    pub unresolved: Vec<String>,
}

impl NewickConversion {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Converts the tree relation into `(child,(grandchild)child)ROOT;` form.
///
/// Rendering starts from the first parentless node (or the first node when
/// every node is someone's child). Each node is expanded once. Nodes never
/// reached, e.g. a non-root node that no path links as a child, are left out
/// of the string and returned in `unresolved`.
pub fn tree_to_newick(store: &TreeStore) -> NewickConversion {
    let seed = root_candidates(store)
        .first()
        .copied()
        .or_else(|| store.nodes().next().map(|n| n.name.as_str()));
    let Some(seed) = seed else {
        return NewickConversion {
            newick: String::new(),
            unresolved: Vec::new(),
        };
    };

    let mut expanded = HashSet::new();
    let mut newick = String::new();
    render(store, seed, 0, &mut expanded, &mut newick);
    newick.push(';');

    let unresolved: Vec<String> = store
        .nodes()
        .filter(|node| !expanded.contains(node.name.as_str()))
        .map(|node| node.name.clone())
        .collect();

    if !unresolved.is_empty() {
        warn!(
            "Broken {} tree, cannot convert entire tree to newick format. \
             Most likely a non-root node is not listed as a child anywhere in the tree",
            store.organism()
        );
        warn!("These nodes were left out of the tree: {}", unresolved.join(" "));
    }
    debug!("Tree in newick format: {}", newick);

    NewickConversion { newick, unresolved }
}

fn render<'a>(
    store: &'a TreeStore,
    name: &'a str,
    depth: usize,
    expanded: &mut HashSet<&'a str>,
    out: &mut String,
) {
    if depth >= MAX_ROUNDS || !expanded.insert(name) {
        out.push_str(name);
        return;
    }
    let children = store.children(name);
    if !children.is_empty() {
        out.push('(');
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            render(store, child, depth + 1, expanded, out);
        }
        out.push(')');
    }
    out.push_str(name);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_rendering() {
        let store = TreeStore::from_paths(
            "x",
            "ROOT\nROOT;N1\nROOT;N2\nROOT;N2;N3\nROOT;N2;N4\nROOT;N2;N5\nROOT;N2;N5;N6\n",
        );
        let conversion = tree_to_newick(&store);
        assert_eq!(conversion.newick, "(N1,(N3,N4,(N6)N5)N2)ROOT;");
        assert!(conversion.is_complete());
    }

    #[test]
    fn single_node_and_empty_store() {
        assert_eq!(tree_to_newick(&TreeStore::from_paths("x", "ROOT\n")).newick, "ROOT;");
        let empty = tree_to_newick(&TreeStore::new("x"));
        assert_eq!(empty.newick, "");
        assert!(empty.is_complete());
    }

    #[test]
    fn cycle_expands_each_node_once() {
        let store = TreeStore::from_paths("x", "A;B\nB;A\n");
        let conversion = tree_to_newick(&store);
        assert_eq!(conversion.newick, "((A)B)A;");
        assert!(conversion.is_complete());
    }
}
