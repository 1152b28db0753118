use snp_typer::tree::{root_candidates, tree_to_newick};
use snp_typer::{find_root, TreeStore, TyperError};

// Paths share ROOT as first element, so ROOT must be the unique parentless
// node whatever order the lines come in.
const PATHS: &str = "# Francisella test tree\n\
                     ROOT;B.1\n\
                     ROOT;B.2;B.4\n\
                     \n\
                     ROOT;B.2;B.5;B.6\n\
                     ROOT;B.2;B.4;B.7\n";

#[test]
fn paths_round_trip_to_newick() {
    let store = TreeStore::from_paths("Test", "ROOT;N1\nROOT;N2;N3\n");
    let conversion = tree_to_newick(&store);
    assert_eq!(conversion.newick, "(N1,(N3)N2)ROOT;");
    assert!(conversion.unresolved.is_empty());
}

#[test]
fn conversion_is_idempotent() {
    let store = TreeStore::from_paths("Test", PATHS);
    let first = tree_to_newick(&store);
    let second = tree_to_newick(&store);
    assert_eq!(first, second);
    assert_eq!(first.newick, "(B.1,((B.7)B.4,(B.6)B.5)B.2)ROOT;");
}

#[test]
fn shared_first_element_gives_unique_root() {
    let store = TreeStore::from_paths("Test", PATHS);
    assert_eq!(root_candidates(&store), vec!["ROOT"]);
    let root = find_root(&store).expect("root");
    assert_eq!(root, "ROOT");
    assert!(store.nodes().all(|n| !n.children.iter().any(|c| c == root)));
}

#[test]
fn detached_nodes_are_reported_unresolved() {
    // A and B only reference each other, so nothing links them under ROOT.
    let store = TreeStore::from_paths("Test", "ROOT;N1\nA;B\nB;A\n");
    let conversion = tree_to_newick(&store);
    assert_eq!(conversion.newick, "(N1)ROOT;");
    assert_eq!(conversion.unresolved, vec!["A".to_string(), "B".to_string()]);
    assert!(!conversion.is_complete());
}

#[test]
fn orphaned_subtree_is_reported_unresolved() {
    // ORPHAN is parentless but listed after ROOT, so it is never rendered.
    let store = TreeStore::from_paths("Test", "ROOT;N1\nORPHAN;N9\n");
    let conversion = tree_to_newick(&store);
    assert_eq!(conversion.newick, "(N1)ROOT;");
    assert_eq!(conversion.unresolved, ["ORPHAN", "N9"]);
}

#[test]
fn empty_tree_has_no_root() {
    let store = TreeStore::new("Empty");
    assert!(matches!(find_root(&store), Err(TyperError::NoRoot { .. })));
    assert_eq!(tree_to_newick(&store).newick, "");
}
