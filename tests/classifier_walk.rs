use rstest::rstest;
use snp_typer::{AlignedSample, Classifier, MarkerTable, TreeStore, TyperError};

// Fixture tree, every SNP on strain S with derived T / ancestral C:
//
//   ROOT(1) ── A(2) ── A1(3)
//          └── B(4) ── B1(5) ── B11(6) ── B111(8)
//                  └── B2(7)
//
// Positions are in parentheses; a sample string gives the base at each
// position, so "TCCTCCCT" reads ROOT=T A=C A1=C B=T B1=C B11=C B2=C B111=T.

const TREE: &str = "ROOT;A;A1\nROOT;B;B1;B11;B111\nROOT;B;B2\n";
const SNPS: [(&str, usize); 8] = [
    ("ROOT", 1),
    ("A", 2),
    ("A1", 3),
    ("B", 4),
    ("B1", 5),
    ("B11", 6),
    ("B2", 7),
    ("B111", 8),
];

fn markers_without(skip: &[&str]) -> MarkerTable {
    let tsv: String = SNPS
        .iter()
        .filter(|(id, _)| !skip.contains(id))
        .map(|(id, pos)| format!("{}\tTest\tref\tS\t{}\tT\tC\n", id, pos))
        .collect();
    let mut table = MarkerTable::new();
    table.import_tsv(&tsv).expect("import fixture SNPs");
    table
}

fn sample(bases: &str) -> AlignedSample {
    [("S", bases.as_bytes().to_vec())].into_iter().collect()
}

fn classify(bases: &str, threshold: usize) -> (Option<String>, Vec<String>) {
    let tree = TreeStore::from_paths("Test", TREE);
    let markers = markers_without(&[]);
    let result = Classifier::new(&tree, &markers, threshold)
        .classify("ROOT", &sample(bases))
        .expect("classification");
    (result.assigned_node, result.overridden_markers)
}

#[test]
fn follows_derived_path_to_leaf() {
    let (node, overridden) = classify("TCCTTTCT", 0);
    assert_eq!(node.as_deref(), Some("B111"));
    assert!(overridden.is_empty());
}

#[rstest]
#[case::strict(0, "B", &[])]
#[case::one_allowed(1, "B11", &["B1"])]
fn one_ancestral_snp_on_the_path(
    #[case] threshold: usize,
    #[case] expected: &str,
    #[case] overridden: &[&str],
) {
    // B1 is ancestral, B11 derived, B111 ancestral.
    let (node, got) = classify("TCCTCTCC", threshold);
    assert_eq!(node.as_deref(), Some(expected));
    assert_eq!(got, overridden);
}

#[rstest]
#[case::one_allowed(1, "B", &[])]
#[case::two_allowed(2, "B111", &["B1", "B11"])]
fn two_ancestral_snps_on_the_path(
    #[case] threshold: usize,
    #[case] expected: &str,
    #[case] overridden: &[&str],
) {
    // B1 and B11 are ancestral, only B111 below them is derived.
    let (node, got) = classify("TCCTCCCT", threshold);
    assert_eq!(node.as_deref(), Some(expected));
    assert_eq!(got, overridden);
}

#[test]
fn forced_leaf_is_never_accepted() {
    // Nothing below B is derived; forcing B2 (a leaf) must not stick.
    let (node, overridden) = classify("TCCTCCCC", 1);
    assert_eq!(node.as_deref(), Some("B"));
    assert!(overridden.is_empty(), "credit for B2 not returned: {:?}", overridden);
}

#[test]
fn first_derived_sibling_wins() {
    let (node, _) = classify("TTCTCCCC", 0);
    assert_eq!(node.as_deref(), Some("A"));
}

#[test]
fn ancestral_root_is_unclassified_without_tolerance() {
    let (node, overridden) = classify("CCCCCCCC", 0);
    assert_eq!(node, None);
    assert!(overridden.is_empty());
}

#[test]
fn node_without_snp_prunes_its_subtree() {
    let tree = TreeStore::from_paths("Test", TREE);
    let markers = markers_without(&["A"]);
    // A1 is derived but sits under A, which has no SNP record.
    let result = Classifier::new(&tree, &markers, 0)
        .classify("ROOT", &sample("TCTCCCCC"))
        .expect("classification");
    assert_eq!(result.assigned_node.as_deref(), Some("ROOT"));
    assert_eq!(result.absent_markers, vec!["A".to_string()]);
}

#[test]
fn repeated_runs_agree() {
    let tree = TreeStore::from_paths("Test", TREE);
    let markers = markers_without(&[]);
    let classifier = Classifier::new(&tree, &markers, 2);
    let sample = sample("TCCTCCCT");
    let first = classifier.classify("ROOT", &sample).expect("first run");
    let second = classifier.classify("ROOT", &sample).expect("second run");
    assert_eq!(first, second);
}

#[test]
fn missing_strain_aborts() {
    let tree = TreeStore::from_paths("Test", TREE);
    let markers = markers_without(&[]);
    let other: AlignedSample = [("OTHER", b"TTTTTTTT".to_vec())].into_iter().collect();
    let err = Classifier::new(&tree, &markers, 0)
        .classify("ROOT", &other)
        .unwrap_err();
    assert!(
        matches!(err, TyperError::MissingAlignedStrain { ref marker, ref strain } if marker == "ROOT" && strain == "S"),
        "unexpected error: {}",
        err
    );
}

#[test]
fn short_alignment_aborts() {
    let tree = TreeStore::from_paths("Test", TREE);
    let markers = markers_without(&[]);
    // ROOT and B are derived so the walk reaches B1 at position 5.
    let err = Classifier::new(&tree, &markers, 0)
        .classify("ROOT", &sample("TCCT"))
        .unwrap_err();
    assert!(
        matches!(err, TyperError::PositionOutOfRange { position: 5, length: 4, .. }),
        "unexpected error: {}",
        err
    );
}

#[test]
fn ancestral_root_is_forced_when_tolerated() {
    // Only B is derived; the root itself spends the single credit.
    let (node, overridden) = classify("CCCTCCCC", 1);
    assert_eq!(node.as_deref(), Some("B"));
    assert_eq!(overridden, ["ROOT"]);
}

#[test]
fn loop_below_root_is_an_error() {
    // A and B list each other as children on two paths from ROOT.
    let tree = TreeStore::from_paths("Loop", "ROOT;A;B\nROOT;B;A\n");
    let mut markers = MarkerTable::new();
    markers
        .import_tsv("ROOT\tLoop\tref\tS\t1\tT\tC\nA\tLoop\tref\tS\t2\tT\tC\nB\tLoop\tref\tS\t3\tT\tC\n")
        .expect("import SNPs");
    let err = Classifier::new(&tree, &markers, 0)
        .classify("ROOT", &sample("TTT"))
        .unwrap_err();
    assert!(
        matches!(err, TyperError::CyclicTree { ref organism, ref node } if organism == "Loop" && node == "A"),
        "unexpected error: {}",
        err
    );
}
