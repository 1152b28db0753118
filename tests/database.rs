use snp_typer::database::{SequenceUpdate, SnpDatabase};
use snp_typer::reference::ReferenceSequence;
use snp_typer::TyperError;
use tempfile::tempdir;

const TREE: &str = "ROOT;B.1\nROOT;B.2;B.3\n";
const SNPS: &str = "B.1\tFrancisella\tSvensson\tLVS\t3\tA\tG\n\
                    B.2\tFrancisella\tSvensson\tLVS\t5\tT\tC\n";

#[test]
fn saved_organism_survives_reopen() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("snpdb.json");

    let mut db = SnpDatabase::open(&path).expect("open new database");
    assert_eq!(db.organism_names().count(), 0);
    let record = db.initialise_organism("Francisella");
    record.tree.import_paths(TREE);
    record.markers.import_tsv(SNPS).expect("import SNPs");
    let reference = ReferenceSequence::new("Francisella", "LVS", "acgtn").expect("valid sequence");
    assert_eq!(record.upsert_sequence(reference), SequenceUpdate::Inserted);
    db.save().expect("save");

    let db = SnpDatabase::open(&path).expect("reopen");
    let record = db.organism("Francisella").expect("organism present");
    assert_eq!(record.tree.len(), 4);
    assert_eq!(record.tree.children("B.2"), ["B.3".to_string()]);
    assert_eq!(record.markers.get("B.2").map(|m| m.position), Some(5));
    assert_eq!(record.sequence("LVS").map(|s| s.sequence.as_str()), Some("ACGTN"));
}

#[test]
fn initialise_keeps_existing_data() {
    let dir = tempdir().expect("tempdir");
    let mut db = SnpDatabase::open(dir.path().join("snpdb.json")).expect("open");
    db.initialise_organism("Francisella").tree.import_paths(TREE);
    let again = db.initialise_organism("Francisella");
    assert_eq!(again.tree.len(), 4);
}

#[test]
fn sequence_upsert_tracks_changes() {
    let dir = tempdir().expect("tempdir");
    let mut db = SnpDatabase::open(dir.path().join("snpdb.json")).expect("open");
    let record = db.initialise_organism("Francisella");
    let seq = |s: &str| ReferenceSequence::new("Francisella", "LVS", s).expect("valid sequence");

    assert_eq!(record.upsert_sequence(seq("ACGT")), SequenceUpdate::Inserted);
    assert_eq!(record.upsert_sequence(seq("acgt")), SequenceUpdate::Unchanged);
    assert_eq!(record.upsert_sequence(seq("ACGG")), SequenceUpdate::Updated);
    assert_eq!(record.sequences.len(), 1);
}

#[test]
fn unknown_organism_is_an_error() {
    let dir = tempdir().expect("tempdir");
    let mut db = SnpDatabase::open(dir.path().join("snpdb.json")).expect("open");
    assert!(matches!(
        db.delete_organism("Yersinia"),
        Err(TyperError::UnknownOrganism(name)) if name == "Yersinia"
    ));

    db.initialise_organism("Yersinia");
    let removed = db.delete_organism("Yersinia").expect("delete");
    assert!(removed.tree.is_empty());
    assert!(!db.contains("Yersinia"));
}

#[test]
fn corrupt_file_is_reported() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("snpdb.json");
    std::fs::write(&path, "not json").expect("write");
    let err = SnpDatabase::open(&path).err().expect("open should fail");
    assert!(err.to_string().contains("Could not parse database"));
}
