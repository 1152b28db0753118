use crate::commands::open_database;
use crate::config::Config;
use crate::database::SequenceUpdate;
use crate::reference::ReferenceSequence;
use crate::tree::find_root;
use crate::utils::input::{open_input, read_to_string};
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

/// Replaces the organism's tree with the paths in `tree_file`.
pub fn tree(config: &Config, organism: &str, tree_file: &Path) -> Result<()> {
    let text = read_to_string(tree_file)?;
    let mut db = open_database(config)?;
    let record = db.organism_mut(organism)?;
    let lines = record.tree.import_paths(&text);
    info!(
        "Imported {} paths, {} nodes for {}",
        lines,
        record.tree.len(),
        organism
    );
    if let Err(e) = find_root(&record.tree) {
        warn!("{}", e);
    }
    db.save()
}

pub fn snps(config: &Config, organism: &str, snp_file: &Path) -> Result<()> {
    let text = read_to_string(snp_file)?;
    let mut db = open_database(config)?;
    let record = db.organism_mut(organism)?;
    let stats = record
        .markers
        .import_tsv(&text)
        .with_context(|| format!("Failed to import SNPs from {}", snp_file.display()))?;
    info!(
        "SNPs for {}: {} inserted, {} updated, {} skipped",
        organism, stats.inserted, stats.updated, stats.skipped
    );

    let missing: Vec<&str> = record
        .markers
        .records()
        .map(|m| m.marker_id.as_str())
        .filter(|id| !record.tree.contains(id))
        .collect();
    if !missing.is_empty() {
        warn!("SNPs not present in the {} tree: {}", organism, missing.join(" "));
    }
    db.save()
}

pub fn sequence(config: &Config, organism: &str, strain: &str, fasta_file: &Path) -> Result<()> {
    let mut db = open_database(config)?;
    let record = db.organism_mut(organism)?;

    let progress = ProgressBarBuilder::new(format!("Reading {}", fasta_file.display()))
        .with_tick()
        .build()?;
    let reference = ReferenceSequence::from_fasta(organism, strain, open_input(fasta_file)?, fasta_file)
        .with_context(|| format!("Failed to import {}", fasta_file.display()));
    progress.finish_and_clear();
    let reference = reference?;

    let length = reference.len();
    match record.upsert_sequence(reference) {
        SequenceUpdate::Inserted => info!("Stored {} bp for {} {}", length, organism, strain),
        SequenceUpdate::Updated => info!("Replaced sequence of {} {} ({} bp)", organism, strain, length),
        SequenceUpdate::Unchanged => {
            info!("Sequence of {} {} is unchanged", organism, strain);
            return Ok(());
        }
    }
    db.save()
}
