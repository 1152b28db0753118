use crate::commands::open_database;
use crate::config::Config;
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use tracing::info;

pub fn init(config: &Config, organism: &str) -> Result<()> {
    let mut db = open_database(config)?;
    let existed = db.contains(organism);
    db.initialise_organism(organism);
    db.save()?;
    if existed {
        info!("Organism {} already present in {}", organism, db.path().display());
    } else {
        info!("Initialised organism {} in {}", organism, db.path().display());
    }
    Ok(())
}

pub fn delete(config: &Config, organism: &str, yes: bool) -> Result<()> {
    let mut db = open_database(config)?;
    // Fail on an unknown organism before prompting.
    db.organism(organism)?;
    if !yes && !confirm(&format!("Remove {} and all of its data?", organism))? {
        println!("Aborted");
        return Ok(());
    }
    let removed = db.delete_organism(organism)?;
    db.save()?;
    info!(
        "Removed {}: {} tree nodes, {} SNPs, {} sequences",
        organism,
        removed.tree.len(),
        removed.markers.len(),
        removed.sequences.len()
    );
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
