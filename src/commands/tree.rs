use crate::commands::open_database;
use crate::config::Config;
use crate::tree::{find_root, tree_to_newick};
use anyhow::Result;
use tracing::warn;

pub fn newick(config: &Config, organism: &str) -> Result<()> {
    let db = open_database(config)?;
    let record = db.organism(organism)?;
    let conversion = tree_to_newick(&record.tree);
    println!("{}", conversion.newick);
    if !conversion.is_complete() {
        warn!(
            "{} of {} nodes could not be placed in the newick tree",
            conversion.unresolved.len(),
            record.tree.len()
        );
    }
    Ok(())
}

pub fn root(config: &Config, organism: &str) -> Result<()> {
    let db = open_database(config)?;
    let record = db.organism(organism)?;
    let root = find_root(&record.tree)?;
    println!("{}", root);
    Ok(())
}
