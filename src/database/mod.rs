//! Single-file store for organism trees, SNP tables and reference sequences.
//!
//! The whole database is a JSON document, loaded into memory on open and
//! written back atomically on [`SnpDatabase::save`].

use crate::error::TyperError;
use crate::reference::ReferenceSequence;
use crate::tree::{MarkerTable, TreeStore};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

pub const DB_VERSION: u32 = 1;

/// Everything stored for one organism.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OrganismRecord {
    pub tree: TreeStore,
    #[serde(default)]
    pub markers: MarkerTable,
    #[serde(default)]
    pub sequences: Vec<ReferenceSequence>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceUpdate {
    Inserted,
    Updated,
    Unchanged,
}

impl OrganismRecord {
    pub fn new(organism: &str) -> Self {
        Self {
            tree: TreeStore::new(organism),
            markers: MarkerTable::new(),
            sequences: Vec::new(),
        }
    }

    pub fn sequence(&self, strain: &str) -> Option<&ReferenceSequence> {
        self.sequences.iter().find(|s| s.strain == strain)
    }

    /// Stores the reference for its strain, replacing a previous one.
    pub fn upsert_sequence(&mut self, reference: ReferenceSequence) -> SequenceUpdate {
        match self.sequences.iter_mut().find(|s| s.strain == reference.strain) {
            Some(existing) if existing.sha256 == reference.sha256 => SequenceUpdate::Unchanged,
            Some(existing) => {
                *existing = reference;
                SequenceUpdate::Updated
            }
            None => {
                self.sequences.push(reference);
                SequenceUpdate::Inserted
            }
        }
    }
}

#[derive(Deserialize)]
struct DatabaseFile {
    version: u32,
    #[serde(default)]
    organisms: BTreeMap<String, OrganismRecord>,
}

#[derive(Serialize)]
struct DatabaseFileRef<'a> {
    version: u32,
    organisms: &'a BTreeMap<String, OrganismRecord>,
}

pub struct SnpDatabase {
    path: PathBuf,
    organisms: BTreeMap<String, OrganismRecord>,
}

impl SnpDatabase {
    /// Opens the database at `path`. A missing file yields an empty database
    /// that is created on the first [`save`](Self::save).
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            info!("Creating new database at {}", path.display());
            return Ok(Self {
                path,
                organisms: BTreeMap::new(),
            });
        }

        let file = File::open(&path)
            .with_context(|| format!("Could not open database at {}", path.display()))?;
        let contents: DatabaseFile = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Could not parse database at {}", path.display()))?;
        if contents.version > DB_VERSION {
            anyhow::bail!(
                "Database {} has version {}, this tool supports up to {}",
                path.display(),
                contents.version,
                DB_VERSION
            );
        }
        debug!(
            "Loaded database {} with {} organisms",
            path.display(),
            contents.organisms.len()
        );
        Ok(Self {
            path,
            organisms: contents.organisms,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the database through a temporary file in the same directory.
    pub fn save(&self) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let contents = DatabaseFileRef {
            version: DB_VERSION,
            organisms: &self.organisms,
        };
        let tmp = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            serde_json::to_writer(&mut writer, &contents)?;
            writer.flush()?;
        }
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to write database {}", self.path.display()))?;
        debug!("Saved database {}", self.path.display());
        Ok(())
    }

    pub fn organism_names(&self) -> impl Iterator<Item = &str> {
        self.organisms.keys().map(String::as_str)
    }

    pub fn contains(&self, organism: &str) -> bool {
        self.organisms.contains_key(organism)
    }

    /// Creates empty tables for `organism`. Existing data is left untouched.
    pub fn initialise_organism(&mut self, organism: &str) -> &mut OrganismRecord {
        self.organisms
            .entry(organism.to_string())
            .or_insert_with(|| OrganismRecord::new(organism))
    }

    /// Removes the tree, SNP table and sequences of `organism`.
    pub fn delete_organism(&mut self, organism: &str) -> Result<OrganismRecord, TyperError> {
        self.organisms
            .remove(organism)
            .ok_or_else(|| TyperError::UnknownOrganism(organism.to_string()))
    }

    pub fn organism(&self, organism: &str) -> Result<&OrganismRecord, TyperError> {
        self.organisms
            .get(organism)
            .ok_or_else(|| TyperError::UnknownOrganism(organism.to_string()))
    }

    pub fn organism_mut(&mut self, organism: &str) -> Result<&mut OrganismRecord, TyperError> {
        self.organisms
            .get_mut(organism)
            .ok_or_else(|| TyperError::UnknownOrganism(organism.to_string()))
    }
}
