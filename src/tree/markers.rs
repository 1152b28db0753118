use crate::error::{Result, TyperError};
use crate::tree::types::MarkerRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

const MARKER_FIELDS: usize = 7;

/// Per-organism SNP table keyed by marker id (= tree node name).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<MarkerRecord>", into = "Vec<MarkerRecord>")]
pub struct MarkerTable {
    records: Vec<MarkerRecord>,
    index: HashMap<String, usize>,
}

impl From<Vec<MarkerRecord>> for MarkerTable {
    fn from(records: Vec<MarkerRecord>) -> Self {
        let mut table = MarkerTable::default();
        for record in records {
            table.upsert(record);
        }
        table
    }
}

impl From<MarkerTable> for Vec<MarkerRecord> {
    fn from(table: MarkerTable) -> Self {
        table.records
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MarkerImportStats {
    pub inserted: usize,
    pub updated: usize,
    pub skipped: usize,
}

impl MarkerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, marker_id: &str) -> Option<&MarkerRecord> {
        self.index.get(marker_id).map(|&idx| &self.records[idx])
    }

    pub fn records(&self) -> impl Iterator<Item = &MarkerRecord> {
        self.records.iter()
    }

    /// Inserts `record`, or overwrites the existing record with the same id in place.
    /// Returns `true` when a record was replaced.
    pub fn upsert(&mut self, record: MarkerRecord) -> bool {
        match self.index.get(&record.marker_id) {
            Some(&idx) => {
                self.records[idx] = record;
                true
            }
            None => {
                self.index.insert(record.marker_id.clone(), self.records.len());
                self.records.push(record);
                false
            }
        }
    }

    /// Merges a tab-separated SNP file into the table.
    ///
    /// Format, one SNP per line, `#` starts a comment:
    /// `SNP  Organism  Reference  Strain  Position  Derived  Ancestral`.
    /// The organism column is not used; the table already belongs to one.
    pub fn import_tsv(&mut self, text: &str) -> Result<MarkerImportStats> {
        let mut stats = MarkerImportStats::default();
        for (line_no, line) in text.lines().enumerate() {
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let values: Vec<&str> = line.trim().split('\t').map(str::trim).collect();
            if values.len() != MARKER_FIELDS {
                warn!("Skipping SNP line {}: {:?}", line_no + 1, values);
                stats.skipped += 1;
                continue;
            }
            let position = values[4].parse::<usize>().map_err(|e| TyperError::Parse {
                line: line_no + 1,
                message: format!("invalid position '{}' for {}: {}", values[4], values[0], e),
            })?;
            let record = MarkerRecord {
                marker_id: values[0].to_string(),
                reference: values[2].to_string(),
                strain: values[3].to_string(),
                position,
                derived_base: values[5].to_string(),
                ancestral_base: values[6].to_string(),
            };
            if self.upsert(record) {
                stats.updated += 1;
            } else {
                stats.inserted += 1;
            }
        }
        debug!(
            "SNP import: {} inserted, {} updated, {} skipped",
            stats.inserted, stats.updated, stats.skipped
        );
        Ok(stats)
    }
}
