use crate::utils::input::open_input;
use anyhow::{bail, Context, Result};
use bio::io::fasta;
use std::path::Path;

/// Converter output for one reference: the reference row and the query row of
/// the alignment, gaps included.
#[derive(Debug, Clone)]
pub struct AlignedPair {
    pub reference: Vec<u8>,
    pub query: Vec<u8>,
}

impl AlignedPair {
    /// Fraction of reference columns where the query carries the same base.
    pub fn identity(&self) -> f64 {
        if self.reference.is_empty() {
            return 0.0;
        }
        let same = self
            .reference
            .iter()
            .zip(&self.query)
            .filter(|(r, q)| r == q)
            .count();
        same as f64 / self.reference.len() as f64
    }
}

/// Reads an aligned FASTA file whose first record is the reference and
/// second record the query.
pub fn read_aligned_pair(path: &Path) -> Result<AlignedPair> {
    let reader = fasta::Reader::new(open_input(path)?);
    let mut records = reader.records();
    let mut next_seq = |what: &str| -> Result<Vec<u8>> {
        match records.next() {
            Some(record) => {
                let record = record
                    .with_context(|| format!("Malformed FASTA record in {}", path.display()))?;
                Ok(record.seq().to_vec())
            }
            None => bail!("{} has no {} sequence", path.display(), what),
        }
    };
    let reference = next_seq("reference")?;
    let query = next_seq("aligned query")?;
    Ok(AlignedPair { reference, query })
}
