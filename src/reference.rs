use crate::error::{Result, TyperError};
use bio::io::fasta;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;

/// A reference genome of one strain, used as alignment target for queries.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSequence {
    pub organism: String,
    pub strain: String,
    pub sequence: String,
    pub sha256: String,
}

impl ReferenceSequence {
    /// Validates `sequence` (upper-cased, `ATCGN` only) and fingerprints it.
    pub fn new(
        organism: impl Into<String>,
        strain: impl Into<String>,
        sequence: &str,
    ) -> Result<Self> {
        let strain = strain.into();
        let sequence = sequence.to_ascii_uppercase();
        if let Some((idx, character)) = sequence
            .char_indices()
            .find(|(_, c)| !matches!(c, 'A' | 'T' | 'C' | 'G' | 'N'))
        {
            return Err(TyperError::InvalidSequence {
                strain,
                character,
                position: idx + 1,
            });
        }
        let sha256 = format!("{:x}", Sha256::digest(sequence.as_bytes()));
        Ok(Self {
            organism: organism.into(),
            strain,
            sequence,
            sha256,
        })
    }

    /// Reads the first record of a FASTA stream.
    pub fn from_fasta<R: Read>(
        organism: impl Into<String>,
        strain: impl Into<String>,
        reader: R,
        source: &Path,
    ) -> Result<Self> {
        let record = fasta::Reader::new(reader)
            .records()
            .next()
            .ok_or_else(|| TyperError::EmptySequenceFile(source.to_path_buf()))??;
        if record.seq().is_empty() {
            return Err(TyperError::EmptySequenceFile(source.to_path_buf()));
        }
        Self::new(organism, strain, &String::from_utf8_lossy(record.seq()))
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// FASTA header used when handing the sequence to the aligner.
    pub fn fasta_id(&self) -> String {
        format!("{}.{}", self.organism, self.strain)
    }
}
