use crate::error::{Result, TyperError};
use crate::tree::MarkerRecord;
use std::collections::HashMap;

/// Gap character used by the alignment converter.
pub const GAP: u8 = b'-';

/// The query's sequence aligned against each reference strain, keyed by strain id.
#[derive(Debug, Clone, Default)]
pub struct AlignedSample {
    sequences: HashMap<String, Vec<u8>>,
}

impl AlignedSample {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, strain: impl Into<String>, sequence: impl Into<Vec<u8>>) {
        self.sequences.insert(strain.into(), sequence.into());
    }

    pub fn get(&self, strain: &str) -> Option<&[u8]> {
        self.sequences.get(strain).map(Vec::as_slice)
    }

    pub fn strains(&self) -> impl Iterator<Item = &str> {
        self.sequences.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Base observed at the marker's 1-based position in its strain's alignment.
    pub fn base_at(&self, marker: &MarkerRecord) -> Result<u8> {
        let sequence = self
            .get(&marker.strain)
            .ok_or_else(|| TyperError::MissingAlignedStrain {
                marker: marker.marker_id.clone(),
                strain: marker.strain.clone(),
            })?;
        marker
            .position
            .checked_sub(1)
            .and_then(|idx| sequence.get(idx))
            .copied()
            .ok_or_else(|| TyperError::PositionOutOfRange {
                marker: marker.marker_id.clone(),
                strain: marker.strain.clone(),
                position: marker.position,
                length: sequence.len(),
            })
    }
}

impl<S: Into<String>, Q: Into<Vec<u8>>> FromIterator<(S, Q)> for AlignedSample {
    fn from_iter<I: IntoIterator<Item = (S, Q)>>(iter: I) -> Self {
        let mut sample = AlignedSample::new();
        for (strain, sequence) in iter {
            sample.insert(strain, sequence);
        }
        sample
    }
}
