use crate::alignment::StrainAlignment;
use crate::classifier::ClassificationReport;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassificationExport {
    pub organism: String,
    pub sample: String,
    pub allow_differences: usize,
    /// Assigned node, or "unclassified".
    pub classification: String,
    pub forced: bool,
    pub overridden_snps: Vec<String>,
    pub absent_snps: Vec<String>,
    pub alignments: Vec<AlignmentQuality>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AlignmentQuality {
    pub strain: String,
    pub identity: f64,
    pub low_identity: bool,
}

impl From<&StrainAlignment> for AlignmentQuality {
    fn from(alignment: &StrainAlignment) -> Self {
        Self {
            strain: alignment.strain.clone(),
            identity: alignment.identity,
            low_identity: alignment.is_low_identity(),
        }
    }
}

impl ClassificationExport {
    pub fn new(
        organism: &str,
        allow_differences: usize,
        report: &ClassificationReport,
        alignments: &[StrainAlignment],
    ) -> Self {
        Self {
            organism: organism.to_string(),
            sample: report.sample.clone(),
            allow_differences,
            classification: report.assigned_label().to_string(),
            forced: report.is_forced(),
            overridden_snps: report.result.overridden_markers.clone(),
            absent_snps: report.result.absent_markers.clone(),
            alignments: alignments.iter().map(AlignmentQuality::from).collect(),
        }
    }
}
