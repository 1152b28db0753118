use crate::classifier::sample::AlignedSample;
use crate::classifier::walker::ClassificationResult;
use crate::error::Result;
use crate::tree::MarkerTable;

pub const UNCLASSIFIED: &str = "unclassified";

/// User-facing view of a classification.
#[derive(Debug, Clone)]
pub struct ClassificationReport {
    pub sample: String,
    pub result: ClassificationResult,
}

impl ClassificationReport {
    pub fn new(sample: impl Into<String>, result: ClassificationResult) -> Self {
        Self {
            sample: sample.into(),
            result,
        }
    }

    pub fn assigned_label(&self) -> &str {
        self.result.assigned_node.as_deref().unwrap_or(UNCLASSIFIED)
    }

    pub fn is_forced(&self) -> bool {
        !self.result.overridden_markers.is_empty()
    }

    pub fn summary_line(&self, tab_separated: bool) -> String {
        if tab_separated {
            format!("{}\t{}", self.sample, self.assigned_label())
        } else {
            format!("Classification of {}: {}", self.sample, self.assigned_label())
        }
    }

    /// Warning listing the SNPs that were walked through in the ancestral state.
    pub fn forced_warning(&self) -> Option<String> {
        self.is_forced().then(|| {
            format!(
                "[WARNING in {}] forced classification, these SNPs were not in the derived state: {}",
                self.sample,
                self.result.overridden_markers.join(" ")
            )
        })
    }
}

/// Observed base of every marker in the table, for the `--list-snps` output.
///
/// The first row is the header `#SNP, Derived, Ancestral, <sample>`.
pub fn list_snps(
    markers: &MarkerTable,
    sample: &AlignedSample,
    sample_name: &str,
) -> Result<Vec<[String; 4]>> {
    let mut rows = Vec::with_capacity(markers.len() + 1);
    rows.push([
        "#SNP".to_string(),
        "Derived".to_string(),
        "Ancestral".to_string(),
        sample_name.to_string(),
    ]);
    for marker in markers.records() {
        let base = sample.base_at(marker)?;
        rows.push([
            marker.marker_id.clone(),
            marker.derived_base.clone(),
            marker.ancestral_base.clone(),
            (base as char).to_string(),
        ]);
    }
    Ok(rows)
}
