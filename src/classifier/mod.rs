pub mod report;
pub mod sample;
pub mod walker;

pub use report::{list_snps, ClassificationReport, UNCLASSIFIED};
pub use sample::{AlignedSample, GAP};
pub use walker::{ClassificationResult, Classifier, WalkContext};
