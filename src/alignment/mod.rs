//! Produces the aligned sample by running the external whole-genome aligner
//! and its XMFA to FASTA converter once per reference strain.

pub mod fasta;
pub mod pool;

use crate::classifier::AlignedSample;
use crate::config::Config;
use crate::error::TyperError;
use crate::reference::ReferenceSequence;
use crate::utils::external_tools::{check_progressive_mauve, check_x2fa};
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{Context, Result};
use bio::io::fasta::Writer;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};

pub use fasta::{read_aligned_pair, AlignedPair};

/// Identity below which an alignment is reported as suspicious.
pub const MIN_IDENTITY: f64 = 0.8;

/// Alignment of the query against one reference strain.
#[derive(Debug, Clone)]
pub struct StrainAlignment {
    pub strain: String,
    pub identity: f64,
    pub pair: AlignedPair,
}

impl StrainAlignment {
    pub fn new(strain: impl Into<String>, pair: AlignedPair) -> Self {
        Self {
            strain: strain.into(),
            identity: pair.identity(),
            pair,
        }
    }

    pub fn is_low_identity(&self) -> bool {
        self.identity < MIN_IDENTITY
    }
}

/// Builds the sample view, logging identity and warning on poor alignments.
pub fn assemble_sample(sample_name: &str, alignments: &[StrainAlignment]) -> AlignedSample {
    let mut sample = AlignedSample::new();
    for alignment in alignments {
        info!(
            "Seq identity with {}: {:.2}%",
            alignment.strain,
            alignment.identity * 100.0
        );
        if alignment.is_low_identity() {
            warn!(
                "[WARNING in {}] Sequence identity with reference strain {} was only {:.2} percent",
                sample_name,
                alignment.strain,
                alignment.identity * 100.0
            );
        }
        sample.insert(alignment.strain.clone(), alignment.pair.query.clone());
    }
    sample
}

/// Reads converter output supplied by the user as `STRAIN=FILE`.
pub fn load_prealigned(strain: &str, path: &Path) -> Result<StrainAlignment> {
    let pair = read_aligned_pair(path)
        .with_context(|| format!("Failed to load alignment of {} from {}", strain, path.display()))?;
    Ok(StrainAlignment::new(strain, pair))
}

pub struct AlignmentPipeline {
    mauve_path: String,
    x2fa_path: String,
    work_dir: PathBuf,
    max_threads: usize,
    save_dir: Option<PathBuf>,
    show_progress: bool,
}

impl AlignmentPipeline {
    pub fn from_config(config: &Config) -> Self {
        Self {
            mauve_path: config.mauve_path.clone(),
            x2fa_path: config.x2fa_path.clone(),
            work_dir: config.tmp_path.clone(),
            max_threads: config.num_threads,
            save_dir: None,
            show_progress: true,
        }
    }

    /// Copies every per-strain aligned FASTA into `dir` after the run.
    pub fn save_alignments_to(mut self, dir: impl Into<PathBuf>) -> Self {
        self.save_dir = Some(dir.into());
        self
    }

    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn check_tools(&self) -> Result<()> {
        check_progressive_mauve(&self.mauve_path)?;
        check_x2fa(&self.x2fa_path)
    }

    /// Aligns `query` against every reference, at most `num_threads` at a time.
    pub fn align(&self, query: &Path, references: &[ReferenceSequence]) -> Result<Vec<StrainAlignment>> {
        if !query.is_file() {
            anyhow::bail!("No such file: {}", query.display());
        }
        if references.is_empty() {
            anyhow::bail!("No reference sequences stored for this organism");
        }
        fs::create_dir_all(&self.work_dir)
            .with_context(|| format!("Could not create {}", self.work_dir.display()))?;
        let scratch = tempfile::Builder::new()
            .prefix("snp-typer-")
            .tempdir_in(&self.work_dir)?;

        let progress = ProgressBarBuilder::new(format!(
            "Aligning sequence against {} reference sequence(s)",
            references.len()
        ))
        .with_steps(references.len() as u64)
        .hidden(!self.show_progress)
        .build()?;

        let results = pool::run_bounded(references.iter().collect(), self.max_threads, |reference| {
            let outcome = self.align_one(query, reference, scratch.path());
            progress.inc(1);
            outcome
        });
        progress.finish_and_clear();

        let alignments = results.into_iter().collect::<Result<Vec<_>>>()?;
        if let Some(dir) = &self.save_dir {
            self.save_alignments(query, dir, &alignments)?;
        }
        Ok(alignments)
    }

    fn align_one(
        &self,
        query: &Path,
        reference: &ReferenceSequence,
        scratch: &Path,
    ) -> Result<StrainAlignment> {
        let reference_fa = scratch.join(format!("{}.reference.fa", reference.strain));
        let xmfa = scratch.join(format!("{}.xmfa", reference.strain));
        let aligned_fa = scratch.join(format!("{}.aligned.fa", reference.strain));

        {
            let mut writer = Writer::to_file(&reference_fa)?;
            writer.write(&reference.fasta_id(), None, reference.sequence.as_bytes())?;
            writer.flush()?;
        }

        let mut mauve = Command::new(&self.mauve_path);
        mauve
            .arg(format!("--output={}", xmfa.display()))
            .arg(&reference_fa)
            .arg(query);
        run_tool("progressiveMauve", mauve)?;

        let mut x2fa = Command::new(&self.x2fa_path);
        x2fa.arg(&xmfa).arg(&reference_fa).arg("0").arg(&aligned_fa);
        run_tool("x2fa.py", x2fa)?;

        let pair = read_aligned_pair(&aligned_fa)?;
        if pair.reference.len() != reference.len() {
            debug!(
                "Aligned {} row has {} columns, stored reference has {}",
                reference.strain,
                pair.reference.len(),
                reference.len()
            );
        }
        Ok(StrainAlignment::new(reference.strain.clone(), pair))
    }

    fn save_alignments(&self, query: &Path, dir: &Path, alignments: &[StrainAlignment]) -> Result<()> {
        let query_name = query
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "query".to_string());
        for alignment in alignments {
            let path = dir.join(format!("{}.{}.fa", query_name, alignment.strain));
            let mut writer = Writer::to_file(&path)?;
            writer.write(&alignment.strain, None, &alignment.pair.reference)?;
            writer.write(&query_name, None, &alignment.pair.query)?;
            writer.flush()?;
            info!("Saved alignment {}", path.display());
        }
        Ok(())
    }
}

/// Runs one external step; a non-zero exit or any stderr output is fatal.
fn run_tool(tool: &str, mut command: Command) -> Result<(), TyperError> {
    debug!("{} command: {:?}", tool, command);
    let output = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()?;
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !output.status.success() || !stderr.trim().is_empty() {
        return Err(TyperError::ExternalTool {
            tool: tool.to_string(),
            message: format!("{} ({})", stderr.trim(), output.status),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_identity_is_flagged() {
        let good = StrainAlignment::new(
            "LVS",
            AlignedPair {
                reference: b"ACGTACGTAC".to_vec(),
                query: b"ACGTACGTAA".to_vec(),
            },
        );
        let poor = StrainAlignment::new(
            "SCHU_S4",
            AlignedPair {
                reference: b"ACGT".to_vec(),
                query: b"A---".to_vec(),
            },
        );
        assert!(!good.is_low_identity());
        assert!(poor.is_low_identity());

        let sample = assemble_sample("q", &[good, poor]);
        assert_eq!(sample.len(), 2);
        assert_eq!(sample.get("SCHU_S4"), Some(&b"A---"[..]));
    }

    #[test]
    fn failing_tool_is_fatal() {
        let command = Command::new("false");
        assert!(matches!(
            run_tool("false", command),
            Err(TyperError::ExternalTool { .. })
        ));
    }

    #[test]
    fn missing_query_is_reported_before_running_tools() {
        let pipeline = AlignmentPipeline::from_config(&Config::default()).show_progress(false);
        let err = pipeline
            .align(Path::new("/nonexistent/query.fa"), &[])
            .unwrap_err();
        assert!(err.to_string().contains("No such file"));
    }
}
