use crate::alignment::{assemble_sample, load_prealigned, AlignmentPipeline, StrainAlignment};
use crate::classifier::{list_snps, ClassificationReport, Classifier};
use crate::commands::open_database;
use crate::config::Config;
use crate::database::OrganismRecord;
use crate::export::formats::classification::ClassificationExport;
use crate::export::AnalysisExport;
use crate::tree::find_root;
use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub struct ClassifyOptions {
    pub allow_differences: usize,
    pub tab_sep: bool,
    pub list_snps: bool,
    pub aligned: Vec<(String, PathBuf)>,
    pub json: Option<PathBuf>,
    pub save_align: bool,
}

pub fn run(config: &Config, organism: &str, queries: &[String], options: &ClassifyOptions) -> Result<()> {
    if !options.aligned.is_empty() && queries.len() != 1 {
        bail!("--aligned describes a single sample, got {} queries", queries.len());
    }

    let db = open_database(config)?;
    let record = db.organism(organism)?;
    let root = find_root(&record.tree)?;
    info!("Using tree root: {}", root);
    let classifier = Classifier::new(&record.tree, &record.markers, options.allow_differences);

    let pipeline = if options.aligned.is_empty() {
        let mut pipeline = AlignmentPipeline::from_config(config).show_progress(options.json.is_none());
        if options.save_align {
            pipeline = pipeline.save_alignments_to(".");
        }
        pipeline.check_tools()?;
        Some(pipeline)
    } else {
        None
    };

    let mut exports = Vec::with_capacity(queries.len());
    for query in queries {
        let alignments = match &pipeline {
            Some(pipeline) => pipeline
                .align(Path::new(query), &record.sequences)
                .with_context(|| format!("Alignment of {} failed", query))?,
            None => options
                .aligned
                .iter()
                .map(|(strain, path)| load_prealigned(strain, path))
                .collect::<Result<Vec<_>>>()?,
        };
        let sample_name = sample_name(query);
        let sample = assemble_sample(&sample_name, &alignments);
        check_strains(record, &alignments);

        if options.list_snps {
            let path = format!("{}_snplist.txt", query);
            write_snp_list(Path::new(&path), &list_snps(&record.markers, &sample, &sample_name)?)?;
            info!("Wrote SNP list {}", path);
        }

        let result = classifier
            .classify(root, &sample)
            .with_context(|| format!("Classification of {} failed", sample_name))?;
        let report = ClassificationReport::new(sample_name, result);
        println!("{}", report.summary_line(options.tab_sep));
        if let Some(warning) = report.forced_warning() {
            eprintln!("{}", warning);
        }
        if !report.result.absent_markers.is_empty() {
            debug!("Pruned nodes without SNP data: {:?}", report.result.absent_markers);
        }

        exports.push(ClassificationExport::new(
            organism,
            options.allow_differences,
            &report,
            &alignments,
        ));
    }

    if let Some(path) = &options.json {
        AnalysisExport::new(exports).write_to(path)?;
        info!("Wrote {}", path.display());
    }
    Ok(())
}

fn sample_name(query: &str) -> String {
    Path::new(query)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| query.to_string())
}

/// Warns about marker strains that no alignment covers; the walk fails if it
/// reaches one of their markers.
fn check_strains(record: &OrganismRecord, alignments: &[StrainAlignment]) {
    let mut missing: Vec<&str> = record
        .markers
        .records()
        .map(|m| m.strain.as_str())
        .filter(|strain| !alignments.iter().any(|a| a.strain == *strain))
        .collect();
    missing.sort_unstable();
    missing.dedup();
    if !missing.is_empty() {
        warn!("No aligned sequence for strain(s): {}", missing.join(" "));
    }
}

fn write_snp_list(path: &Path, rows: &[[String; 4]]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for row in rows {
        writeln!(writer, "{}", row.join("\t"))?;
    }
    writer.flush()?;
    Ok(())
}
