use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Database file (overrides db_path from config.toml)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Read settings from this file instead of the user config directory
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create empty tree, SNP and sequence tables for an organism
    InitOrganism {
        organism: String,
    },

    /// Remove an organism and all of its data from the database
    DeleteOrganism {
        organism: String,
        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },

    /// Import a tree given as one ancestor path per line (ROOT;N2;N5)
    ImportTree {
        organism: String,
        tree_file: PathBuf,
    },

    /// Import a tab-separated SNP table
    ImportSnps {
        organism: String,
        snp_file: PathBuf,
    },

    /// Import the reference genome of one strain from a FASTA file
    ImportSequence {
        organism: String,
        strain: String,
        fasta_file: PathBuf,
    },

    /// Print the organism's tree in newick format
    Newick {
        organism: String,
    },

    /// Print the root node of the organism's tree
    Root {
        organism: String,
    },

    /// Classify one or more query genomes against the organism's SNP tree
    Classify {
        organism: String,
        /// Query FASTA files (or a sample name when --aligned is given)
        #[arg(required = true)]
        queries: Vec<String>,
        /// Number of SNPs allowed to be in the ancestral state on the path
        #[arg(short = 'a', long)]
        allow_differences: Option<usize>,
        /// Print "<sample>\t<node>" instead of the plain sentence
        #[arg(long)]
        tab_sep: bool,
        /// Write the observed base of every SNP to <query>_snplist.txt
        #[arg(long)]
        list_snps: bool,
        /// Pre-aligned FASTA for a strain, skipping the aligner
        #[arg(long, value_name = "STRAIN=FILE", value_parser = parse_aligned)]
        aligned: Vec<(String, PathBuf)>,
        /// Write all results to a JSON file
        #[arg(long, value_name = "FILE")]
        json: Option<PathBuf>,
        /// Maximum concurrent alignments (0 = one per reference)
        #[arg(short = 'j', long)]
        num_threads: Option<usize>,
        /// Keep the per-strain alignments in the current directory
        #[arg(long)]
        save_align: bool,
    },

    /// Print the effective configuration as TOML
    ShowConfig,
}

fn parse_aligned(value: &str) -> Result<(String, PathBuf), String> {
    match value.split_once('=') {
        Some((strain, path)) if !strain.is_empty() && !path.is_empty() => {
            Ok((strain.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected STRAIN=FILE, got '{}'", value)),
    }
}
