pub mod alignment;
pub mod classifier;
pub mod cli;
pub mod commands;
pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod reference;
pub mod tree;
pub mod utils;

pub use classifier::{AlignedSample, ClassificationReport, ClassificationResult, Classifier};
pub use database::SnpDatabase;
pub use error::TyperError;
pub use tree::{find_root, tree_to_newick, MarkerTable, TreeStore};
