use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the tree model, the classifier and the database.
///
/// Everything here aborts the operation it was raised from. Recoverable
/// conditions (unresolved newick nodes, markers missing from the marker
/// table) are logged and carried in results instead.
#[derive(Error, Debug)]
pub enum TyperError {
    #[error("could not find root of the {organism} tree")]
    NoRoot { organism: String },

    #[error("SNP position of {marker} listed in strain that has no aligned sequence: {strain}")]
    MissingAlignedStrain { marker: String, strain: String },

    #[error("SNP position {position} of {marker} is outside the aligned {strain} sequence (length {length})")]
    PositionOutOfRange {
        marker: String,
        strain: String,
        position: usize,
        length: usize,
    },

    #[error("{organism} tree loops back to {node} below itself")]
    CyclicTree { organism: String, node: String },

    #[error("organism not found in database: {0}")]
    UnknownOrganism(String),

    #[error("non-ATCGN character '{character}' in sequence of {strain} at position {position}")]
    InvalidSequence {
        strain: String,
        character: char,
        position: usize,
    },

    #[error("no sequence record found in {0}")]
    EmptySequenceFile(PathBuf),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("{tool} failed to complete: {message}")]
    ExternalTool { tool: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TyperError>;
