pub mod cli;
pub mod core;
pub mod ortho;
pub mod utils;

pub use crate::ortho::{
    Cluster, Compliance, Group, GroupOptions, GroupStatistics, MultiGroups, RetentionPolicy,
    SpeciesCounting, Thresholds,
};

use std::path::PathBuf;
use thiserror::Error;

/// Problems with a single groups-file record, before it is tied to a file and line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("missing ':' between cluster name and sequence list")]
    MissingSeparator,

    #[error("sequence '{0}' has no species field (expected <prefix>|<species>|<rest>)")]
    MissingSpecies(String),
}

#[derive(Error, Debug)]
pub enum OrthoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot read {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {} line {line}: {source}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        #[source]
        source: RecordError,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, OrthoError>;
