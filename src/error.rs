//! Error types for the search core.
//!
//! Per-file and per-column failures are values, not panics: the search
//! orchestrator turns them into events and keeps going. Only
//! [`CategoryError`] is meant to reach the caller, and it is raised before a
//! search starts.

use std::path::PathBuf;
use thiserror::Error;

/// The dataset directory could not be listed.
#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error("dataset directory not found: {0}")]
    Unavailable(PathBuf),

    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("invalid dataset extension {extension:?}: {source}")]
    Extension {
        extension: String,
        #[source]
        source: globset::Error,
    },
}

/// A whole dataset file could not be loaded.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} has no header row")]
    MissingHeader(PathBuf),

    #[error("failed to parse {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Matching a query against one column failed.
#[derive(Error, Debug, Clone)]
pub enum MatchError {
    #[error("query could not be compiled: {0}")]
    Pattern(#[from] regex::Error),

    #[error("column {0:?} does not exist in this dataset")]
    UnknownColumn(String),
}

/// A category name outside the closed set.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CategoryError {
    #[error("unsupported search category {0:?} (expected phone, email or username)")]
    Unsupported(String),
}
