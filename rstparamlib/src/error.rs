//! Error types for rstparamlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while extracting or writing parameter records
#[derive(Error, Debug)]
pub enum RstParamError {
    /// Failed to read the input document
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to open or append to the output file
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Output format name not recognized
    #[error("unknown output format '{0}' (expected one of: param, json)")]
    UnknownFormat(String),

    /// A record could not be serialized as JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
