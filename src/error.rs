//! Error taxonomy for ramdisk table generation.
//!
//! Every variant is fatal. The only recoverable condition (a missing source
//! while running with `--optional`) is reported as a diagnostic instead.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    /// A manifest line has fewer than three fields.
    #[error("invalid manifest line {line_no}: {line}")]
    ManifestFormat { line_no: usize, line: String },

    /// A mode field is not octal permission text.
    #[error("invalid mode '{mode}' on manifest line {line_no} (expected octal, at most 7777)")]
    InvalidMode { line_no: usize, mode: String },

    /// Neither candidate base directory holds the referenced source.
    #[error("source not found: {source_ref} (tried {})", display_paths(.tried))]
    SourceNotFound {
        source_ref: String,
        tried: Vec<PathBuf>,
    },

    /// A required CLI flag was given neither on the command line nor in the environment.
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, GenError>;
