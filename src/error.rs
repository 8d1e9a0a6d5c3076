use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArcQcError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid JSON on line {line}: {source}")]
    Json {
        source: serde_json::Error,
        line: usize,
    },

    #[error("Invalid web summary: {0}")]
    Schema(#[source] serde_json::Error),

    #[error("Malformed plot '{plot}': {reason}")]
    Plot { plot: String, reason: String },

    #[error("Invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    File {
        path: PathBuf,
        source: Box<ArcQcError>,
    },

    #[error("No Cell Ranger ARC reports found")]
    NoSamplesFound,

    #[error("{0}")]
    Other(String),
}

impl ArcQcError {
    /// Attach the offending file to an error raised while parsing it.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        ArcQcError::File {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ArcQcError>;
