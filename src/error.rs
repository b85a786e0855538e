use std::path::PathBuf;
use thiserror::Error;

/// Main error type for code2graph operations
#[derive(Error, Debug)]
pub enum Code2GraphError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Upstream analysis failure, including snapshots that reference
    /// classes, methods, nodes or statements that do not exist.
    #[error("Analysis error: {0}")]
    Analysis(String),

    #[error("Unsupported format: {0} (expected one of json, graphml, dot)")]
    UnsupportedFormat(String),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Code2GraphError>;
