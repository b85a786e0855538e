use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Code2GraphError, Result};

/// Output serialization target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    #[value(name = "graphml")]
    GraphMl,
    Dot,
}

impl ExportFormat {
    /// Pick the format from a file extension; a missing or unknown extension
    /// is an error.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                Code2GraphError::UnsupportedFormat(format!("{} has no file extension", path.display()))
            })?;
        extension.parse()
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::GraphMl => "graphml",
            ExportFormat::Dot => "dot",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Code2GraphError;

    fn from_str(token: &str) -> Result<Self> {
        match token.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "graphml" => Ok(ExportFormat::GraphMl),
            "dot" => Ok(ExportFormat::Dot),
            _ => Err(Code2GraphError::UnsupportedFormat(token.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
