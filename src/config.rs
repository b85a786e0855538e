use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::{BackEdgePolicy, ExportFormat, LabelStrategy};
use crate::error::{Code2GraphError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output naming and default format
    pub output: OutputConfig,

    /// Dependency graph canonicalization settings
    pub canonicalize: CanonicalizeConfig,

    /// Which classes count as application classes
    pub scope: ScopeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Format used when no output file name is given
    pub format: ExportFormat,

    /// File stem used when no output file name is given
    pub file_stem: String,

    /// Prefix of the exported call graph file
    pub call_graph_prefix: String,

    /// Prefix of the exported dependency graph file
    pub sdg_prefix: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonicalizeConfig {
    /// Which interval-nested edges are dropped as back edges
    pub back_edges: BackEdgePolicy,

    /// How exported dependency edges are labelled
    pub edge_labels: LabelStrategy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    /// Class loader name that marks application classes
    pub application_loader: String,

    /// Qualified-name prefixes excluded from the application scope
    pub exclude_prefixes: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Json,
            file_stem: "graph".to_string(),
            call_graph_prefix: "call_graph_".to_string(),
            sdg_prefix: "sdg_".to_string(),
        }
    }
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            application_loader: "Application".to_string(),
            exclude_prefixes: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| Code2GraphError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| Code2GraphError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration with fallback to default. An explicitly given
    /// path must exist.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) => {
                let p = p.as_ref();
                if p.exists() {
                    Self::load(p)
                } else {
                    Err(Code2GraphError::Config(format!(
                        "configuration file {} not found",
                        p.display()
                    )))
                }
            }
            None => {
                let candidates = ["code2graph.toml", ".code2graph.toml"];

                for candidate in &candidates {
                    if Path::new(candidate).exists() {
                        return Self::load(candidate);
                    }
                }

                Ok(Self::default())
            }
        }
    }
}
