// src/core/engine.rs
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Code2GraphError;
use super::{
    export_to_file, AnalysisSnapshot, BackEdgePolicy, CallGraphReducer, Canonicalizer,
    ExportFormat, LabelStrategy, LoaderScope,
};

/// Name of the configuration file written by `init`
pub const CONFIG_FILE_NAME: &str = "code2graph.toml";

/// Which graphs an export produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphSelection {
    Both,
    CallGraph,
    Sdg,
}

impl GraphSelection {
    fn includes_call_graph(self) -> bool {
        matches!(self, GraphSelection::Both | GraphSelection::CallGraph)
    }

    fn includes_sdg(self) -> bool {
        matches!(self, GraphSelection::Both | GraphSelection::Sdg)
    }
}

/// One export invocation. `None` fields fall back to the configuration.
#[derive(Debug, Clone, Default)]
pub struct ExportRequest {
    /// Analysis snapshot to read
    pub input: PathBuf,
    /// Directory receiving the exported files
    pub outdir: PathBuf,
    /// Output file name; its extension selects the format unless `format` is set
    pub outfile: Option<String>,
    pub format: Option<ExportFormat>,
    pub back_edges: Option<BackEdgePolicy>,
    pub edge_labels: Option<LabelStrategy>,
}

impl ExportRequest {
    pub fn new(input: impl Into<PathBuf>, outdir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            outdir: outdir.into(),
            ..Self::default()
        }
    }

    pub fn with_outfile(mut self, outfile: impl Into<String>) -> Self {
        self.outfile = Some(outfile.into());
        self
    }
}

/// Main orchestration engine: load a snapshot, reduce it, write the graphs.
pub struct Engine {
    config: Config,
}

impl Engine {
    /// Create a new engine from the configuration at `config_path`, or the
    /// default configuration lookup when none is given
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = Config::load_or_default(config_path)?;

        debug!("Loaded configuration: {:?}", config);

        Ok(Self { config })
    }

    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Export both the class call graph and the canonical dependency graph
    pub fn run(&self, request: &ExportRequest) -> Result<Vec<PathBuf>> {
        self.export(request, GraphSelection::Both)
    }

    /// Export the class call graph only
    pub fn call_graph(&self, request: &ExportRequest) -> Result<Vec<PathBuf>> {
        self.export(request, GraphSelection::CallGraph)
    }

    /// Export the canonical dependency graph only
    pub fn sdg(&self, request: &ExportRequest) -> Result<Vec<PathBuf>> {
        self.export(request, GraphSelection::Sdg)
    }

    /// Run the pipeline for the selected graphs and return the written paths.
    ///
    /// The output format is resolved before the snapshot is read, so an
    /// unsupported format leaves the output directory untouched.
    pub fn export(&self, request: &ExportRequest, selection: GraphSelection) -> Result<Vec<PathBuf>> {
        let (format, file_name) = self.output_target(request)?;
        debug!("Exporting {:?} as {} into {}", selection, format, file_name);

        info!("📥 Loading analysis snapshot from {}", request.input.display());
        let snapshot = AnalysisSnapshot::load(&request.input)?;

        let with_sdg = selection.includes_sdg() && snapshot.has_dependency_graph();
        if selection.includes_sdg() && !with_sdg {
            if selection == GraphSelection::Sdg {
                return Err(Code2GraphError::Analysis(format!(
                    "snapshot {} has no dependency graph",
                    request.input.display()
                ))
                .into());
            }
            warn!("⚠️ Snapshot has no dependency graph, skipping the SDG export");
        }

        std::fs::create_dir_all(&request.outdir).map_err(|source| Code2GraphError::Write {
            path: request.outdir.clone(),
            source,
        })?;

        let scope = LoaderScope::from_config(&self.config.scope);
        let mut written = Vec::new();

        if selection.includes_call_graph() {
            info!("🔗 Reducing call graph to application classes...");
            let graph = CallGraphReducer::new(&scope).reduce(&snapshot);
            let stats = graph.statistics();
            info!("📊 Class call graph:");
            info!("  - {} classes", stats.classes);
            info!("  - {} class-to-class edges", stats.edges);
            info!("  - {} call sites", stats.call_sites);

            let path = self.output_path(request, &self.config.output.call_graph_prefix, &file_name);
            export_to_file(&graph, format, &path)?;
            info!("📝 Wrote call graph to {}", path.display());
            written.push(path);
        }

        if with_sdg {
            let policy = request.back_edges.unwrap_or(self.config.canonicalize.back_edges);
            let labels = request.edge_labels.unwrap_or(self.config.canonicalize.edge_labels);
            debug!("Canonicalizing with back-edge policy {:?} and {:?} labels", policy, labels);

            info!("🔍 Canonicalizing dependency graph over {} statements...", snapshot.statement_count());
            let labeler = labels.labeler::<AnalysisSnapshot>();
            let canon = Canonicalizer::new(&scope)
                .with_policy(policy)
                .canonicalize(&snapshot, labeler.as_ref());

            if canon.stats.reached < canon.stats.application_statements {
                debug!(
                    "{} application statements are unreachable from the entry points",
                    canon.stats.application_statements - canon.stats.reached
                );
            }
            if canon.has_cycle() {
                warn!("⚠️ Canonical dependency graph still contains cycles under the {:?} policy", policy);
            }

            let path = self.output_path(request, &self.config.output.sdg_prefix, &file_name);
            export_to_file(&canon, format, &path)?;
            info!("📝 Wrote dependency graph to {}", path.display());
            written.push(path);
        }

        info!("🎉 Export complete: {} file(s) written", written.len());
        Ok(written)
    }

    /// Write the default configuration into `path` (or the current
    /// directory) and return the file written
    pub fn init(&self, path: Option<PathBuf>, force: bool) -> Result<PathBuf> {
        let target_dir = match path {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };
        info!("Initializing code2graph in: {}", target_dir.display());

        let config_path = target_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() && !force {
            return Err(Code2GraphError::Config(format!(
                "{} already exists (use --force to overwrite)",
                config_path.display()
            ))
            .into());
        }

        std::fs::create_dir_all(&target_dir)?;
        Config::default().save(&config_path)?;
        info!("✅ Wrote default configuration to {}", config_path.display());
        Ok(config_path)
    }

    /// Resolve the output format and the file name shared by both graphs
    fn output_target(&self, request: &ExportRequest) -> Result<(ExportFormat, String)> {
        match (&request.outfile, request.format) {
            (Some(name), Some(format)) => Ok((format, name.clone())),
            (Some(name), None) => Ok((ExportFormat::from_path(name)?, name.clone())),
            (None, format) => {
                let format = format.unwrap_or(self.config.output.format);
                let name = format!("{}.{}", self.config.output.file_stem, format.extension());
                Ok((format, name))
            }
        }
    }

    fn output_path(&self, request: &ExportRequest, prefix: &str, file_name: &str) -> PathBuf {
        request.outdir.join(format!("{}{}", prefix, file_name))
    }
}
