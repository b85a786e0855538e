use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

use code2graph::core::{BackEdgePolicy, Engine, ExportFormat, ExportRequest, LabelStrategy};

#[derive(Parser)]
#[command(name = "code2graph")]
#[command(about = "Export class call graphs and canonical dependency graphs from static analysis results")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export both the class call graph and the dependency graph
    Run(ExportArgs),

    /// Export the class-level call graph only
    CallGraph(ExportArgs),

    /// Export the canonical dependency graph only
    Sdg(ExportArgs),

    /// Write a default configuration file
    Init {
        /// Target directory (defaults to current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args)]
pub struct ExportArgs {
    /// Analysis snapshot (JSON) to read
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory
    #[arg(short = 'd', long)]
    pub outdir: PathBuf,

    /// Output file name; the extension (json, graphml, dot) selects the format
    #[arg(short, long)]
    pub outfile: Option<String>,

    /// Output format, overriding the file extension
    #[arg(long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Which nested edges count as back edges
    #[arg(long, value_enum)]
    pub back_edges: Option<BackEdgePolicy>,

    /// How dependency graph edges are labelled
    #[arg(long, value_enum)]
    pub edge_labels: Option<LabelStrategy>,
}

impl ExportArgs {
    fn into_request(self) -> ExportRequest {
        ExportRequest {
            input: self.input,
            outdir: self.outdir,
            outfile: self.outfile,
            format: self.format,
            back_edges: self.back_edges,
            edge_labels: self.edge_labels,
        }
    }
}

impl Cli {
    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else if self.quiet {
            Level::WARN
        } else {
            Level::INFO
        }
    }

    pub fn execute(self, engine: Engine) -> Result<()> {
        match self.command {
            Commands::Run(args) => engine.run(&args.into_request()).map(|_| ()),
            Commands::CallGraph(args) => engine.call_graph(&args.into_request()).map(|_| ()),
            Commands::Sdg(args) => engine.sdg(&args.into_request()).map(|_| ()),
            Commands::Init { path, force } => engine.init(path, force).map(|_| ()),
        }
    }
}
