// src/core/mod.rs
mod engine;

// Engine collaborators and the snapshot that implements them
pub mod analysis;

// Shared entity model
pub mod model;

// Class-level call graph reduction
pub mod call_graph;

// Dependency graph canonicalization
pub mod dependency;

// Output formats
pub mod export;

pub use analysis::{AnalysisSnapshot, ApplicationScope, CallGraph, ClassInfo, DependencyGraph, LoaderScope};
pub use call_graph::{CallGraphReducer, ClassGraph};
pub use dependency::{BackEdgePolicy, CanonGraph, Canonicalizer, EdgeLabeler, LabelStrategy};
pub use export::{export_to_file, render, ExportFormat, ExportGraph};

// Export the main engine
pub use engine::{Engine, ExportRequest, GraphSelection};
