//! Rendering of class and dependency graphs to JSON, GraphML and DOT.
//!
//! Every renderer works off the same [`ExportGraph`] records, so the three
//! formats carry the same vertices, edges and attributes.

mod attributes;
mod dot;
mod format;
mod graphml;
mod json;
mod views;

pub use attributes::{AttributeValue, Attributes, EdgeRecord, ExportGraph, VertexRecord};
pub use dot::render_dot;
pub use format::ExportFormat;
pub use graphml::render_graphml;
pub use json::render_json;

use std::path::Path;
use tracing::debug;

use crate::error::{Code2GraphError, Result};

/// Render `graph` in the requested format
pub fn render<G: ExportGraph + ?Sized>(graph: &G, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => render_json(graph),
        ExportFormat::GraphMl => render_graphml(graph),
        ExportFormat::Dot => render_dot(graph),
    }
}

/// Render `graph` and write it to `path`.
///
/// The document is rendered completely before the file is created, so a
/// rendering failure never leaves a file behind. A failed write may.
pub fn export_to_file<G, P>(graph: &G, format: ExportFormat, path: P) -> Result<()>
where
    G: ExportGraph + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let content = render(graph, format)?;
    std::fs::write(path, content.as_bytes()).map_err(|source| Code2GraphError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote {} bytes of {} to {}", content.len(), format, path.display());
    Ok(())
}
