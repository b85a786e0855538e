use serde::Serialize;

use super::attributes::{Attributes, ExportGraph};
use crate::error::Result;

#[derive(Serialize)]
struct JsonDocument<'a> {
    version: &'static str,
    directed: bool,
    nodes: Vec<JsonNode<'a>>,
    edges: Vec<JsonEdge<'a>>,
}

#[derive(Serialize)]
struct JsonNode<'a> {
    id: &'a str,
    attributes: &'a Attributes,
}

#[derive(Serialize)]
struct JsonEdge<'a> {
    source: &'a str,
    target: &'a str,
    attributes: &'a Attributes,
}

/// Render a graph as one pretty-printed JSON document.
pub fn render_json<G: ExportGraph + ?Sized>(graph: &G) -> Result<String> {
    let vertices = graph.vertex_records();
    let edges = graph.edge_records();

    let document = JsonDocument {
        version: "1",
        directed: true,
        nodes: vertices
            .iter()
            .map(|v| JsonNode {
                id: &v.id,
                attributes: &v.attributes,
            })
            .collect(),
        edges: edges
            .iter()
            .map(|e| JsonEdge {
                source: &e.source,
                target: &e.target,
                attributes: &e.attributes,
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&document)?)
}
