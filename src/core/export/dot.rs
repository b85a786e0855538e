use regex::Regex;
use std::sync::OnceLock;

use super::attributes::{Attributes, ExportGraph};
use crate::error::Result;

fn plain_id() -> &'static Regex {
    static PLAIN_ID: OnceLock<Regex> = OnceLock::new();
    PLAIN_ID.get_or_init(|| {
        Regex::new(r"^(?:[A-Za-z_][A-Za-z0-9_]*|-?[0-9]+)$").expect("valid DOT id pattern")
    })
}

/// Keywords of the DOT grammar; matched case-insensitively.
const KEYWORDS: [&str; 6] = ["node", "edge", "graph", "digraph", "subgraph", "strict"];

fn is_keyword(id: &str) -> bool {
    KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(id))
}

/// Quote and escape a DOT id unless it is a plain identifier or numeral
/// that is not a keyword.
fn dot_id(id: &str) -> String {
    if plain_id().is_match(id) && !is_keyword(id) {
        id.to_string()
    } else {
        quoted(id)
    }
}

fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

fn attribute_list(label: Option<&str>, attributes: &Attributes) -> String {
    let mut parts = Vec::with_capacity(attributes.len() + 1);
    if let Some(label) = label {
        parts.push(format!("label={}", quoted(label)));
    }
    for (name, value) in attributes.iter() {
        if value.is_null() {
            continue;
        }
        parts.push(format!("{}={}", dot_id(name), quoted(&value.to_string())));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" [{}]", parts.join(", "))
    }
}

/// Render a graph as Graphviz DOT. Vertex labels are the short display names;
/// every non-null attribute becomes a DOT attribute.
pub fn render_dot<G: ExportGraph + ?Sized>(graph: &G) -> Result<String> {
    let mut out = String::from("digraph G {\n");

    for vertex in graph.vertex_records() {
        out.push_str(&format!(
            "  {}{};\n",
            dot_id(&vertex.id),
            attribute_list(Some(&vertex.label), &vertex.attributes)
        ));
    }
    for edge in graph.edge_records() {
        out.push_str(&format!(
            "  {} -> {}{};\n",
            dot_id(&edge.source),
            dot_id(&edge.target),
            attribute_list(None, &edge.attributes)
        ));
    }

    out.push_str("}\n");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_ids() {
        assert_eq!(dot_id("node_1"), "node_1");
        assert_eq!(dot_id("42"), "42");
        assert_eq!(dot_id("com.acme.App"), "\"com.acme.App\"");
        assert_eq!(dot_id("a\"b"), "\"a\\\"b\"");
        assert_eq!(dot_id("path\\to"), "\"path\\\\to\"");
        assert_eq!(dot_id("Outer$Inner"), "\"Outer$Inner\"");
    }

    #[test]
    fn test_keywords_are_quoted() {
        assert_eq!(dot_id("Node"), "\"Node\"");
        assert_eq!(dot_id("graph"), "\"graph\"");
        assert_eq!(dot_id("EDGE"), "\"EDGE\"");
        assert_eq!(dot_id("Digraph"), "\"Digraph\"");
        assert_eq!(dot_id("subgraph"), "\"subgraph\"");
        assert_eq!(dot_id("Strict"), "\"Strict\"");
        assert_eq!(dot_id("Nodes"), "Nodes");
    }

    #[test]
    fn test_keyword_class_names_render_as_quoted_ids() {
        use crate::core::analysis::ClassInfo;
        use crate::core::call_graph::ClassGraph;
        use crate::core::model::ClassVertex;

        let class = |name: &str| {
            ClassVertex::from_class(&ClassInfo {
                name: name.to_string(),
                loader: "Application".to_string(),
                ..ClassInfo::default()
            })
        };
        let mut graph = ClassGraph::new();
        graph.record_call(class("LNode"), class("LGraph"), "visit", "walk");

        let document = render_dot(&graph).unwrap();
        assert!(document.contains("  \"Node\" [label=\"Node\""));
        assert!(document.contains("  \"Graph\" [label=\"Graph\""));
        assert!(document.contains("  \"Node\" -> \"Graph\" [weight=\"1.0\""));
        assert!(!document.contains("\n  Node "));
    }
}
