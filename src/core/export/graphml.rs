use html_escape::{encode_double_quoted_attribute, encode_text};

use super::attributes::{Attributes, ExportGraph};
use crate::error::Result;

/// One `<key>` declaration: attribute name plus the GraphML type of its first
/// non-null value.
struct KeyDecl {
    name: String,
    kind: &'static str,
}

fn collect_keys<'a>(attribute_maps: impl Iterator<Item = &'a Attributes>) -> Vec<KeyDecl> {
    let mut keys: Vec<KeyDecl> = Vec::new();
    for attributes in attribute_maps {
        for (name, value) in attributes.iter() {
            match keys.iter_mut().find(|k| k.name == name) {
                Some(key) => {
                    if key.kind == "string" && !value.is_null() {
                        key.kind = value.graphml_type();
                    }
                }
                None => keys.push(KeyDecl {
                    name: name.to_string(),
                    kind: value.graphml_type(),
                }),
            }
        }
    }
    keys
}

fn write_data(out: &mut String, prefix: &str, attributes: &Attributes) {
    for (name, value) in attributes.iter() {
        if value.is_null() {
            continue;
        }
        out.push_str(&format!(
            "      <data key=\"{}_{}\">{}</data>\n",
            prefix,
            encode_double_quoted_attribute(name),
            encode_text(&value.to_string())
        ));
    }
}

/// Render a graph as a GraphML document. Null attributes are omitted.
pub fn render_graphml<G: ExportGraph + ?Sized>(graph: &G) -> Result<String> {
    let vertices = graph.vertex_records();
    let edges = graph.edge_records();

    let vertex_keys = collect_keys(vertices.iter().map(|v| &v.attributes));
    let edge_keys = collect_keys(edges.iter().map(|e| &e.attributes));

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(
        "<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\" \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
         xsi:schemaLocation=\"http://graphml.graphdrawing.org/xmlns \
         http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd\">\n",
    );

    for (domain, prefix, keys) in [("node", "v", &vertex_keys), ("edge", "e", &edge_keys)] {
        for key in keys {
            let name = encode_double_quoted_attribute(&key.name);
            out.push_str(&format!(
                "  <key id=\"{}_{}\" for=\"{}\" attr.name=\"{}\" attr.type=\"{}\"/>\n",
                prefix, name, domain, name, key.kind
            ));
        }
    }

    out.push_str("  <graph id=\"G\" edgedefault=\"directed\">\n");
    for vertex in &vertices {
        out.push_str(&format!("    <node id=\"{}\">\n", encode_double_quoted_attribute(&vertex.id)));
        write_data(&mut out, "v", &vertex.attributes);
        out.push_str("    </node>\n");
    }
    for (i, edge) in edges.iter().enumerate() {
        out.push_str(&format!(
            "    <edge id=\"e{}\" source=\"{}\" target=\"{}\">\n",
            i,
            encode_double_quoted_attribute(&edge.source),
            encode_double_quoted_attribute(&edge.target)
        ));
        write_data(&mut out, "e", &edge.attributes);
        out.push_str("    </edge>\n");
    }
    out.push_str("  </graph>\n");
    out.push_str("</graphml>\n");

    Ok(out)
}
