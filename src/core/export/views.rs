use super::attributes::{Attributes, EdgeRecord, ExportGraph, VertexRecord};
use crate::core::call_graph::ClassGraph;
use crate::core::dependency::CanonGraph;

impl ExportGraph for ClassGraph {
    fn vertex_records(&self) -> Vec<VertexRecord> {
        self.vertices()
            .map(|v| VertexRecord {
                id: v.class_name.clone(),
                label: v.short_name.clone(),
                attributes: Attributes::new()
                    .with("class_name", v.class_name.as_str())
                    .with("is_class_private", v.is_private)
                    .with("num_total_fields", v.num_total_fields)
                    .with("num_static_fields", v.num_static_fields)
                    .with("num_instance_fields", v.num_instance_fields)
                    .with("num_total_methods", v.num_total_methods)
                    .with("num_static_methods", v.num_static_methods),
            })
            .collect()
    }

    fn edge_records(&self) -> Vec<EdgeRecord> {
        self.edges()
            .map(|(source, target, edge)| EdgeRecord {
                source: source.class_name.clone(),
                target: target.class_name.clone(),
                attributes: Attributes::new()
                    .with("weight", edge.weight)
                    .with("source_method", edge.source_method.as_str())
                    .with("target_method", edge.target_method.as_str()),
            })
            .collect()
    }
}

impl ExportGraph for CanonGraph {
    fn vertex_records(&self) -> Vec<VertexRecord> {
        self.vertices
            .iter()
            .map(|v| VertexRecord {
                id: v.id.to_string(),
                label: format!("{}:{}", v.method, v.position),
                attributes: Attributes::new()
                    .with("class", v.class.as_str())
                    .with("method", v.method.as_str())
                    .with("position", v.position.as_i64()),
            })
            .collect()
    }

    fn edge_records(&self) -> Vec<EdgeRecord> {
        self.edges
            .iter()
            .map(|e| EdgeRecord {
                source: e.source().to_string(),
                target: e.target().to_string(),
                attributes: Attributes::new()
                    .with("type", e.edge_type.clone())
                    .with("between", e.between_label())
                    .with("context", e.context.clone()),
            })
            .collect()
    }
}
