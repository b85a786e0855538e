use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::model::{CallEdge, ClassVertex};

/// Directed class-level call graph with at most one weighted edge per
/// ordered class pair.
#[derive(Debug, Clone, Default)]
pub struct ClassGraph {
    graph: DiGraph<ClassVertex, CallEdge>,
    /// Qualified class name to node index
    index: HashMap<String, NodeIndex>,
}

impl ClassGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex unless an equal one is already present
    pub fn add_vertex(&mut self, vertex: ClassVertex) -> NodeIndex {
        if let Some(&idx) = self.index.get(&vertex.class_name) {
            return idx;
        }
        let name = vertex.class_name.clone();
        let idx = self.graph.add_node(vertex);
        self.index.insert(name, idx);
        idx
    }

    /// Record one observed call from `source` to `target`.
    ///
    /// The first observation creates the edge with weight 1.0; later ones
    /// increment it. Self calls are ignored. Returns whether the call was
    /// recorded.
    pub fn record_call(
        &mut self,
        source: ClassVertex,
        target: ClassVertex,
        source_method: &str,
        target_method: &str,
    ) -> bool {
        if source == target {
            return false;
        }

        let from = self.add_vertex(source);
        let to = self.add_vertex(target);

        match self.graph.find_edge(from, to) {
            Some(edge) => self.graph[edge].increment_weight(),
            None => {
                self.graph
                    .add_edge(from, to, CallEdge::new(source_method, target_method));
            }
        }
        true
    }

    pub fn vertex(&self, class_name: &str) -> Option<&ClassVertex> {
        self.index.get(class_name).map(|&idx| &self.graph[idx])
    }

    pub fn edge(&self, source: &str, target: &str) -> Option<&CallEdge> {
        let from = *self.index.get(source)?;
        let to = *self.index.get(target)?;
        self.graph.find_edge(from, to).map(|e| &self.graph[e])
    }

    /// Vertices in insertion order
    pub fn vertices(&self) -> impl Iterator<Item = &ClassVertex> {
        self.graph.node_weights()
    }

    /// `(source, target, edge)` triples in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (&ClassVertex, &ClassVertex, &CallEdge)> {
        self.graph
            .edge_references()
            .map(move |e| (&self.graph[e.source()], &self.graph[e.target()], e.weight()))
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Sum of all edge weights, i.e. the number of recorded call sites
    pub fn total_weight(&self) -> f64 {
        self.graph.edge_weights().map(|e| e.weight).sum()
    }

    pub fn statistics(&self) -> ClassGraphStats {
        ClassGraphStats {
            classes: self.vertex_count(),
            edges: self.edge_count(),
            call_sites: self.total_weight() as usize,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassGraphStats {
    pub classes: usize,
    pub edges: usize,
    pub call_sites: usize,
}
