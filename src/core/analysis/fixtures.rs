//! Small snapshot builder for unit tests.

use super::{
    AnalysisSnapshot, CallSiteEntry, CgNodeEntry, ClassInfo, DependencyEdgeEntry,
    DependencyGraphSection, MethodEntry, StatementEntry, StatementKind,
};

#[derive(Default)]
pub(crate) struct SnapshotBuilder {
    snapshot: AnalysisSnapshot,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn app_class(&mut self, name: &str) -> usize {
        self.class(name, "Application")
    }

    pub fn class(&mut self, name: &str, loader: &str) -> usize {
        self.snapshot.classes.push(ClassInfo {
            name: name.to_string(),
            loader: loader.to_string(),
            ..ClassInfo::default()
        });
        self.snapshot.classes.len() - 1
    }

    /// Adds a method of `class` together with a call graph node for it and
    /// returns the node index.
    pub fn method(&mut self, class: usize, name: &str) -> usize {
        self.snapshot.methods.push(MethodEntry {
            name: name.to_string(),
            class,
        });
        self.snapshot.call_graph.nodes.push(CgNodeEntry {
            method: self.snapshot.methods.len() - 1,
            call_sites: Vec::new(),
        });
        self.snapshot.call_graph.nodes.len() - 1
    }

    pub fn entry_point(&mut self, node: usize) {
        self.snapshot.call_graph.entry_points.push(node);
    }

    pub fn call(&mut self, from: usize, targets: &[usize]) {
        let node = &mut self.snapshot.call_graph.nodes[from];
        let pc = node.call_sites.len() as u32;
        node.call_sites.push(CallSiteEntry {
            pc,
            targets: targets.to_vec(),
        });
    }

    pub fn statement(&mut self, node: usize, kind: StatementKind, position: Option<u32>) -> usize {
        let graph = self.graph();
        graph.statements.push(StatementEntry {
            node,
            kind,
            position,
        });
        graph.statements.len() - 1
    }

    pub fn edge(&mut self, from: usize, to: usize, label: &str) {
        self.graph().edges.push(DependencyEdgeEntry {
            from,
            to,
            label: Some(label.to_string()),
            context: None,
        });
    }

    pub fn edge_with_context(&mut self, from: usize, to: usize, label: &str, context: &str) {
        self.graph().edges.push(DependencyEdgeEntry {
            from,
            to,
            label: Some(label.to_string()),
            context: Some(context.to_string()),
        });
    }

    pub fn entries(&mut self, entries: &[usize]) {
        self.graph().entries = Some(entries.to_vec());
    }

    pub fn build(self) -> AnalysisSnapshot {
        self.snapshot.validated().unwrap()
    }

    fn graph(&mut self) -> &mut DependencyGraphSection {
        self.snapshot
            .dependency_graph
            .get_or_insert_with(DependencyGraphSection::default)
    }
}
