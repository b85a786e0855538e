use serde::{Deserialize, Deserializer, Serialize};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

use super::{CallGraph, ClassInfo, DependencyGraph, StatementInfo, StatementKind};
use crate::error::{Code2GraphError, Result};

/// JSON dump of one analysis engine run.
///
/// All cross references are indices into the sibling arrays. They are checked
/// once by [`AnalysisSnapshot::from_json_str`] / [`AnalysisSnapshot::load`], so
/// the trait implementations can index without further checks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSnapshot {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub classes: Vec<ClassInfo>,
    #[serde(default)]
    pub methods: Vec<MethodEntry>,
    #[serde(default)]
    pub call_graph: CallGraphSection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_graph: Option<DependencyGraphSection>,
    #[serde(skip)]
    index: SnapshotIndex,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MethodEntry {
    pub name: String,
    /// Index of the declaring class
    pub class: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallGraphSection {
    #[serde(default)]
    pub nodes: Vec<CgNodeEntry>,
    #[serde(default)]
    pub entry_points: Vec<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CgNodeEntry {
    /// Index of the method this node is a context-qualified copy of
    pub method: usize,
    #[serde(default)]
    pub call_sites: Vec<CallSiteEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallSiteEntry {
    /// Bytecode offset of the call
    #[serde(default)]
    pub pc: u32,
    #[serde(default)]
    pub targets: Vec<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyGraphSection {
    #[serde(default)]
    pub statements: Vec<StatementEntry>,
    #[serde(default)]
    pub edges: Vec<DependencyEdgeEntry>,
    /// Explicit start statements; derived from the call graph entry points
    /// when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<usize>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementEntry {
    /// Index of the call graph node the statement belongs to
    pub node: usize,
    #[serde(flatten)]
    pub kind: StatementKind,
    /// Source line; absent or negative (the `-1` sentinel) means unknown
    #[serde(
        default,
        deserialize_with = "deserialize_position",
        skip_serializing_if = "Option::is_none"
    )]
    pub position: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyEdgeEntry {
    pub from: usize,
    pub to: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone, Default)]
struct SnapshotIndex {
    successors: Vec<Vec<usize>>,
    edge_lookup: HashMap<(usize, usize), usize>,
    entries: Vec<usize>,
}

fn deserialize_position<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<i64>::deserialize(deserializer)? {
        Some(line) if line >= 0 => u32::try_from(line)
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("position {} out of range", line))),
        _ => Ok(None),
    }
}

fn default_version() -> String {
    "1".to_string()
}

impl AnalysisSnapshot {
    /// Parse and validate a snapshot document
    pub fn from_json_str(content: &str) -> Result<Self> {
        let snapshot: AnalysisSnapshot = serde_json::from_str(content)?;
        snapshot.validated()
    }

    /// Read, parse and validate a snapshot file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            Code2GraphError::Analysis(format!("cannot open snapshot {}: {}", path.display(), e))
        })?;
        let snapshot: AnalysisSnapshot = serde_json::from_reader(BufReader::new(file))?;
        debug!(
            "Read snapshot {} with {} classes and {} call graph nodes",
            path.display(),
            snapshot.classes.len(),
            snapshot.call_graph.nodes.len()
        );
        snapshot.validated()
    }

    /// Check every cross reference and build the lookup tables.
    pub fn validated(mut self) -> Result<Self> {
        self.check_references()?;
        self.index = self.build_index();
        Ok(self)
    }

    pub fn has_dependency_graph(&self) -> bool {
        self.dependency_graph.is_some()
    }

    pub fn statement_count(&self) -> usize {
        self.statement_entries().len()
    }

    fn check_references(&self) -> Result<()> {
        let classes = self.classes.len();
        let methods = self.methods.len();
        let nodes = self.call_graph.nodes.len();

        for (i, method) in self.methods.iter().enumerate() {
            check_index("method", i, "class", method.class, classes)?;
        }
        for (i, node) in self.call_graph.nodes.iter().enumerate() {
            check_index("call graph node", i, "method", node.method, methods)?;
            for site in &node.call_sites {
                for &target in &site.targets {
                    check_index("call graph node", i, "call target", target, nodes)?;
                }
            }
        }
        for &entry in &self.call_graph.entry_points {
            check_index("call graph", 0, "entry point", entry, nodes)?;
        }

        if let Some(graph) = &self.dependency_graph {
            let statements = graph.statements.len();
            for (i, statement) in graph.statements.iter().enumerate() {
                check_index("statement", i, "node", statement.node, nodes)?;
            }
            for (i, edge) in graph.edges.iter().enumerate() {
                check_index("dependency edge", i, "source", edge.from, statements)?;
                check_index("dependency edge", i, "target", edge.to, statements)?;
            }
            for &entry in graph.entries.iter().flatten() {
                check_index("dependency graph", 0, "entry", entry, statements)?;
            }
        }

        Ok(())
    }

    fn build_index(&self) -> SnapshotIndex {
        let Some(graph) = &self.dependency_graph else {
            return SnapshotIndex::default();
        };

        let mut successors = vec![Vec::new(); graph.statements.len()];
        let mut edge_lookup = HashMap::new();
        for (i, edge) in graph.edges.iter().enumerate() {
            // The engine's successor relation is a set; the first edge wins.
            if let Entry::Vacant(slot) = edge_lookup.entry((edge.from, edge.to)) {
                slot.insert(i);
                successors[edge.from].push(edge.to);
            }
        }

        let entries = match &graph.entries {
            Some(entries) => entries.clone(),
            None => self.derive_entries(graph),
        };

        SnapshotIndex {
            successors,
            edge_lookup,
            entries,
        }
    }

    /// The method-entry statement of every call graph entry point, in entry
    /// point order.
    fn derive_entries(&self, graph: &DependencyGraphSection) -> Vec<usize> {
        let mut entry_by_node = HashMap::new();
        for (i, statement) in graph.statements.iter().enumerate() {
            if statement.kind == StatementKind::MethodEntry {
                entry_by_node.entry(statement.node).or_insert(i);
            }
        }

        let mut seen = HashSet::new();
        self.call_graph
            .entry_points
            .iter()
            .filter_map(|node| entry_by_node.get(node).copied())
            .filter(|statement| seen.insert(*statement))
            .collect()
    }

    fn statement_entries(&self) -> &[StatementEntry] {
        self.dependency_graph
            .as_ref()
            .map_or(&[][..], |g| g.statements.as_slice())
    }

    fn node_class(&self, node: usize) -> &ClassInfo {
        let method = &self.methods[self.call_graph.nodes[node].method];
        &self.classes[method.class]
    }

    fn node_method_name(&self, node: usize) -> &str {
        &self.methods[self.call_graph.nodes[node].method].name
    }

    fn edge(&self, from: usize, to: usize) -> Option<&DependencyEdgeEntry> {
        let graph = self.dependency_graph.as_ref()?;
        self.index
            .edge_lookup
            .get(&(from, to))
            .map(|&i| &graph.edges[i])
    }
}

fn check_index(owner: &str, owner_index: usize, field: &str, value: usize, len: usize) -> Result<()> {
    if value < len {
        Ok(())
    } else {
        Err(Code2GraphError::Analysis(format!(
            "{} {} references {} {} but only {} exist",
            owner, owner_index, field, value, len
        )))
    }
}

impl CallGraph for AnalysisSnapshot {
    type Node = usize;
    type CallSite = usize;

    fn entry_points(&self) -> impl Iterator<Item = usize> + '_ {
        self.call_graph.entry_points.iter().copied()
    }

    fn call_sites(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        0..self.call_graph.nodes[node].call_sites.len()
    }

    fn targets_of(&self, node: usize, site: usize) -> impl Iterator<Item = usize> + '_ {
        self.call_graph.nodes[node].call_sites[site].targets.iter().copied()
    }

    fn method_name(&self, node: usize) -> &str {
        self.node_method_name(node)
    }

    fn declaring_class(&self, node: usize) -> &ClassInfo {
        self.node_class(node)
    }
}

impl DependencyGraph for AnalysisSnapshot {
    type Statement = usize;

    fn statements(&self) -> impl Iterator<Item = usize> + '_ {
        0..self.statement_count()
    }

    fn successors(&self, statement: usize) -> impl Iterator<Item = usize> + '_ {
        self.index
            .successors
            .get(statement)
            .into_iter()
            .flatten()
            .copied()
    }

    fn entry_statements(&self) -> impl Iterator<Item = usize> + '_ {
        self.index.entries.iter().copied()
    }

    fn statement(&self, statement: usize) -> StatementInfo<'_> {
        let entry = &self.statement_entries()[statement];

        StatementInfo {
            kind: &entry.kind,
            method: self.node_method_name(entry.node),
            class: self.node_class(entry.node),
            position: entry.position.into(),
        }
    }

    fn dependence_label(&self, from: usize, to: usize) -> Option<&str> {
        self.edge(from, to).and_then(|e| e.label.as_deref())
    }

    fn edge_context(&self, from: usize, to: usize) -> Option<&str> {
        self.edge(from, to).and_then(|e| e.context.as_deref())
    }
}
