//! Interfaces to the static-analysis engine.
//!
//! The reducers only ever see the engine through the traits below. The
//! [`AnalysisSnapshot`] is a JSON dump of an engine run that implements them,
//! which is what the command line front-end feeds in.

mod scope;
mod snapshot;
mod statement;

#[cfg(test)]
pub(crate) mod fixtures;

pub use scope::{ApplicationScope, LoaderScope};
pub use snapshot::{
    AnalysisSnapshot, CallGraphSection, CallSiteEntry, CgNodeEntry, DependencyEdgeEntry,
    DependencyGraphSection, MethodEntry, StatementEntry,
};
pub use statement::{Instruction, StatementKind};

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

use super::model::SourcePosition;

/// Class metadata as reported by the engine's class hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassInfo {
    /// Raw type descriptor, e.g. `Lcom/acme/App`
    pub name: String,
    /// Name of the defining class loader
    pub loader: String,
    pub is_private: bool,
    /// All fields, including inherited ones
    pub total_fields: usize,
    pub static_fields: usize,
    pub instance_fields: usize,
    /// Methods declared by the class itself
    pub methods: Vec<DeclaredMethod>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeclaredMethod {
    pub name: String,
    pub is_static: bool,
}

/// A call graph as built by the engine: context-qualified method nodes,
/// each with call sites that resolve to one or more target nodes.
pub trait CallGraph {
    type Node: Copy + Eq + Hash + Debug;
    type CallSite: Copy + Debug;

    fn entry_points(&self) -> impl Iterator<Item = Self::Node> + '_;

    fn call_sites(&self, node: Self::Node) -> impl Iterator<Item = Self::CallSite> + '_;

    fn targets_of(
        &self,
        node: Self::Node,
        site: Self::CallSite,
    ) -> impl Iterator<Item = Self::Node> + '_;

    /// Name of the method the node stands for
    fn method_name(&self, node: Self::Node) -> &str;

    /// Class declaring the node's method
    fn declaring_class(&self, node: Self::Node) -> &ClassInfo;
}

/// What the canonicalizer needs to know about a single statement.
#[derive(Debug, Clone, Copy)]
pub struct StatementInfo<'a> {
    pub kind: &'a StatementKind,
    pub method: &'a str,
    pub class: &'a ClassInfo,
    pub position: SourcePosition,
}

/// A statement-level system dependency graph.
pub trait DependencyGraph {
    type Statement: Copy + Eq + Hash + Debug;

    fn statements(&self) -> impl Iterator<Item = Self::Statement> + '_;

    fn successors(&self, statement: Self::Statement) -> impl Iterator<Item = Self::Statement> + '_;

    /// Statements the depth-first searches start from, in order
    fn entry_statements(&self) -> impl Iterator<Item = Self::Statement> + '_;

    fn statement(&self, statement: Self::Statement) -> StatementInfo<'_>;

    /// Dependence kind of an edge (e.g. `data`, `control`), if the engine
    /// recorded one
    fn dependence_label(&self, from: Self::Statement, to: Self::Statement) -> Option<&str>;

    /// Calling context of an edge, if the engine recorded one
    fn edge_context(&self, from: Self::Statement, to: Self::Statement) -> Option<&str>;
}
