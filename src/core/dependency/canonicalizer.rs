use clap::ValueEnum;
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::DiGraph;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

use super::dfs::{depth_first_ranks, RankOrder};
use super::labels::EdgeLabeler;
use crate::core::analysis::{ApplicationScope, DependencyGraph};
use crate::core::model::{normalize_class_name, CanonEdge, CanonVertex};

/// Which interval-nested edges are treated as back edges and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum BackEdgePolicy {
    /// Drop every edge whose source interval nests inside its target's
    #[default]
    #[serde(rename = "any-nested")]
    #[value(name = "any-nested")]
    AnyNested,
    /// Only drop nested edges whose endpoints share a method
    #[serde(rename = "same-method")]
    #[value(name = "same-method")]
    SameMethodOnly,
}

/// Integer-addressed dependency graph produced by [`Canonicalizer`].
///
/// `vertices[i].id == i`; ids are DFS discovery ranks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanonGraph {
    pub vertices: Vec<CanonVertex>,
    pub edges: Vec<CanonEdge>,
    pub stats: CanonStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonStats {
    /// Statements in the input graph
    pub statements: usize,
    /// Statements declared in application classes
    pub application_statements: usize,
    /// Statements reached from the entry statements
    pub reached: usize,
    pub kept_edges: usize,
    pub back_edges: usize,
}

impl CanonGraph {
    pub fn vertex(&self, id: usize) -> Option<&CanonVertex> {
        self.vertices.get(id)
    }

    pub fn has_edge(&self, source: usize, target: usize) -> bool {
        self.edges
            .iter()
            .any(|e| e.source() == source && e.target() == target)
    }

    /// Whether the emitted edges still contain a cycle. Never true under
    /// [`BackEdgePolicy::AnyNested`].
    pub fn has_cycle(&self) -> bool {
        let mut graph = DiGraph::<usize, ()>::with_capacity(self.vertices.len(), self.edges.len());
        let nodes: Vec<_> = self.vertices.iter().map(|v| graph.add_node(v.id)).collect();
        for edge in &self.edges {
            graph.add_edge(nodes[edge.source()], nodes[edge.target()], ());
        }
        is_cyclic_directed(&graph)
    }
}

/// Turns a statement-level dependency graph into a [`CanonGraph`].
pub struct Canonicalizer<'s> {
    scope: &'s dyn ApplicationScope,
    policy: BackEdgePolicy,
}

impl<'s> Canonicalizer<'s> {
    pub fn new(scope: &'s dyn ApplicationScope) -> Self {
        Self {
            scope,
            policy: BackEdgePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: BackEdgePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn canonicalize<G, L>(&self, graph: &G, labeler: &L) -> CanonGraph
    where
        G: DependencyGraph,
        L: EdgeLabeler<G> + ?Sized,
    {
        let mut stats = CanonStats::default();

        // Restrict to application statements
        let mut in_scope = HashSet::new();
        for statement in graph.statements() {
            stats.statements += 1;
            if self.scope.is_application_class(graph.statement(statement).class) {
                in_scope.insert(statement);
            }
        }
        stats.application_statements = in_scope.len();
        info!(
            "Pruned dependency graph to application classes: {} of {} statements",
            stats.application_statements, stats.statements
        );

        let successors = |statement: G::Statement| -> Vec<G::Statement> {
            graph
                .successors(statement)
                .filter(|next| in_scope.contains(next))
                .collect()
        };
        let entries: Vec<G::Statement> = graph
            .entry_statements()
            .filter(|entry| in_scope.contains(entry))
            .collect();
        debug!("Starting depth-first searches from {} entry statements", entries.len());

        let finish = depth_first_ranks(entries.iter().copied(), RankOrder::Finish, successors);
        let discover = depth_first_ranks(entries.iter().copied(), RankOrder::Discover, successors);
        stats.reached = discover.len();

        let vertices = self.build_vertices(graph, &discover);

        let mut by_finish: Vec<(G::Statement, usize)> =
            finish.iter().map(|(&s, &rank)| (s, rank)).collect();
        by_finish.sort_unstable_by_key(|&(_, rank)| rank);

        let mut edges = Vec::new();
        for (source, _) in by_finish {
            for target in successors(source) {
                if !discover.contains_key(&target) {
                    continue;
                }
                if self.is_dropped(graph, &discover, &finish, source, target) {
                    stats.back_edges += 1;
                    continue;
                }
                edges.push(CanonEdge::new(
                    discover[&source],
                    discover[&target],
                    labeler.label(graph, source, target),
                    graph.edge_context(source, target).map(str::to_string),
                ));
            }
        }
        stats.kept_edges = edges.len();

        info!(
            "Canonical dependency graph: {} vertices, {} edges, {} back edges dropped",
            vertices.len(),
            stats.kept_edges,
            stats.back_edges
        );

        CanonGraph {
            vertices,
            edges,
            stats,
        }
    }

    fn build_vertices<G: DependencyGraph>(
        &self,
        graph: &G,
        discover: &HashMap<G::Statement, usize>,
    ) -> Vec<CanonVertex> {
        let mut ordered: Vec<(G::Statement, usize)> =
            discover.iter().map(|(&s, &rank)| (s, rank)).collect();
        ordered.sort_unstable_by_key(|&(_, rank)| rank);

        ordered
            .into_iter()
            .map(|(statement, id)| {
                let info = graph.statement(statement);
                CanonVertex {
                    id,
                    position: info.position,
                    method: info.method.to_string(),
                    class: normalize_class_name(&info.class.name).0,
                }
            })
            .collect()
    }

    /// Back-edge test: the source's discover/finish interval lies inside the
    /// target's, so the target is an ancestor on the search path.
    fn is_dropped<G: DependencyGraph>(
        &self,
        graph: &G,
        discover: &HashMap<G::Statement, usize>,
        finish: &HashMap<G::Statement, usize>,
        source: G::Statement,
        target: G::Statement,
    ) -> bool {
        let nested = discover[&source] >= discover[&target] && finish[&source] <= finish[&target];
        if !nested {
            return false;
        }

        match self.policy {
            BackEdgePolicy::AnyNested => true,
            BackEdgePolicy::SameMethodOnly => {
                let from = graph.statement(source);
                let to = graph.statement(target);
                from.method == to.method && from.class.name == to.class.name
            }
        }
    }
}
