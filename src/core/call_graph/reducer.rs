use tracing::{debug, info};

use super::ClassGraph;
use crate::core::analysis::{ApplicationScope, CallGraph};
use crate::core::model::ClassVertex;

/// Collapses an engine call graph onto application classes.
pub struct CallGraphReducer<'s> {
    scope: &'s dyn ApplicationScope,
}

impl<'s> CallGraphReducer<'s> {
    pub fn new(scope: &'s dyn ApplicationScope) -> Self {
        Self { scope }
    }

    /// Walk every (entry point, call site, target) triple and record a call
    /// between the declaring classes whenever the target is an application
    /// class.
    pub fn reduce<G: CallGraph>(&self, call_graph: &G) -> ClassGraph {
        let mut graph = ClassGraph::new();
        let mut observed = 0usize;
        let mut self_calls = 0usize;

        for entry in call_graph.entry_points() {
            let source_class = call_graph.declaring_class(entry);
            let source_method = call_graph.method_name(entry);

            for site in call_graph.call_sites(entry) {
                for target in call_graph.targets_of(entry, site) {
                    let target_class = call_graph.declaring_class(target);
                    if !self.scope.is_application_class(target_class) {
                        continue;
                    }

                    observed += 1;
                    let recorded = graph.record_call(
                        ClassVertex::from_class(source_class),
                        ClassVertex::from_class(target_class),
                        source_method,
                        call_graph.method_name(target),
                    );
                    if !recorded {
                        self_calls += 1;
                    }
                }
            }
        }

        debug!(
            "Observed {} application call targets ({} within the same class)",
            observed, self_calls
        );
        info!(
            "Call graph reduced to {} classes and {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );

        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analysis::fixtures::SnapshotBuilder;
    use crate::core::analysis::LoaderScope;

    #[test]
    fn test_three_call_sites_give_weight_three() {
        let mut b = SnapshotBuilder::new();
        let x = b.app_class("LX");
        let y = b.app_class("LY");
        let run = b.method(x, "run");
        let first = b.method(y, "first");
        let second = b.method(y, "second");
        b.entry_point(run);
        b.call(run, &[first]);
        b.call(run, &[second]);
        b.call(run, &[first]);
        let snapshot = b.build();

        let scope = LoaderScope::default();
        let graph = CallGraphReducer::new(&scope).reduce(&snapshot);

        assert_eq!(graph.vertex_count(), 2);
        assert!(graph.vertex("X").is_some());
        assert!(graph.vertex("Y").is_some());
        assert_eq!(graph.edge_count(), 1);

        let edge = graph.edge("X", "Y").unwrap();
        assert_eq!(edge.weight, 3.0);
        assert_eq!(edge.source_method, "run");
        assert_eq!(edge.target_method, "first");
    }

    #[test]
    fn test_library_targets_and_self_calls_are_skipped() {
        let mut b = SnapshotBuilder::new();
        let app = b.app_class("Lcom/acme/App");
        let lib = b.class("Ljava/util/List", "Primordial");
        let main = b.method(app, "main");
        let helper = b.method(app, "helper");
        let add = b.method(lib, "add");
        b.entry_point(main);
        b.call(main, &[helper, add]);
        let snapshot = b.build();

        let scope = LoaderScope::default();
        let graph = CallGraphReducer::new(&scope).reduce(&snapshot);

        assert_eq!(graph.vertex_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_no_self_edges_and_one_vertex_per_class() {
        let mut b = SnapshotBuilder::new();
        let a = b.app_class("Lp/A");
        let c = b.app_class("Lp/B");
        let a1 = b.method(a, "one");
        let a2 = b.method(a, "two");
        let b1 = b.method(c, "three");
        b.entry_point(a1);
        b.entry_point(a2);
        b.entry_point(b1);
        b.call(a1, &[a2, b1]);
        b.call(a2, &[b1]);
        b.call(b1, &[a1, a2]);
        let snapshot = b.build();

        let scope = LoaderScope::default();
        let graph = CallGraphReducer::new(&scope).reduce(&snapshot);

        assert_eq!(graph.vertex_count(), 2);
        for (source, target, _) in graph.edges() {
            assert_ne!(source, target);
        }
        assert_eq!(graph.edge("p.A", "p.B").unwrap().weight, 2.0);
        assert_eq!(graph.edge("p.B", "p.A").unwrap().weight, 2.0);
        assert_eq!(graph.total_weight(), 4.0);
    }

    #[test]
    fn test_only_entry_points_are_walked() {
        let mut b = SnapshotBuilder::new();
        let a = b.app_class("LA");
        let c = b.app_class("LB");
        let run = b.method(a, "run");
        let other = b.method(c, "other");
        // `other` calls `run` but is not an entry point
        b.call(other, &[run]);
        b.entry_point(run);
        let snapshot = b.build();

        let scope = LoaderScope::default();
        let graph = CallGraphReducer::new(&scope).reduce(&snapshot);
        assert_eq!(graph.edge_count(), 0);
    }
}
