use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::analysis::{DependencyGraph, Instruction, StatementKind};

/// Produces the `type` label of an exported dependency edge.
pub trait EdgeLabeler<G: DependencyGraph> {
    fn label(&self, graph: &G, from: G::Statement, to: G::Statement) -> Option<String>;
}

impl<G, F> EdgeLabeler<G> for F
where
    G: DependencyGraph,
    F: Fn(&G, G::Statement, G::Statement) -> Option<String>,
{
    fn label(&self, graph: &G, from: G::Statement, to: G::Statement) -> Option<String> {
        self(graph, from, to)
    }
}

/// Labels an edge with the dependence kind the engine recorded for it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DependenceLabeler;

impl<G: DependencyGraph> EdgeLabeler<G> for DependenceLabeler {
    fn label(&self, graph: &G, from: G::Statement, to: G::Statement) -> Option<String> {
        graph.dependence_label(from, to).map(str::to_string)
    }
}

/// Labels an edge with the features of its source statement, falling back to
/// the dependence kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureLabeler;

impl<G: DependencyGraph> EdgeLabeler<G> for FeatureLabeler {
    fn label(&self, graph: &G, from: G::Statement, to: G::Statement) -> Option<String> {
        let source = graph.statement(from);
        statement_features(source.kind, source.method)
            .or_else(|| graph.dependence_label(from, to).map(str::to_string))
    }
}

/// Short textual feature of a statement.
pub fn statement_features(kind: &StatementKind, method: &str) -> Option<String> {
    match kind {
        StatementKind::MethodEntry => Some(format!("entry {}", method)),
        StatementKind::MethodExit => Some(format!("exit {}", method)),
        StatementKind::Phi
        | StatementKind::ParamCaller
        | StatementKind::ParamCallee
        | StatementKind::NormalReturnCaller
        | StatementKind::NormalReturnCallee => Some("flow".to_string()),
        StatementKind::Normal { instruction } => match instruction {
            Instruction::BinaryOp { operator } => Some(operator.clone()),
            Instruction::UnaryOp { opcode } => Some(opcode.clone()),
            Instruction::ConditionalBranch { operator } => Some(operator.clone()),
            Instruction::Invoke { target } => Some(target.clone()),
            Instruction::New { concrete_type } => Some(concrete_type.clone()),
            Instruction::Other => None,
        },
        StatementKind::Other => None,
    }
}

/// Built-in labelling strategies selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LabelStrategy {
    /// Dependence kind recorded by the engine (data, control, ...)
    #[default]
    Dependence,
    /// Features of the source statement
    Feature,
}

impl LabelStrategy {
    pub fn labeler<G: DependencyGraph>(self) -> Box<dyn EdgeLabeler<G>> {
        match self {
            LabelStrategy::Dependence => Box::new(DependenceLabeler),
            LabelStrategy::Feature => Box::new(FeatureLabeler),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal(instruction: Instruction) -> StatementKind {
        StatementKind::Normal { instruction }
    }

    #[test]
    fn test_boundary_features() {
        assert_eq!(
            statement_features(&StatementKind::MethodEntry, "doGet").as_deref(),
            Some("entry doGet")
        );
        assert_eq!(
            statement_features(&StatementKind::MethodExit, "doGet").as_deref(),
            Some("exit doGet")
        );
        assert_eq!(statement_features(&StatementKind::Phi, "x").as_deref(), Some("flow"));
        assert_eq!(
            statement_features(&StatementKind::NormalReturnCaller, "x").as_deref(),
            Some("flow")
        );
    }

    #[test]
    fn test_instruction_features() {
        let add = normal(Instruction::BinaryOp { operator: "add".to_string() });
        let neg = normal(Instruction::UnaryOp { opcode: "neg".to_string() });
        let branch = normal(Instruction::ConditionalBranch { operator: "eq".to_string() });
        let call = normal(Instruction::Invoke { target: "getQuote".to_string() });
        let alloc = normal(Instruction::New { concrete_type: "Ljava/util/ArrayList".to_string() });

        assert_eq!(statement_features(&add, "m").as_deref(), Some("add"));
        assert_eq!(statement_features(&neg, "m").as_deref(), Some("neg"));
        assert_eq!(statement_features(&branch, "m").as_deref(), Some("eq"));
        assert_eq!(statement_features(&call, "m").as_deref(), Some("getQuote"));
        assert_eq!(statement_features(&alloc, "m").as_deref(), Some("Ljava/util/ArrayList"));
        assert_eq!(statement_features(&normal(Instruction::Other), "m"), None);
        assert_eq!(statement_features(&StatementKind::Other, "m"), None);
    }
}
