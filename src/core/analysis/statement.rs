use serde::{Deserialize, Serialize};

/// Kind of program point a dependency graph statement stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatementKind {
    MethodEntry,
    MethodExit,
    Normal { instruction: Instruction },
    ParamCaller,
    ParamCallee,
    NormalReturnCaller,
    NormalReturnCallee,
    Phi,
    Other,
}

/// The instruction behind a `Normal` statement, reduced to what edge
/// labelling needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Instruction {
    BinaryOp { operator: String },
    UnaryOp { opcode: String },
    ConditionalBranch { operator: String },
    Invoke { target: String },
    New { concrete_type: String },
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_kind_wire_format() {
        let kind: StatementKind = serde_json::from_str(
            r#"{"kind":"normal","instruction":{"op":"invoke","target":"getQuote"}}"#,
        )
        .unwrap();
        assert_eq!(
            kind,
            StatementKind::Normal {
                instruction: Instruction::Invoke { target: "getQuote".to_string() }
            }
        );

        let entry: StatementKind = serde_json::from_str(r#"{"kind":"method_entry"}"#).unwrap();
        assert_eq!(entry, StatementKind::MethodEntry);
    }
}
