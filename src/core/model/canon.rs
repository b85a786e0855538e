use serde::{Deserialize, Serialize};
use std::fmt;

/// Best-effort source line of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourcePosition {
    Line(u32),
    Unknown,
}

impl SourcePosition {
    /// Value written to exported graphs; unknown positions become `-1`.
    pub fn as_i64(self) -> i64 {
        match self {
            SourcePosition::Line(line) => i64::from(line),
            SourcePosition::Unknown => -1,
        }
    }
}

impl From<Option<u32>> for SourcePosition {
    fn from(line: Option<u32>) -> Self {
        line.map_or(SourcePosition::Unknown, SourcePosition::Line)
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i64())
    }
}

/// Dependency graph vertex with a stable integer id (its DFS discovery rank).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonVertex {
    pub id: usize,
    pub position: SourcePosition,
    pub method: String,
    pub class: String,
}

/// Dependency graph edge that survived back-edge classification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonEdge {
    pub between: [usize; 2],
    pub edge_type: Option<String>,
    pub context: Option<String>,
}

impl CanonEdge {
    pub fn new(source: usize, target: usize, edge_type: Option<String>, context: Option<String>) -> Self {
        Self {
            between: [source, target],
            edge_type,
            context,
        }
    }

    pub fn source(&self) -> usize {
        self.between[0]
    }

    pub fn target(&self) -> usize {
        self.between[1]
    }

    /// Endpoint ids joined with a comma, e.g. `3,7`.
    pub fn between_label(&self) -> String {
        format!("{},{}", self.between[0], self.between[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_position_renders_sentinel() {
        assert_eq!(SourcePosition::Unknown.to_string(), "-1");
        assert_eq!(SourcePosition::from(Some(42)).to_string(), "42");
        assert_eq!(SourcePosition::from(None), SourcePosition::Unknown);
    }

    #[test]
    fn test_vertex_identity_uses_all_fields() {
        let a = CanonVertex {
            id: 1,
            position: SourcePosition::Line(10),
            method: "run".to_string(),
            class: "com.acme.App".to_string(),
        };
        let mut b = a.clone();
        assert_eq!(a, b);

        b.position = SourcePosition::Unknown;
        assert_ne!(a, b);
    }

    #[test]
    fn test_edge_between_label() {
        let edge = CanonEdge::new(3, 7, Some("data".to_string()), None);
        assert_eq!(edge.between_label(), "3,7");
        assert_eq!(edge.source(), 3);
        assert_eq!(edge.target(), 7);
    }
}
