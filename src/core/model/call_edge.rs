use serde::{Deserialize, Serialize};

/// Aggregated call relation between two classes.
///
/// The method names are those of the first observed call site; `weight`
/// counts every call site observed between the same ordered class pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallEdge {
    pub source_method: String,
    pub target_method: String,
    pub weight: f64,
}

impl CallEdge {
    pub fn new(source_method: impl Into<String>, target_method: impl Into<String>) -> Self {
        Self {
            source_method: source_method.into(),
            target_method: target_method.into(),
            weight: 1.0,
        }
    }

    pub fn increment_weight(&mut self) {
        self.weight += 1.0;
    }
}
