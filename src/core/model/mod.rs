//! Value types shared by the call graph reducer, the dependency graph
//! canonicalizer and the exporters.

mod call_edge;
mod canon;
mod class_vertex;
mod names;

pub use call_edge::CallEdge;
pub use canon::{CanonEdge, CanonVertex, SourcePosition};
pub use class_vertex::ClassVertex;
pub use names::normalize_class_name;
