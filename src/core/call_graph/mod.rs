// src/core/call_graph/mod.rs
//! Class-level call graph reduction.
//!
//! The engine's call graph is method- and context-sensitive. This module folds
//! it onto application classes: one vertex per class, one edge per ordered
//! class pair, weighted by the number of call sites between them.

mod class_graph;
mod reducer;

pub use class_graph::{ClassGraph, ClassGraphStats};
pub use reducer::CallGraphReducer;
