//! Turns the results of a static analysis run into two exportable graphs: a
//! class-level call graph weighted by call-site counts, and a canonical,
//! back-edge-free statement dependency graph.
//!
//! Both can be written as JSON, GraphML or Graphviz DOT.

pub mod config;
pub mod core;
pub mod error;

pub use error::{Code2GraphError, Result};
