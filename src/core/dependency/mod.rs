//! Dependency graph canonicalization.
//!
//! Two depth-first searches over the application part of the graph give every
//! reachable statement a discovery rank and a finish rank. Discovery ranks
//! become the exported vertex ids; the pair of ranks classifies edges so that
//! back edges can be dropped before export.

mod canonicalizer;
mod dfs;
mod labels;

pub use canonicalizer::{BackEdgePolicy, CanonGraph, CanonStats, Canonicalizer};
pub use dfs::{depth_first_ranks, RankOrder};
pub use labels::{statement_features, DependenceLabeler, EdgeLabeler, FeatureLabeler, LabelStrategy};
