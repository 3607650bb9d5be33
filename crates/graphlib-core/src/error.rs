//! Core error types for graphlib-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering the
//! structural violations a graph mutation can be rejected for. Every variant
//! is raised before any state is touched, so a failed call leaves the graph
//! exactly as it was.

use thiserror::Error;

/// Errors produced by graph mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Making `parent` the parent of `node` would make `node` its own ancestor.
    #[error("setting '{parent}' as parent of '{node}' would create a cycle")]
    Cycle { node: String, parent: String },

    /// A hierarchy operation was invoked on a graph built without compound mode.
    #[error("cannot set parent in a non-compound graph")]
    NotCompound,

    /// A named edge was requested on a graph that is not a multigraph.
    #[error("cannot set named edge '{name}' ({v} -> {w}) when multigraph is disabled")]
    MultiEdgeNotAllowed { v: String, w: String, name: String },
}
