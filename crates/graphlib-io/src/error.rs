//! Error types for graphlib-io.
//!
//! [`IoError`] covers the two ways encoding or decoding can fail: a label
//! that cannot be converted to or from JSON, and a document that describes an
//! impossible graph (a named edge in a simple graph, a parent in a flat graph,
//! a parent cycle).

use graphlib_core::GraphError;
use thiserror::Error;

/// Errors produced by the JSON codec and the DOT exporter.
#[derive(Debug, Error)]
pub enum IoError {
    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Replaying a decoded document was rejected by the graph.
    #[error("invalid graph document: {0}")]
    Graph(#[from] GraphError),
}
