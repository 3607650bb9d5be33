//! In-memory graph store with string node ids.
//!
//! A [`Graph`] can be directed or undirected, may allow several named edges
//! between the same pair of nodes (multigraph), and may nest nodes under
//! parent nodes (compound). Node and edge lookups, insertions and removals are
//! O(1) amortized.
//!
//! # Modules
//!
//! - [`graph`]: the [`Graph`] store and all node, edge and adjacency operations
//! - [`key`]: [`Edge`] descriptors and canonical [`EdgeId`] keys
//! - [`options`]: [`GraphOptions`] mode flags
//! - [`error`]: [`GraphError`]
//!
//! Subgraph extraction ([`Graph::filter_nodes`]) lives in the private `filter`
//! module, and compound nesting in the private `hierarchy` module.

pub mod error;
mod filter;
pub mod graph;
mod hierarchy;
pub mod key;
pub mod options;

// Re-export commonly used types
pub use error::GraphError;
pub use graph::{EdgeLabelFn, Graph, NodeLabelFn};
pub use key::{Edge, EdgeId};
pub use options::GraphOptions;
