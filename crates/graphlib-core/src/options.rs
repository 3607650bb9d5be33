//! Construction-time mode flags for a [`Graph`](crate::Graph).

use serde::{Deserialize, Serialize};

/// The three mode flags fixed when a graph is created.
///
/// Missing fields deserialize to their defaults, so `{}` is a plain directed
/// simple graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    /// Edges have a direction. Defaults to `true`.
    pub directed: bool,
    /// More than one edge may join the same pair, told apart by name.
    pub multigraph: bool,
    /// Nodes can be nested under parent nodes.
    pub compound: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        GraphOptions {
            directed: true,
            multigraph: false,
            compound: false,
        }
    }
}

impl GraphOptions {
    /// Directed, non-multi, non-compound.
    pub fn directed() -> Self {
        Self::default()
    }

    /// Undirected, non-multi, non-compound.
    pub fn undirected() -> Self {
        GraphOptions {
            directed: false,
            ..Self::default()
        }
    }

    pub fn with_multigraph(mut self, multigraph: bool) -> Self {
        self.multigraph = multigraph;
        self
    }

    pub fn with_compound(mut self, compound: bool) -> Self {
        self.compound = compound;
        self
    }
}
