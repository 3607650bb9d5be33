//! Edge descriptors and their canonical identity keys.
//!
//! An [`Edge`] names an edge by its endpoints and an optional discriminator.
//! [`EdgeId`] is the canonical string form used to index edges: for undirected
//! graphs the endpoints are ordered first, so `(a, b)` and `(b, a)` share one
//! key.
//!
//! Key layout: `esc(v) DELIM esc(w) DELIM (esc(name) | SENTINEL)`. Each part is
//! escaped so that neither the delimiter nor the sentinel can occur inside a
//! part, which keeps the mapping from `(v, w, name)` to keys injective even for
//! ids that contain control characters.

use std::fmt;

use serde::{Deserialize, Serialize};

const EDGE_KEY_DELIM: char = '\x01';
const DEFAULT_EDGE_NAME: char = '\x00';

/// An edge descriptor: source, target and optional multigraph discriminator.
///
/// Descriptors handed out by a graph are canonical and never mutated in place;
/// updating an edge replaces its label, not its identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub v: String,
    pub w: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Edge {
    /// An unnamed edge from `v` to `w`.
    pub fn new(v: impl Into<String>, w: impl Into<String>) -> Self {
        Edge {
            v: v.into(),
            w: w.into(),
            name: None,
        }
    }

    /// A named edge from `v` to `w`. Only valid in multigraphs.
    pub fn named(v: impl Into<String>, w: impl Into<String>, name: impl Into<String>) -> Self {
        Edge {
            v: v.into(),
            w: w.into(),
            name: Some(name.into()),
        }
    }

    /// Returns this descriptor with its endpoints in canonical order.
    pub fn canonical(self, directed: bool) -> Self {
        if !directed && self.v > self.w {
            Edge {
                v: self.w,
                w: self.v,
                name: self.name,
            }
        } else {
            self
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} -> {} ({})", self.v, self.w, name),
            None => write!(f, "{} -> {}", self.v, self.w),
        }
    }
}

/// Canonical identity key of an edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(String);

impl EdgeId {
    /// Builds the key for `(v, w, name)`, ordering the endpoints when the graph
    /// is undirected.
    pub fn from_parts(directed: bool, v: &str, w: &str, name: Option<&str>) -> Self {
        let (v, w) = if !directed && v > w { (w, v) } else { (v, w) };

        let mut key = String::with_capacity(v.len() + w.len() + 4);
        push_escaped(&mut key, v);
        key.push(EDGE_KEY_DELIM);
        push_escaped(&mut key, w);
        key.push(EDGE_KEY_DELIM);
        match name {
            Some(name) => push_escaped(&mut key, name),
            None => key.push(DEFAULT_EDGE_NAME),
        }
        EdgeId(key)
    }

    /// Builds the key for a descriptor.
    pub fn of(directed: bool, edge: &Edge) -> Self {
        Self::from_parts(directed, &edge.v, &edge.w, edge.name.as_deref())
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.escape_debug())
    }
}

fn push_escaped(key: &mut String, part: &str) {
    for ch in part.chars() {
        match ch {
            '\\' => key.push_str("\\\\"),
            DEFAULT_EDGE_NAME => key.push_str("\\0"),
            EDGE_KEY_DELIM => key.push_str("\\1"),
            other => key.push(other),
        }
    }
}
