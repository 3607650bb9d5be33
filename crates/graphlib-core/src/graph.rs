//! Graph: the node/edge store and the façade over every graph operation.
//!
//! [`Graph`] owns the node collection, the edge collection keyed by
//! [`EdgeId`], the per-node adjacency indices and, in compound mode, the
//! parent/child hierarchy. All mutations go through `Graph` methods so that
//! the indices stay exact mirrors of the edge collection.
//!
//! # Labels
//!
//! Nodes carry a label of type `N`, edges of type `E` and the graph itself an
//! optional label of type `G`. Creating a node or edge without a label stores
//! the result of the graph's default-label generator. Re-setting an existing
//! node or edge without a label never clobbers the stored one:
//!
//! - [`Graph::set_node`] / [`Graph::set_edge`]: no label supplied.
//! - [`Graph::set_node_with`] / [`Graph::set_edge_with`]: label supplied.
//! - [`Graph::set_edge_obj`]: `Option<E>`, `None` meaning "not supplied".
//!
//! "No such node" is `None` from [`Graph::node`], which stays distinct from a
//! stored label even when `N` is itself an `Option`.
//!
//! # Adjacency
//!
//! Every node keeps its incoming and outgoing edge keys plus predecessor and
//! successor count maps. A count entry is removed when it drops to zero, so
//! `predecessors`/`successors` reflect true absence in multigraphs.

use std::fmt;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use crate::error::GraphError;
use crate::hierarchy::Hierarchy;
use crate::key::{Edge, EdgeId};
use crate::options::GraphOptions;

/// Generator for labels of nodes created without one.
pub type NodeLabelFn<N> = Arc<dyn Fn(&str) -> N + Send + Sync>;

/// Generator for labels of edges created without one. Receives `(v, w, name)`.
pub type EdgeLabelFn<E> = Arc<dyn Fn(&str, &str, Option<&str>) -> E + Send + Sync>;

/// Per-node adjacency indices.
#[derive(Debug, Clone, Default)]
pub(crate) struct Adjacency {
    /// Keys of edges ending at this node.
    pub(crate) in_edges: IndexSet<EdgeId>,
    /// Keys of edges starting at this node.
    pub(crate) out_edges: IndexSet<EdgeId>,
    /// Predecessor id -> number of edges from it.
    pub(crate) preds: IndexMap<String, usize>,
    /// Successor id -> number of edges to it.
    pub(crate) sucs: IndexMap<String, usize>,
}

#[derive(Debug, Clone)]
pub(crate) struct NodeEntry<N> {
    pub(crate) label: N,
    pub(crate) adjacency: Adjacency,
}

#[derive(Debug, Clone)]
pub(crate) struct EdgeEntry<E> {
    pub(crate) edge: Edge,
    pub(crate) label: E,
}

/// An in-memory graph with string node ids.
///
/// See the [module documentation](self) for the labelling rules.
#[derive(Clone)]
pub struct Graph<N = (), E = (), G = ()> {
    pub(crate) options: GraphOptions,
    pub(crate) label: Option<G>,
    pub(crate) default_node_label: NodeLabelFn<N>,
    pub(crate) default_edge_label: EdgeLabelFn<E>,
    pub(crate) nodes: IndexMap<String, NodeEntry<N>>,
    pub(crate) edges: IndexMap<EdgeId, EdgeEntry<E>>,
    /// Present iff the graph is compound.
    pub(crate) hierarchy: Option<Hierarchy>,
}

impl<N, E, G> Graph<N, E, G>
where
    N: Default + 'static,
    E: Default + 'static,
{
    /// Creates an empty graph. Default labels are `N::default()` and
    /// `E::default()` until replaced.
    pub fn new(options: GraphOptions) -> Self {
        Self::with_label_fns(
            options,
            |_: &str| N::default(),
            |_: &str, _: &str, _: Option<&str>| E::default(),
        )
    }
}

impl<N, E, G> Default for Graph<N, E, G>
where
    N: Default + 'static,
    E: Default + 'static,
{
    fn default() -> Self {
        Self::new(GraphOptions::default())
    }
}

impl<N, E, G> Graph<N, E, G> {
    /// Creates an empty graph whose nodes and edges created without a label
    /// get `node_label(v)` and `edge_label(v, w, name)`. Needed when `N` or
    /// `E` has no `Default`.
    pub fn with_label_fns<NF, EF>(options: GraphOptions, node_label: NF, edge_label: EF) -> Self
    where
        NF: Fn(&str) -> N + Send + Sync + 'static,
        EF: Fn(&str, &str, Option<&str>) -> E + Send + Sync + 'static,
    {
        Graph {
            options,
            label: None,
            default_node_label: Arc::new(node_label),
            default_edge_label: Arc::new(edge_label),
            nodes: IndexMap::new(),
            edges: IndexMap::new(),
            hierarchy: options.compound.then(Hierarchy::new),
        }
    }

    // -----------------------------------------------------------------------
    // Graph-level accessors
    // -----------------------------------------------------------------------

    pub fn options(&self) -> GraphOptions {
        self.options
    }

    pub fn is_directed(&self) -> bool {
        self.options.directed
    }

    pub fn is_multigraph(&self) -> bool {
        self.options.multigraph
    }

    pub fn is_compound(&self) -> bool {
        self.options.compound
    }

    /// Sets the graph-level label.
    pub fn set_graph(&mut self, label: G) -> &mut Self {
        self.label = Some(label);
        self
    }

    /// Returns the graph-level label, if one was set.
    pub fn graph(&self) -> Option<&G> {
        self.label.as_ref()
    }

    pub fn graph_mut(&mut self) -> Option<&mut G> {
        self.label.as_mut()
    }

    // -----------------------------------------------------------------------
    // Node methods
    // -----------------------------------------------------------------------

    /// Replaces the generator used for nodes created without a label.
    pub fn set_default_node_label<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&str) -> N + Send + Sync + 'static,
    {
        self.default_node_label = Arc::new(f);
        self
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns every node id.
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.keys().map(String::as_str)
    }

    /// Nodes with no incoming edges. O(|V|).
    pub fn sources(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|(_, entry)| entry.adjacency.in_edges.is_empty())
            .map(|(v, _)| v.as_str())
            .collect()
    }

    /// Nodes with no outgoing edges. O(|V|).
    pub fn sinks(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|(_, entry)| entry.adjacency.out_edges.is_empty())
            .map(|(v, _)| v.as_str())
            .collect()
    }

    /// Creates `v` with the default label if it does not exist yet. An existing
    /// node keeps its label.
    pub fn set_node(&mut self, v: &str) -> &mut Self {
        if !self.nodes.contains_key(v) {
            let label = (self.default_node_label)(v);
            self.insert_node(v, label);
        }
        self
    }

    /// Creates `v` or overwrites its label.
    pub fn set_node_with(&mut self, v: &str, label: N) -> &mut Self {
        match self.nodes.get_mut(v) {
            Some(entry) => entry.label = label,
            None => self.insert_node(v, label),
        }
        self
    }

    /// [`set_node`](Self::set_node) for each id.
    pub fn set_nodes<I, S>(&mut self, ids: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for v in ids {
            self.set_node(v.as_ref());
        }
        self
    }

    /// [`set_node_with`](Self::set_node_with) for each id, sharing one label.
    pub fn set_nodes_with<I, S>(&mut self, ids: I, label: N) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        N: Clone,
    {
        for v in ids {
            self.set_node_with(v.as_ref(), label.clone());
        }
        self
    }

    fn insert_node(&mut self, v: &str, label: N) {
        if let Some(hierarchy) = self.hierarchy.as_mut() {
            hierarchy.insert(v);
        }
        self.nodes.insert(
            v.to_string(),
            NodeEntry {
                label,
                adjacency: Adjacency::default(),
            },
        );
    }

    /// Returns the label of `v`, or `None` if there is no such node.
    pub fn node(&self, v: &str) -> Option<&N> {
        self.nodes.get(v).map(|entry| &entry.label)
    }

    pub fn node_mut(&mut self, v: &str) -> Option<&mut N> {
        self.nodes.get_mut(v).map(|entry| &mut entry.label)
    }

    pub fn has_node(&self, v: &str) -> bool {
        self.nodes.contains_key(v)
    }

    /// Removes `v` together with every edge incident to it. In compound mode
    /// its children move to the top level. No-op if `v` does not exist.
    pub fn remove_node(&mut self, v: &str) -> &mut Self {
        let Some(entry) = self.nodes.get(v) else {
            return self;
        };

        // A self-loop is listed on both sides; the second removal is a no-op.
        let incident: Vec<EdgeId> = entry
            .adjacency
            .in_edges
            .iter()
            .chain(entry.adjacency.out_edges.iter())
            .cloned()
            .collect();
        for id in &incident {
            self.remove_edge_by_id(id);
        }

        if let Some(hierarchy) = self.hierarchy.as_mut() {
            hierarchy.remove(v);
        }
        self.nodes.swap_remove(v);
        self
    }

    // -----------------------------------------------------------------------
    // Hierarchy methods
    // -----------------------------------------------------------------------

    /// Nests `v` under `parent`, or moves it to the top level when `parent` is
    /// `None`. Both nodes are created if missing.
    ///
    /// Fails with [`GraphError::NotCompound`] on a non-compound graph and with
    /// [`GraphError::Cycle`] when `v` is `parent` or one of its ancestors; in
    /// both cases nothing is changed.
    pub fn set_parent(&mut self, v: &str, parent: Option<&str>) -> Result<&mut Self, GraphError> {
        let Some(hierarchy) = self.hierarchy.as_ref() else {
            return Err(GraphError::NotCompound);
        };

        if let Some(parent) = parent {
            if hierarchy.is_ancestor(v, parent) {
                return Err(GraphError::Cycle {
                    node: v.to_string(),
                    parent: parent.to_string(),
                });
            }
            self.set_node(parent);
        }
        self.set_node(v);

        if let Some(hierarchy) = self.hierarchy.as_mut() {
            hierarchy.attach(v, parent);
        }
        Ok(self)
    }

    /// Returns the parent of `v`. `None` for top-level nodes, unknown nodes and
    /// non-compound graphs.
    pub fn parent(&self, v: &str) -> Option<&str> {
        self.hierarchy.as_ref()?.parent(v)
    }

    /// Returns the direct children of `v`, or the top-level nodes when `v` is
    /// `None`. Returns `None` if `v` is not a node.
    ///
    /// A non-compound graph has no nesting: every node is top-level and no node
    /// has children.
    pub fn children(&self, v: Option<&str>) -> Option<Vec<&str>> {
        match (&self.hierarchy, v) {
            (Some(hierarchy), None) => Some(hierarchy.roots()),
            (Some(hierarchy), Some(v)) => hierarchy.children(v),
            (None, None) => Some(self.nodes().collect()),
            (None, Some(v)) => self.has_node(v).then(Vec::new),
        }
    }

    // -----------------------------------------------------------------------
    // Adjacency queries
    // -----------------------------------------------------------------------

    /// Nodes with an edge into `v`. `None` if `v` is not a node.
    pub fn predecessors(&self, v: &str) -> Option<Vec<&str>> {
        let entry = self.nodes.get(v)?;
        Some(entry.adjacency.preds.keys().map(String::as_str).collect())
    }

    /// Nodes with an edge from `v`. `None` if `v` is not a node.
    pub fn successors(&self, v: &str) -> Option<Vec<&str>> {
        let entry = self.nodes.get(v)?;
        Some(entry.adjacency.sucs.keys().map(String::as_str).collect())
    }

    /// Union of predecessors and successors, without duplicates.
    pub fn neighbors(&self, v: &str) -> Option<Vec<&str>> {
        let entry = self.nodes.get(v)?;
        let union: IndexSet<&str> = entry
            .adjacency
            .preds
            .keys()
            .chain(entry.adjacency.sucs.keys())
            .map(String::as_str)
            .collect();
        Some(union.into_iter().collect())
    }

    /// `true` if `v` has no successors (directed) or no neighbors
    /// (undirected). `None` if `v` is not a node.
    pub fn is_leaf(&self, v: &str) -> Option<bool> {
        let adjacency = &self.nodes.get(v)?.adjacency;
        if self.options.directed {
            Some(adjacency.sucs.is_empty())
        } else {
            Some(adjacency.sucs.is_empty() && adjacency.preds.is_empty())
        }
    }

    // -----------------------------------------------------------------------
    // Edge methods
    // -----------------------------------------------------------------------

    /// Replaces the generator used for edges created without a label.
    pub fn set_default_edge_label<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&str, &str, Option<&str>) -> E + Send + Sync + 'static,
    {
        self.default_edge_label = Arc::new(f);
        self
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns every edge descriptor, canonicalized.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values().map(|entry| &entry.edge)
    }

    /// Creates an unnamed edge from `v` to `w` with the default label, creating
    /// missing endpoints. An existing edge keeps its label.
    pub fn set_edge(&mut self, v: &str, w: &str) -> &mut Self {
        self.upsert_edge(Edge::new(v, w), None);
        self
    }

    /// Creates an unnamed edge from `v` to `w` or overwrites its label.
    pub fn set_edge_with(&mut self, v: &str, w: &str, label: E) -> &mut Self {
        self.upsert_edge(Edge::new(v, w), Some(label));
        self
    }

    /// Creates or updates a named edge. See [`set_edge_obj`](Self::set_edge_obj).
    pub fn set_named_edge(
        &mut self,
        v: &str,
        w: &str,
        name: &str,
        label: Option<E>,
    ) -> Result<&mut Self, GraphError> {
        self.set_edge_obj(Edge::named(v, w, name), label)
    }

    /// Creates or updates the edge described by `edge`.
    ///
    /// `label: None` means no label was supplied: a new edge gets the default
    /// label and an existing one keeps its own. Fails with
    /// [`GraphError::MultiEdgeNotAllowed`] if `edge` is named and the graph is
    /// not a multigraph; nothing is changed in that case.
    pub fn set_edge_obj(&mut self, edge: Edge, label: Option<E>) -> Result<&mut Self, GraphError> {
        if !self.options.multigraph {
            if let Some(name) = &edge.name {
                return Err(GraphError::MultiEdgeNotAllowed {
                    v: edge.v,
                    w: edge.w,
                    name: name.clone(),
                });
            }
        }
        self.upsert_edge(edge, label);
        Ok(self)
    }

    /// Sets an unnamed edge between each consecutive pair of `ids`.
    pub fn set_path<I, S>(&mut self, ids: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids: Vec<S> = ids.into_iter().collect();
        for pair in ids.windows(2) {
            self.set_edge(pair[0].as_ref(), pair[1].as_ref());
        }
        self
    }

    /// Like [`set_path`](Self::set_path), labelling every edge with `label`.
    pub fn set_path_with<I, S>(&mut self, ids: I, label: E) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        E: Clone,
    {
        let ids: Vec<S> = ids.into_iter().collect();
        for pair in ids.windows(2) {
            self.set_edge_with(pair[0].as_ref(), pair[1].as_ref(), label.clone());
        }
        self
    }

    /// Inserts or relabels an edge without the multigraph check.
    pub(crate) fn upsert_edge(&mut self, edge: Edge, label: Option<E>) {
        let edge = edge.canonical(self.options.directed);
        let id = EdgeId::of(self.options.directed, &edge);

        if let Some(entry) = self.edges.get_mut(&id) {
            if let Some(label) = label {
                entry.label = label;
            }
            return;
        }

        self.set_node(&edge.v);
        self.set_node(&edge.w);
        let label = match label {
            Some(label) => label,
            None => (self.default_edge_label)(&edge.v, &edge.w, edge.name.as_deref()),
        };

        if let Some(target) = self.nodes.get_mut(&edge.w) {
            target.adjacency.in_edges.insert(id.clone());
            *target.adjacency.preds.entry(edge.v.clone()).or_insert(0) += 1;
        }
        if let Some(source) = self.nodes.get_mut(&edge.v) {
            source.adjacency.out_edges.insert(id.clone());
            *source.adjacency.sucs.entry(edge.w.clone()).or_insert(0) += 1;
        }
        self.edges.insert(id, EdgeEntry { edge, label });
    }

    /// Returns the label of `edge`, or `None` if there is no such edge.
    pub fn edge(&self, edge: &Edge) -> Option<&E> {
        self.edges
            .get(&EdgeId::of(self.options.directed, edge))
            .map(|entry| &entry.label)
    }

    pub fn edge_mut(&mut self, edge: &Edge) -> Option<&mut E> {
        self.edges
            .get_mut(&EdgeId::of(self.options.directed, edge))
            .map(|entry| &mut entry.label)
    }

    pub fn has_edge(&self, edge: &Edge) -> bool {
        self.edges.contains_key(&EdgeId::of(self.options.directed, edge))
    }

    /// Removes `edge`. No-op if it does not exist.
    pub fn remove_edge(&mut self, edge: &Edge) -> &mut Self {
        let id = EdgeId::of(self.options.directed, edge);
        self.remove_edge_by_id(&id);
        self
    }

    fn remove_edge_by_id(&mut self, id: &EdgeId) {
        let Some(EdgeEntry { edge, .. }) = self.edges.swap_remove(id) else {
            return;
        };
        if let Some(target) = self.nodes.get_mut(&edge.w) {
            target.adjacency.in_edges.swap_remove(id);
            decrement_or_remove(&mut target.adjacency.preds, &edge.v);
        }
        if let Some(source) = self.nodes.get_mut(&edge.v) {
            source.adjacency.out_edges.swap_remove(id);
            decrement_or_remove(&mut source.adjacency.sucs, &edge.w);
        }
    }

    /// Edges ending at `v`, optionally only those starting at `u`. `None` if
    /// `v` is not a node.
    pub fn in_edges(&self, v: &str, u: Option<&str>) -> Option<Vec<&Edge>> {
        let entry = self.nodes.get(v)?;
        Some(
            self.resolve(&entry.adjacency.in_edges)
                .filter(|edge| u.map_or(true, |u| edge.v == u))
                .collect(),
        )
    }

    /// Edges starting at `v`, optionally only those ending at `w`. `None` if
    /// `v` is not a node.
    pub fn out_edges(&self, v: &str, w: Option<&str>) -> Option<Vec<&Edge>> {
        let entry = self.nodes.get(v)?;
        Some(
            self.resolve(&entry.adjacency.out_edges)
                .filter(|edge| w.map_or(true, |w| edge.w == w))
                .collect(),
        )
    }

    /// Every edge incident to `v`, optionally only those also touching `w`.
    /// `None` if `v` is not a node.
    pub fn node_edges(&self, v: &str, w: Option<&str>) -> Option<Vec<&Edge>> {
        let mut edges = self.in_edges(v, w)?;
        if let Some(out) = self.out_edges(v, w) {
            // Self-loops are already in the incoming half.
            edges.extend(out.into_iter().filter(|edge| edge.v != edge.w));
        }
        Some(edges)
    }

    fn resolve<'a>(&'a self, ids: &'a IndexSet<EdgeId>) -> impl Iterator<Item = &'a Edge> + 'a {
        ids.iter()
            .filter_map(move |id| self.edges.get(id))
            .map(|entry| &entry.edge)
    }

    /// Checks that the adjacency indices mirror the edge collection.
    #[cfg(test)]
    pub(crate) fn assert_consistency(&self) {
        let mut in_total = 0;
        let mut out_total = 0;
        for (v, entry) in &self.nodes {
            in_total += entry.adjacency.in_edges.len();
            out_total += entry.adjacency.out_edges.len();
            let preds: usize = entry.adjacency.preds.values().sum();
            let sucs: usize = entry.adjacency.sucs.values().sum();
            assert_eq!(preds, entry.adjacency.in_edges.len(), "pred counts of {v}");
            assert_eq!(sucs, entry.adjacency.out_edges.len(), "succ counts of {v}");
            assert!(entry.adjacency.preds.values().all(|&n| n > 0));
            assert!(entry.adjacency.sucs.values().all(|&n| n > 0));
            if let Some(hierarchy) = &self.hierarchy {
                assert!(hierarchy.contains(v), "{v} missing from hierarchy");
                if let Some(parent) = hierarchy.parent(v) {
                    assert!(self.nodes.contains_key(parent), "dangling parent of {v}");
                }
            }
        }
        assert_eq!(in_total, self.edges.len());
        assert_eq!(out_total, self.edges.len());
        for entry in self.edges.values() {
            assert!(self.nodes.contains_key(&entry.edge.v));
            assert!(self.nodes.contains_key(&entry.edge.w));
            assert!(self.options.multigraph || entry.edge.name.is_none());
        }
    }
}

fn decrement_or_remove(counts: &mut IndexMap<String, usize>, key: &str) {
    if let Some(count) = counts.get_mut(key) {
        *count -= 1;
        if *count == 0 {
            counts.swap_remove(key);
        }
    }
}

impl<N: fmt::Debug, E: fmt::Debug, G: fmt::Debug> fmt::Debug for Graph<N, E, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nodes: Vec<(&str, &N)> = self
            .nodes
            .iter()
            .map(|(v, entry)| (v.as_str(), &entry.label))
            .collect();
        let edges: Vec<(&Edge, &E)> = self
            .edges
            .values()
            .map(|entry| (&entry.edge, &entry.label))
            .collect();
        f.debug_struct("Graph")
            .field("options", &self.options)
            .field("label", &self.label)
            .field("nodes", &nodes)
            .field("edges", &edges)
            .finish_non_exhaustive()
    }
}
