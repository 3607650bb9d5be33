//! Induced subgraphs selected by a node predicate.

use std::collections::HashMap;

use crate::graph::Graph;

impl<N: Clone, E: Clone, G: Clone> Graph<N, E, G> {
    /// Builds a new graph holding the nodes for which `keep` returns `true`
    /// and the edges between them, with their labels.
    ///
    /// The copy has the same options, graph label and default-label
    /// generators. In compound mode every kept node is nested under its
    /// nearest kept ancestor, or placed at the top level if it has none.
    pub fn filter_nodes<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&str) -> bool,
    {
        let mut copy = Graph {
            options: self.options,
            label: self.label.clone(),
            default_node_label: self.default_node_label.clone(),
            default_edge_label: self.default_edge_label.clone(),
            nodes: Default::default(),
            edges: Default::default(),
            hierarchy: self.hierarchy.as_ref().map(|_| Default::default()),
        };

        for (v, entry) in &self.nodes {
            if keep(v.as_str()) {
                copy.set_node_with(v, entry.label.clone());
            }
        }

        for entry in self.edges.values() {
            if copy.has_node(&entry.edge.v) && copy.has_node(&entry.edge.w) {
                copy.upsert_edge(entry.edge.clone(), Some(entry.label.clone()));
            }
        }

        if self.hierarchy.is_some() {
            // Excluded node -> nearest kept ancestor above it.
            let mut memo: HashMap<&str, Option<&str>> = HashMap::new();
            for v in self.nodes() {
                if !copy.has_node(v) {
                    continue;
                }
                let parent = self.nearest_kept_ancestor(v, &copy, &mut memo);
                if let Some(hierarchy) = copy.hierarchy.as_mut() {
                    hierarchy.attach(v, parent);
                }
            }
        }

        copy
    }

    /// Walks up from `v` until a node present in `copy` is found.
    ///
    /// Every excluded node passed on the way is memoized with the result, so
    /// each chain is walked once no matter how many kept nodes share it.
    fn nearest_kept_ancestor<'a>(
        &'a self,
        v: &str,
        copy: &Self,
        memo: &mut HashMap<&'a str, Option<&'a str>>,
    ) -> Option<&'a str> {
        let mut skipped = Vec::new();
        let mut current = self.parent(v);
        let found = loop {
            match current {
                None => break None,
                Some(p) if copy.has_node(p) => break Some(p),
                Some(p) => {
                    if let Some(&hit) = memo.get(p) {
                        break hit;
                    }
                    skipped.push(p);
                    current = self.parent(p);
                }
            }
        };
        for p in skipped {
            memo.insert(p, found);
        }
        found
    }
}
