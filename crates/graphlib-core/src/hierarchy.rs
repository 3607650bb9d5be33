//! Parent/child nesting for compound graphs.
//!
//! [`Hierarchy`] tracks, for every node of a compound graph, which node it is
//! nested under. Nodes without an explicit parent hang off a virtual root that
//! is not itself a node. The parent relation is kept a forest: callers check
//! [`Hierarchy::is_ancestor`] before reattaching.

use std::collections::HashMap;

use indexmap::IndexSet;

/// Parent/child relations over node ids.
#[derive(Debug, Clone, Default)]
pub(crate) struct Hierarchy {
    /// Child -> parent. Top-level nodes have no entry.
    parent: HashMap<String, String>,
    /// Node -> direct children.
    children: HashMap<String, IndexSet<String>>,
    /// Direct children of the virtual root.
    roots: IndexSet<String>,
}

impl Hierarchy {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers a freshly created node as a top-level node.
    pub(crate) fn insert(&mut self, v: &str) {
        self.children.entry(v.to_string()).or_default();
        self.roots.insert(v.to_string());
    }

    /// Returns `true` if `v` is registered.
    #[cfg(test)]
    pub(crate) fn contains(&self, v: &str) -> bool {
        self.children.contains_key(v)
    }

    /// Drops `v` from the hierarchy. Its children are moved to the top level.
    pub(crate) fn remove(&mut self, v: &str) {
        self.detach(v);
        if let Some(kids) = self.children.remove(v) {
            for child in kids {
                self.parent.remove(&child);
                self.roots.insert(child);
            }
        }
    }

    /// Returns the parent of `v`, or `None` when `v` is top-level or unknown.
    pub(crate) fn parent(&self, v: &str) -> Option<&str> {
        self.parent.get(v).map(String::as_str)
    }

    /// Returns the direct children of `v`, or `None` if `v` is unknown.
    pub(crate) fn children(&self, v: &str) -> Option<Vec<&str>> {
        self.children
            .get(v)
            .map(|kids| kids.iter().map(String::as_str).collect())
    }

    /// Returns the top-level nodes.
    pub(crate) fn roots(&self) -> Vec<&str> {
        self.roots.iter().map(String::as_str).collect()
    }

    /// Returns `true` if `v` is `start` or one of its ancestors.
    pub(crate) fn is_ancestor(&self, v: &str, start: &str) -> bool {
        let mut current = Some(start);
        while let Some(node) = current {
            if node == v {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Moves `v` under `parent`, or to the top level when `parent` is `None`.
    ///
    /// Both nodes must already be registered and the move must not create a
    /// cycle; the caller checks both.
    pub(crate) fn attach(&mut self, v: &str, parent: Option<&str>) {
        self.detach(v);
        match parent {
            Some(parent) => {
                self.parent.insert(v.to_string(), parent.to_string());
                self.children
                    .entry(parent.to_string())
                    .or_default()
                    .insert(v.to_string());
            }
            None => {
                self.roots.insert(v.to_string());
            }
        }
    }

    fn detach(&mut self, v: &str) {
        match self.parent.remove(v) {
            Some(old) => {
                if let Some(siblings) = self.children.get_mut(&old) {
                    siblings.swap_remove(v);
                }
            }
            None => {
                self.roots.swap_remove(v);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Hierarchy {
        let mut h = Hierarchy::new();
        for v in ["a", "b", "c"] {
            h.insert(v);
        }
        h.attach("b", Some("a"));
        h.attach("c", Some("b"));
        h
    }

    #[test]
    fn new_nodes_are_top_level() {
        let mut h = Hierarchy::new();
        h.insert("x");
        assert_eq!(h.roots(), vec!["x"]);
        assert_eq!(h.parent("x"), None);
        assert_eq!(h.children("x"), Some(vec![]));
    }

    #[test]
    fn attach_moves_between_parents() {
        let mut h = tree();
        assert_eq!(h.roots(), vec!["a"]);
        assert_eq!(h.parent("c"), Some("b"));

        h.attach("c", Some("a"));
        assert_eq!(h.parent("c"), Some("a"));
        assert_eq!(h.children("b"), Some(vec![]));
        let mut kids = h.children("a").unwrap();
        kids.sort();
        assert_eq!(kids, vec!["b", "c"]);
    }

    #[test]
    fn attach_none_returns_to_top_level() {
        let mut h = tree();
        h.attach("c", None);
        assert_eq!(h.parent("c"), None);
        assert!(h.roots().contains(&"c"));
        assert_eq!(h.children("b"), Some(vec![]));
    }

    #[test]
    fn ancestor_walk() {
        let h = tree();
        assert!(h.is_ancestor("a", "c"));
        assert!(h.is_ancestor("c", "c"));
        assert!(!h.is_ancestor("c", "a"));
        assert!(!h.is_ancestor("a", "unknown"));
    }

    #[test]
    fn remove_promotes_children() {
        let mut h = tree();
        h.remove("b");
        assert!(!h.contains("b"));
        assert_eq!(h.parent("c"), None);
        assert_eq!(h.children("a"), Some(vec![]));
        let mut roots = h.roots();
        roots.sort();
        assert_eq!(roots, vec!["a", "c"]);
    }

    #[test]
    fn unknown_node_has_no_children_entry() {
        let h = tree();
        assert_eq!(h.children("zzz"), None);
    }
}
