//! Connected components.

use std::collections::HashSet;

use graphlib_core::Graph;
use tracing::debug;

/// Partitions the nodes of `g` into connected components.
///
/// Edge direction is ignored: two nodes share a component when a path joins
/// them through [`Graph::neighbors`]. Every node appears in exactly one group.
/// Traversal uses an explicit stack, so long chains do not grow the call stack.
pub fn components<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<&str>> {
    let mut visited: HashSet<&str> = HashSet::with_capacity(g.node_count());
    let mut groups = Vec::new();

    for start in g.nodes() {
        if !visited.insert(start) {
            continue;
        }
        let mut group = Vec::new();
        let mut stack = vec![start];
        while let Some(v) = stack.pop() {
            group.push(v);
            for w in g.neighbors(v).unwrap_or_default() {
                if visited.insert(w) {
                    stack.push(w);
                }
            }
        }
        groups.push(group);
    }

    debug!(
        nodes = g.node_count(),
        components = groups.len(),
        "computed connected components"
    );
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    use graphlib_core::GraphOptions;

    fn normalized(groups: Vec<Vec<&str>>) -> Vec<Vec<&str>> {
        let mut groups: Vec<Vec<&str>> = groups
            .into_iter()
            .map(|mut group| {
                group.sort_unstable();
                group
            })
            .collect();
        groups.sort();
        groups
    }

    #[test]
    fn empty_graph_has_no_components() {
        let g: Graph = Graph::default();
        assert!(components(&g).is_empty());
    }

    #[test]
    fn isolated_nodes_are_singletons() {
        let mut g: Graph = Graph::default();
        g.set_nodes(["a", "b"]);
        assert_eq!(normalized(components(&g)), vec![vec!["a"], vec!["b"]]);
    }

    #[test]
    fn direction_is_ignored() {
        let mut g: Graph = Graph::default();
        g.set_edge("a", "b").set_edge("c", "b");
        g.set_edge("x", "y");
        g.set_node("z");
        assert_eq!(
            normalized(components(&g)),
            vec![vec!["a", "b", "c"], vec!["x", "y"], vec!["z"]]
        );
    }

    #[test]
    fn undirected_cycle_with_self_loop() {
        let mut g: Graph = Graph::new(GraphOptions::undirected());
        g.set_path(["a", "b", "c", "a"]);
        g.set_edge("d", "d");
        assert_eq!(
            normalized(components(&g)),
            vec![vec!["a", "b", "c"], vec!["d"]]
        );
    }

    #[test]
    fn long_chain_is_one_component() {
        let mut g: Graph = Graph::default();
        let ids: Vec<String> = (0..50_000).map(|i| i.to_string()).collect();
        g.set_path(ids.iter().map(String::as_str));
        let groups = components(&g);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 50_000);
    }
}
