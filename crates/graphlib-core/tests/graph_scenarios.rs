//! End-to-end scenarios for the public graph API.
//!
//! Covers:
//! - No-clobber re-setting of nodes and edges
//! - Undirected canonicalization
//! - Cycle rejection in compound graphs
//! - Node removal bookkeeping
//! - Multigraph edge distinctness
//! - Sources, sinks and adjacency on a small DAG

use graphlib_core::{Edge, Graph, GraphError, GraphOptions};

fn sorted<'a>(mut ids: Vec<&'a str>) -> Vec<&'a str> {
    ids.sort_unstable();
    ids
}

#[test]
fn node_reset_without_label_is_idempotent() {
    let mut g: Graph<String> = Graph::default();
    g.set_default_node_label(|v| v.to_uppercase());
    g.set_node("a");
    g.set_default_node_label(|_| "changed".to_string());
    g.set_node("a");
    assert_eq!(g.node("a").map(String::as_str), Some("A"));
}

#[test]
fn undirected_edge_found_in_either_order() {
    let mut g: Graph = Graph::new(GraphOptions::undirected());
    g.set_edge("a", "b");
    assert!(g.has_edge(&Edge::new("b", "a")));

    let mut h: Graph = Graph::new(GraphOptions::undirected());
    h.set_edge("b", "a");
    assert_eq!(
        g.edges().collect::<Vec<_>>(),
        h.edges().collect::<Vec<_>>()
    );
    assert_eq!(h.edges().next(), Some(&Edge::new("a", "b")));
}

#[test]
fn reverse_parent_is_a_cycle() {
    let mut g: Graph = Graph::new(GraphOptions::default().with_compound(true));
    g.set_parent("a", Some("b")).unwrap();

    let err = g.set_parent("b", Some("a")).unwrap_err();
    assert_eq!(
        err,
        GraphError::Cycle {
            node: "b".into(),
            parent: "a".into()
        }
    );
    assert_eq!(g.parent("a"), Some("b"));
    assert_eq!(g.parent("b"), None);
}

#[test]
fn remove_node_accounts_for_incident_edges() {
    let mut g: Graph = Graph::new(GraphOptions::default().with_compound(true));
    g.set_edge("x", "v").set_edge("v", "y").set_edge("v", "v").set_edge("x", "y");
    g.set_parent("c1", Some("v")).unwrap();
    g.set_parent("c2", Some("v")).unwrap();

    let incident = g.node_edges("v", None).unwrap().len();
    assert_eq!(incident, 3);
    let before = g.edge_count();

    g.remove_node("v");
    assert_eq!(g.edge_count(), before - incident);
    assert!(!g.has_node("v"));
    assert_eq!(g.parent("c1"), None);
    assert_eq!(g.parent("c2"), None);
    assert!(g.has_edge(&Edge::new("x", "y")));
}

#[test]
fn multigraph_edges_are_distinct() {
    let mut g: Graph<(), &str> = Graph::new(GraphOptions::default().with_multigraph(true));
    g.set_named_edge("a", "b", "x", Some("L1")).unwrap();
    g.set_named_edge("a", "b", "y", Some("L2")).unwrap();

    let mut names: Vec<_> = g
        .node_edges("a", Some("b"))
        .unwrap()
        .into_iter()
        .filter_map(|e| e.name.as_deref())
        .collect();
    names.sort_unstable();
    assert_eq!(names, vec!["x", "y"]);

    g.remove_edge(&Edge::named("a", "b", "x"));
    assert_eq!(g.edge_count(), 1);
    assert_eq!(g.edge(&Edge::named("a", "b", "y")), Some(&"L2"));
}

#[test]
fn named_edge_on_simple_graph_is_rejected() {
    let mut g: Graph = Graph::default();
    g.set_node("a");
    let err = g
        .set_edge_obj(Edge::named("a", "b", "x"), None)
        .unwrap_err();
    assert!(matches!(err, GraphError::MultiEdgeNotAllowed { .. }));
    assert!(!g.has_node("b"));
    assert_eq!(g.edge_count(), 0);
}

#[test]
fn small_dag_queries() {
    let mut g: Graph = Graph::default();
    g.set_nodes(["a", "b", "c"]);
    g.set_edge("a", "b").set_edge("b", "c").set_edge("a", "c");

    assert_eq!(g.sources(), vec!["a"]);
    assert_eq!(g.sinks(), vec!["c"]);
    assert_eq!(sorted(g.successors("a").unwrap()), vec!["b", "c"]);
    assert_eq!(g.neighbors("d"), None);
}

#[test]
fn set_parent_on_flat_graph_is_unsupported() {
    let mut g: Graph = Graph::default();
    g.set_node("a");
    assert_eq!(g.set_parent("a", None).unwrap_err(), GraphError::NotCompound);
}
