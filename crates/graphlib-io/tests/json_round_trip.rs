//! Encoding a graph and decoding it again preserves its structure.

use graphlib_core::{Edge, Graph, GraphOptions};
use graphlib_io::{decode, encode, from_json_str, to_json_string};
use proptest::prelude::*;

type Labelled = Graph<Option<u32>, Option<String>, String>;

#[derive(Debug, Clone)]
enum Op {
    Node(u8, Option<u32>),
    Edge(u8, u8, Option<u8>, Option<String>),
    Parent(u8, Option<u8>),
}

fn id(i: u8) -> String {
    format!("n{i}")
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..8, proptest::option::of(any::<u32>())).prop_map(|(v, l)| Op::Node(v, l)),
        (
            0u8..8,
            0u8..8,
            proptest::option::of(0u8..3),
            proptest::option::of("[a-z]{0,4}"),
        )
            .prop_map(|(v, w, n, l)| Op::Edge(v, w, n, l)),
        (0u8..8, proptest::option::of(0u8..8)).prop_map(|(v, p)| Op::Parent(v, p)),
    ]
}

fn build(directed: bool, ops: &[Op]) -> Labelled {
    let opts = GraphOptions {
        directed,
        multigraph: true,
        compound: true,
    };
    let mut g: Labelled = Graph::new(opts);
    g.set_graph("doc".to_string());
    for op in ops {
        match op {
            Op::Node(v, label) => {
                g.set_node_with(&id(*v), *label);
            }
            Op::Edge(v, w, name, label) => {
                let edge = Edge {
                    v: id(*v),
                    w: id(*w),
                    name: name.map(|n| format!("e{n}")),
                };
                g.set_edge_obj(edge, Some(label.clone())).unwrap();
            }
            Op::Parent(v, parent) => {
                let parent = parent.map(id);
                // Cycles are rejected and leave the graph unchanged.
                let _ = g.set_parent(&id(*v), parent.as_deref());
            }
        }
    }
    g
}

fn assert_same(a: &Labelled, b: &Labelled) {
    assert_eq!(a.options(), b.options());
    assert_eq!(a.graph(), b.graph());
    assert_eq!(a.node_count(), b.node_count());
    assert_eq!(a.edge_count(), b.edge_count());
    for v in a.nodes() {
        // A `None` node label encodes as absent and decodes to the default,
        // which for `Option` is `None` again.
        assert_eq!(a.node(v), b.node(v), "label of {v}");
        assert_eq!(a.parent(v), b.parent(v), "parent of {v}");
    }
    for e in a.edges() {
        assert_eq!(a.edge(e), b.edge(e), "label of {e}");
    }
}

proptest! {
    #[test]
    fn decode_inverts_encode(directed in any::<bool>(), ops in prop::collection::vec(op_strategy(), 0..40)) {
        let g = build(directed, &ops);
        let back: Labelled = decode(encode(&g).unwrap()).unwrap();
        assert_same(&g, &back);
    }

    #[test]
    fn text_round_trip(ops in prop::collection::vec(op_strategy(), 0..20)) {
        let g = build(true, &ops);
        let text = to_json_string(&g).unwrap();
        let back: Labelled = from_json_str(&text).unwrap();
        assert_same(&g, &back);
    }
}

#[test]
fn unit_graph_label_round_trips() {
    let mut g: Graph = Graph::default();
    g.set_graph(());
    g.set_edge("a", "b");

    let back: Graph = decode(encode(&g).unwrap()).unwrap();
    assert_eq!(back.graph(), Some(&()));
    assert!(back.has_edge(&Edge::new("a", "b")));

    let unset: Graph = decode(encode(&Graph::<()>::default()).unwrap()).unwrap();
    assert_eq!(unset.graph(), None);
}

#[test]
fn none_graph_label_round_trips_through_text() {
    let mut g: Graph<(), (), Option<String>> = Graph::default();
    g.set_graph(None);

    let text = to_json_string(&g).unwrap();
    let back: Graph<(), (), Option<String>> = from_json_str(&text).unwrap();
    assert_eq!(back.graph(), Some(&None));
}

#[test]
fn document_snapshot() {
    let mut g: Labelled = Graph::new(GraphOptions::default().with_compound(true));
    g.set_graph("doc".to_string());
    g.set_parent("a", Some("p")).unwrap();
    g.set_node_with("a", Some(7));
    g.set_edge_with("a", "b", Some("ab".to_string()));

    insta::assert_json_snapshot!(encode(&g).unwrap(), @r#"
    {
      "options": {
        "directed": true,
        "multigraph": false,
        "compound": true
      },
      "value": "doc",
      "nodes": [
        {
          "v": "p"
        },
        {
          "v": "a",
          "value": 7,
          "parent": "p"
        },
        {
          "v": "b"
        }
      ],
      "edges": [
        {
          "v": "a",
          "w": "b",
          "value": "ab"
        }
      ]
    }
    "#);
}
