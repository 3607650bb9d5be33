//! JSON documents for graphs.
//!
//! [`encode`] flattens a [`Graph`] into a [`GraphDocument`];
//! [`decode`] rebuilds a graph by replaying the document through the normal
//! mutation API: options first, then the graph label, then every node (and its
//! parent), then every edge. Nodes are replayed before edges so that edge
//! endpoints resolve to the labelled nodes rather than defaults.
//!
//! Document layout:
//!
//! ```json
//! {
//!   "options": { "directed": true, "multigraph": false, "compound": false },
//!   "value": <graph label>,
//!   "nodes": [ { "v": "a", "value": <label>, "parent": "p" } ],
//!   "edges": [ { "v": "a", "w": "b", "name": "x", "value": <label> } ]
//! }
//! ```
//!
//! Node and edge labels that serialize to `null` are left out and come back as
//! the default label. The graph label is written whenever one is set, even if
//! it is `null`, so `"value": null` and a missing `value` decode differently.

use graphlib_core::{Edge, Graph, GraphOptions};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::IoError;

/// A graph flattened into plain records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub options: GraphOptions,
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

/// One node, with its label and compound parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub v: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// One edge, with its name and label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub v: String,
    pub w: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// Flattens `g` into a [`GraphDocument`].
pub fn encode<N, E, G>(g: &Graph<N, E, G>) -> Result<GraphDocument, IoError>
where
    N: Serialize,
    E: Serialize,
    G: Serialize,
{
    let value = g.graph().map(serde_json::to_value).transpose()?;

    let nodes = g
        .nodes()
        .map(|v| -> Result<NodeRecord, IoError> {
            Ok(NodeRecord {
                v: v.to_string(),
                value: g.node(v).map(label_value).transpose()?.flatten(),
                parent: g.parent(v).map(str::to_string),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let edges = g
        .edges()
        .map(|e| -> Result<EdgeRecord, IoError> {
            Ok(EdgeRecord {
                v: e.v.clone(),
                w: e.w.clone(),
                name: e.name.clone(),
                value: g.edge(e).map(label_value).transpose()?.flatten(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(nodes = nodes.len(), edges = edges.len(), "encoded graph document");
    Ok(GraphDocument {
        options: g.options(),
        value,
        nodes,
        edges,
    })
}

/// Rebuilds a graph from a [`GraphDocument`].
///
/// A node entry without a value gets the default label; an edge entry without
/// a value likewise. Fails if a label does not fit the requested types or if
/// the document describes a structure the options forbid.
pub fn decode<N, E, G>(doc: GraphDocument) -> Result<Graph<N, E, G>, IoError>
where
    N: DeserializeOwned + Default + 'static,
    E: DeserializeOwned + Default + 'static,
    G: DeserializeOwned,
{
    debug!(
        nodes = doc.nodes.len(),
        edges = doc.edges.len(),
        "decoding graph document"
    );

    let mut g = Graph::new(doc.options);
    if let Some(value) = doc.value {
        g.set_graph(serde_json::from_value(value)?);
    }

    for node in doc.nodes {
        match node.value {
            Some(value) => g.set_node_with(&node.v, serde_json::from_value(value)?),
            None => g.set_node(&node.v),
        };
        if let Some(parent) = node.parent.as_deref() {
            g.set_parent(&node.v, Some(parent))?;
        }
    }

    for edge in doc.edges {
        let label = edge.value.map(serde_json::from_value).transpose()?;
        let descriptor = Edge {
            v: edge.v,
            w: edge.w,
            name: edge.name,
        };
        g.set_edge_obj(descriptor, label)?;
    }

    Ok(g)
}

/// Encodes `g` as a JSON value.
pub fn to_json_value<N, E, G>(g: &Graph<N, E, G>) -> Result<Value, IoError>
where
    N: Serialize,
    E: Serialize,
    G: Serialize,
{
    Ok(serde_json::to_value(encode(g)?)?)
}

/// Encodes `g` as pretty-printed JSON text.
pub fn to_json_string<N, E, G>(g: &Graph<N, E, G>) -> Result<String, IoError>
where
    N: Serialize,
    E: Serialize,
    G: Serialize,
{
    Ok(serde_json::to_string_pretty(&encode(g)?)?)
}

/// Decodes a graph from a JSON value.
pub fn from_json_value<N, E, G>(value: Value) -> Result<Graph<N, E, G>, IoError>
where
    N: DeserializeOwned + Default + 'static,
    E: DeserializeOwned + Default + 'static,
    G: DeserializeOwned,
{
    decode(serde_json::from_value(value)?)
}

/// Decodes a graph from JSON text.
pub fn from_json_str<N, E, G>(text: &str) -> Result<Graph<N, E, G>, IoError>
where
    N: DeserializeOwned + Default + 'static,
    E: DeserializeOwned + Default + 'static,
    G: DeserializeOwned,
{
    decode(serde_json::from_str(text)?)
}

/// A present `value` key is kept even when it holds `null`; only a missing key
/// becomes `None`.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn label_value<T: Serialize>(label: &T) -> Result<Option<Value>, IoError> {
    match serde_json::to_value(label)? {
        Value::Null => Ok(None),
        value => Ok(Some(value)),
    }
}
