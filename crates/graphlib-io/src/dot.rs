//! Graphviz DOT export.
//!
//! Labels are turned into attribute lists through `serde_json`: a label that
//! serializes to a JSON object contributes one `key=value` pair per entry, in
//! field order. Any other label contributes nothing.
//!
//! In compound graphs, a node with children becomes a `subgraph` block holding
//! its own attributes and its children; leaves become node statements.

use graphlib_core::{Edge, Graph};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::IoError;

/// Writes `g` as DOT text with no indentation.
pub fn write_dot<N, E, G>(g: &Graph<N, E, G>) -> Result<String, IoError>
where
    N: Serialize,
    E: Serialize,
    G: Serialize,
{
    write_dot_indented(g, "")
}

/// Writes `g` as DOT text, indenting each nesting level by `indent`.
pub fn write_dot_indented<N, E, G>(g: &Graph<N, E, G>, indent: &str) -> Result<String, IoError>
where
    N: Serialize,
    E: Serialize,
    G: Serialize,
{
    let connector = if g.is_directed() { "->" } else { "--" };
    let mut writer = Writer::new(indent);

    if !g.is_multigraph() {
        writer.write("strict ");
    }
    writer.write_line(if g.is_directed() { "digraph {" } else { "graph {" });
    writer.indent();

    if let Some(label) = g.graph() {
        for (key, value) in attributes(label)? {
            writer.write_line(&format!("{}={};", quote_id(&key), value_id(&value)));
        }
    }

    write_nodes(g, &mut writer)?;

    for edge in g.edges() {
        write_edge(g, edge, connector, &mut writer)?;
    }

    writer.unindent();
    writer.write_line("}");

    debug!(
        nodes = g.node_count(),
        edges = g.edge_count(),
        "exported graph as dot"
    );
    Ok(writer.finish())
}

/// Writes every node, opening a `subgraph` block for each compound parent.
///
/// Open blocks are tracked on an explicit stack of child iterators, so deep
/// hierarchies do not grow the call stack.
fn write_nodes<N, E, G>(g: &Graph<N, E, G>, writer: &mut Writer<'_>) -> Result<(), IoError>
where
    N: Serialize,
{
    let top = if g.is_compound() {
        g.children(None).unwrap_or_default()
    } else {
        g.nodes().collect()
    };

    let mut stack = vec![top.into_iter()];
    while let Some(frame) = stack.last_mut() {
        let Some(v) = frame.next() else {
            stack.pop();
            if !stack.is_empty() {
                writer.unindent();
                writer.write_line("}");
            }
            continue;
        };

        let kids = if g.is_compound() {
            g.children(Some(v)).unwrap_or_default()
        } else {
            Vec::new()
        };
        if kids.is_empty() {
            write_node(g, v, writer)?;
            continue;
        }

        writer.write_line(&format!("subgraph {} {{", quote_id(v)));
        writer.indent();
        if let Some(label) = g.node(v) {
            for (key, value) in attributes(label)? {
                writer.write_line(&format!("{}={};", quote_id(&key), value_id(&value)));
            }
        }
        stack.push(kids.into_iter());
    }
    Ok(())
}

fn write_node<N, E, G>(g: &Graph<N, E, G>, v: &str, writer: &mut Writer<'_>) -> Result<(), IoError>
where
    N: Serialize,
{
    writer.write(&quote_id(v));
    if let Some(label) = g.node(v) {
        write_attrs(label, writer)?;
    }
    writer.write_line("");
    Ok(())
}

fn write_edge<N, E, G>(
    g: &Graph<N, E, G>,
    edge: &Edge,
    connector: &str,
    writer: &mut Writer<'_>,
) -> Result<(), IoError>
where
    E: Serialize,
{
    writer.write(&format!(
        "{} {} {}",
        quote_id(&edge.v),
        connector,
        quote_id(&edge.w)
    ));
    if let Some(label) = g.edge(edge) {
        write_attrs(label, writer)?;
    }
    writer.write_line("");
    Ok(())
}

fn write_attrs<T: Serialize>(label: &T, writer: &mut Writer<'_>) -> Result<(), IoError> {
    let attrs = attributes(label)?;
    if !attrs.is_empty() {
        let parts: Vec<String> = attrs
            .iter()
            .map(|(key, value)| format!("{}={}", quote_id(key), value_id(value)))
            .collect();
        writer.write(&format!(" [{}]", parts.join(",")));
    }
    Ok(())
}

fn attributes<T: Serialize>(label: &T) -> Result<Vec<(String, Value)>, IoError> {
    match serde_json::to_value(label)? {
        Value::Object(map) => Ok(map.into_iter().collect()),
        _ => Ok(Vec::new()),
    }
}

/// Numbers are written bare; strings and everything else go through
/// [`quote_id`], nested values as their JSON text.
fn value_id(value: &Value) -> String {
    match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote_id(s),
        Value::Bool(b) => quote_id(&b.to_string()),
        Value::Null => quote_id("null"),
        nested => quote_id(&nested.to_string()),
    }
}

/// Leaves DOT identifiers bare and quotes everything else.
fn quote_id(id: &str) -> String {
    if is_bare_id(id) {
        id.to_string()
    } else {
        format!("\"{}\"", id.replace('"', "\\\""))
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`, where any non-ASCII character counts as a letter.
fn is_bare_id(id: &str) -> bool {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || !first.is_ascii() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || !c.is_ascii())
        }
        _ => false,
    }
}

/// Line-oriented text buffer that indents the first write of each line.
struct Writer<'a> {
    unit: &'a str,
    depth: usize,
    out: String,
    line_start: bool,
}

impl<'a> Writer<'a> {
    fn new(unit: &'a str) -> Self {
        Writer {
            unit,
            depth: 0,
            out: String::new(),
            line_start: true,
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn unindent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn write(&mut self, text: &str) {
        if self.line_start {
            self.line_start = false;
            self.out.push_str(&self.unit.repeat(self.depth));
        }
        self.out.push_str(text);
    }

    fn write_line(&mut self, text: &str) {
        self.write(text);
        self.out.push('\n');
        self.line_start = true;
    }

    fn finish(self) -> String {
        self.out
    }
}
