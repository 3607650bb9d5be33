//! Graph document CLI.
//!
//! Provides the `graphlib` binary, which reads a JSON graph document (as
//! written by `graphlib_io::to_json_string`) from a file or stdin and prints
//! it as DOT, as its connected components, or as a short summary.
//!
//! Labels are kept as raw JSON values, so any document decodes regardless of
//! what its labels hold.

use std::io::Read;
use std::process;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use graphlib_core::{Graph, GraphOptions};
use graphlib_io::IoError;

type JsonGraph = Graph<Value, Value, Value>;

/// Inspect and convert graph documents.
#[derive(Parser)]
#[command(name = "graphlib", about = "Inspect and convert graph documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Print the graph in Graphviz DOT format.
    Dot {
        /// Path to the graph document, or `-` for stdin.
        file: String,

        /// Indentation added per nesting level.
        #[arg(long, default_value = "")]
        indent: String,
    },
    /// Print the connected components as a JSON array of node lists.
    Components {
        /// Path to the graph document, or `-` for stdin.
        file: String,
    },
    /// Print a JSON summary of the graph.
    Info {
        /// Path to the graph document, or `-` for stdin.
        file: String,
    },
}

/// What `info` prints.
#[derive(Debug, Serialize)]
struct Summary<'a> {
    options: GraphOptions,
    nodes: usize,
    edges: usize,
    sources: Vec<&'a str>,
    sinks: Vec<&'a str>,
}

impl<'a> Summary<'a> {
    fn of(g: &'a JsonGraph) -> Self {
        Summary {
            options: g.options(),
            nodes: g.node_count(),
            edges: g.edge_count(),
            sources: g.sources(),
            sinks: g.sinks(),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    process::exit(run(cli.command));
}

/// Execute a subcommand.
///
/// Returns exit code: 0 = success, 1 = graph or codec error, 3 = I/O error.
fn run(command: Commands) -> i32 {
    let file = match &command {
        Commands::Dot { file, .. } | Commands::Components { file } | Commands::Info { file } => {
            file.as_str()
        }
    };

    let text = match read_input(file) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: failed to read '{}': {}", file, e);
            return 3;
        }
    };

    let graph: JsonGraph = match graphlib_io::from_json_str(&text) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Error: invalid graph document '{}': {}", file, e);
            return 1;
        }
    };
    info!(
        file,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded graph"
    );

    match render(&command, &graph) {
        Ok(out) => {
            println!("{}", out);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

/// Produces the text a subcommand prints for `graph`.
fn render(command: &Commands, graph: &JsonGraph) -> Result<String, IoError> {
    match command {
        Commands::Dot { indent, .. } => {
            let dot = graphlib_io::write_dot_indented(graph, indent)?;
            Ok(dot.trim_end().to_string())
        }
        Commands::Components { .. } => {
            let groups = graphlib_alg::components(graph);
            Ok(serde_json::to_string_pretty(&groups)?)
        }
        Commands::Info { .. } => Ok(serde_json::to_string_pretty(&Summary::of(graph))?),
    }
}

fn read_input(path: &str) -> std::io::Result<String> {
    if path == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
    }
}
