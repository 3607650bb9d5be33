//! Interchange formats for graphlib graphs.
//!
//! # Modules
//!
//! - [`json`]: lossless JSON documents ([`encode`] / [`decode`])
//! - [`dot`]: Graphviz DOT text export ([`write_dot`])
//! - [`error`]: [`IoError`]
//!
//! Both formats read graphs only through the public [`Graph`] API; labels are
//! converted with `serde`, so any `Serialize` label type can be exported.
//!
//! [`Graph`]: graphlib_core::Graph

pub mod dot;
pub mod error;
pub mod json;

// Re-export key types for ergonomic use.
pub use dot::{write_dot, write_dot_indented};
pub use error::IoError;
pub use json::{
    decode, encode, from_json_str, from_json_value, to_json_string, to_json_value, EdgeRecord,
    GraphDocument, NodeRecord,
};
