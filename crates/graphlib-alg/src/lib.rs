//! Algorithms over [`graphlib_core::Graph`].
//!
//! Everything here reads the graph through its public query API only; nothing
//! mutates it.

pub mod components;

pub use components::components;
