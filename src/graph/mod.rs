//! Core graph implementation
//!
//! This module implements the labelled graph data model with:
//! - Directed or undirected edges, identified by `(v, w, name)`
//! - Multiple named edges between the same nodes (multigraph mode)
//! - Nodes nested under parent nodes (compound mode)
//! - Insertion-ordered, hash-indexed in-memory storage

pub mod store;
pub mod types;

// Re-export main types
pub use store::{EdgeLabelFn, Graph, GraphError, GraphResult, NodeLabelFn};
pub use types::{EdgeKey, GraphOptions};
