//! graphlib
//!
//! An in-memory graph library: directed or undirected graphs with optional
//! multi-edges and optional node nesting, plus the classic algorithms over
//! them.
//!
//! # Architecture
//!
//! - [`graph`]: the [`Graph`] store. Nodes are keyed by string id, edges by
//!   [`EdgeKey`] `(v, w, name)`; nodes, edges and the graph itself carry
//!   optional labels of caller-chosen types.
//! - [`algo`]: the algorithm suite from the `graphlib-algorithms` crate,
//!   which runs against the read-only `GraphView` trait that `Graph`
//!   implements.
//! - [`json`]: conversion to and from a JSON document.
//!
//! ## Example Usage
//!
//! ```rust
//! use graphlib::algo::{dijkstra, out_edges_of, topsort, unit_weight};
//! use graphlib::{Graph, GraphOptions};
//!
//! // Create a directed graph with string node labels
//! let mut g: Graph<&str> = Graph::with_options(GraphOptions::new());
//! g.set_node("a", "start");
//! g.set_path(&["a", "b", "c"], None);
//!
//! assert_eq!(g.node("a"), Some(&"start"));
//! assert_eq!(g.successors("a"), Some(vec!["b"]));
//!
//! // Run algorithms
//! let order = topsort(&g).unwrap();
//! assert_eq!(order, vec!["a", "b", "c"]);
//!
//! let paths = dijkstra(&g, "a", unit_weight, out_edges_of(&g)).unwrap();
//! assert_eq!(paths["c"].distance, 2.0);
//! assert_eq!(paths["c"].predecessor.as_deref(), Some("b"));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod graph;
pub mod json;

// Re-export main types for convenience
pub use graph::{EdgeKey, EdgeLabelFn, Graph, GraphError, GraphOptions, GraphResult, NodeLabelFn};

pub use algo::{AlgoError, AlgoResult};

pub use json::{JsonError, JsonGraph, JsonResult};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
