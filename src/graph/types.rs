//! Core type definitions for the graph store

use serde::{Deserialize, Serialize};
use std::fmt;

pub use graphlib_algorithms::EdgeKey;

/// Construction-time configuration of a [`Graph`](super::Graph).
///
/// Fixed once the graph exists. Also the `options` block of the JSON form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    /// Edges have a direction (default `true`)
    pub directed: bool,
    /// More than one edge may join the same pair, told apart by name (default `false`)
    pub multigraph: bool,
    /// Nodes may be nested under a parent node (default `false`)
    pub compound: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        GraphOptions {
            directed: true,
            multigraph: false,
            compound: false,
        }
    }
}

impl GraphOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    pub fn multigraph(mut self, multigraph: bool) -> Self {
        self.multigraph = multigraph;
        self
    }

    pub fn compound(mut self, compound: bool) -> Self {
        self.compound = compound;
        self
    }
}

impl fmt::Display for GraphOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            if self.directed { "directed" } else { "undirected" },
            if self.multigraph { ", multigraph" } else { "" },
            if self.compound { ", compound" } else { "" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = GraphOptions::default();
        assert!(options.directed);
        assert!(!options.multigraph);
        assert!(!options.compound);
        assert_eq!(format!("{}", options), "directed");
    }

    #[test]
    fn test_builder() {
        let options = GraphOptions::new().directed(false).multigraph(true).compound(true);
        assert_eq!(format!("{}", options), "undirected, multigraph, compound");
    }

    #[test]
    fn test_partial_options_deserialize_with_defaults() {
        let options: GraphOptions = serde_json::from_str(r#"{"compound": true}"#).unwrap();
        assert_eq!(options, GraphOptions::new().compound(true));
    }
}
