//! Graph algorithms module
//!
//! Algorithms are implemented in the `graphlib-algorithms` crate against its
//! `GraphView` trait. This module provides the integration/adapter layer:
//! the `GraphView` impl for [`Graph`] and builders for results that are
//! themselves graphs.

use crate::graph::{EdgeKey, Graph, GraphOptions};
use graphlib_algorithms::GraphView;
use tracing::debug;

// Re-export algorithms
pub use graphlib_algorithms::{
    bellman_ford, components, dfs, dijkstra, dijkstra_all, find_cycles, floyd_warshall,
    is_acyclic, node_edges_of, out_edges_of, postorder, preorder, prim_mst, tarjan, topsort,
    unit_weight, AdjacencyList, AlgoError, AlgoResult, AllShortestPaths, DfsOrder, MstResult,
    PathEntry, PriorityQueue, ShortestPaths,
};

impl<N, E, G> GraphView for Graph<N, E, G> {
    fn is_directed(&self) -> bool {
        Graph::is_directed(self)
    }

    fn node_ids(&self) -> Vec<&str> {
        Graph::nodes(self)
    }

    fn node_count(&self) -> usize {
        Graph::node_count(self)
    }

    fn contains_node(&self, v: &str) -> bool {
        self.has_node(v)
    }

    fn successors(&self, v: &str) -> Option<Vec<&str>> {
        Graph::successors(self, v)
    }

    fn predecessors(&self, v: &str) -> Option<Vec<&str>> {
        Graph::predecessors(self, v)
    }

    fn neighbors(&self, v: &str) -> Option<Vec<&str>> {
        Graph::neighbors(self, v)
    }

    fn out_edges(&self, v: &str) -> Option<Vec<EdgeKey>> {
        Graph::out_edges(self, v, None)
    }

    fn in_edges(&self, v: &str) -> Option<Vec<EdgeKey>> {
        Graph::in_edges(self, v, None)
    }

    fn node_edges(&self, v: &str) -> Option<Vec<EdgeKey>> {
        Graph::node_edges(self, v, None)
    }

    fn sinks(&self) -> Vec<&str> {
        Graph::sinks(self)
    }
}

/// Minimum spanning tree of `g` as a new undirected graph.
///
/// The result holds every node of `g` and one edge per tree edge, labelled
/// with its weight. Edge direction in `g` is ignored.
pub fn prim<N, E, G, W>(g: &Graph<N, E, G>, weight: W) -> AlgoResult<Graph<(), f64>>
where
    W: Fn(&EdgeKey) -> f64,
{
    let mst = prim_mst(g, weight)?;

    let mut tree: Graph<(), f64> = Graph::with_options(GraphOptions::new().directed(false));
    for v in &mst.nodes {
        tree.set_node(v.as_str(), None);
    }
    for (v, parent, edge_weight) in &mst.edges {
        tree.set_edge(v.as_str(), parent.as_str(), *edge_weight);
    }

    debug!(
        "Built spanning tree graph: {} nodes, {} edges",
        tree.node_count(),
        tree.edge_count()
    );
    Ok(tree)
}
