//! Graph algorithms over a read-only [`GraphView`].
//!
//! Traversal, connectivity, ordering, shortest paths and spanning trees,
//! plus the indexed priority queue the weighted algorithms run on.

pub mod common;
pub mod error;
pub mod priority_queue;
pub mod traversal;
pub mod community;
pub mod topology;
pub mod pathfinding;
pub mod mst;

pub use common::{node_edges_of, out_edges_of, unit_weight, AdjacencyList, EdgeKey, GraphView};
pub use error::{AlgoError, AlgoResult};
pub use priority_queue::PriorityQueue;
pub use traversal::{dfs, postorder, preorder, DfsOrder};
pub use community::{components, find_cycles, tarjan};
pub use topology::{is_acyclic, topsort};
pub use pathfinding::{
    bellman_ford, dijkstra, dijkstra_all, floyd_warshall, AllShortestPaths, PathEntry, ShortestPaths,
};
pub use mst::{prim_mst, MstResult};
