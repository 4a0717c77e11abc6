//! Minimum Spanning Tree algorithms
//!
//! Implements Prim's algorithm for MST.

use super::common::{EdgeKey, GraphView};
use super::error::{AlgoError, AlgoResult};
use super::priority_queue::PriorityQueue;
use rustc_hash::FxHashMap;
use tracing::debug;

/// Edges of a minimum spanning tree
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MstResult {
    /// Every node of the input, in input order
    pub nodes: Vec<String>,
    /// Tree edges as (node, parent-in-tree, weight)
    pub edges: Vec<(String, String, f64)>,
    pub total_weight: f64,
}

/// Prim's Algorithm for Minimum Spanning Tree
///
/// Treats the graph as undirected: every edge incident on the node being
/// settled is considered. Starts from the first node; each node's priority is
/// the cheapest known edge connecting it to the tree. Fails with
/// `AlgoError::NotConnected` when a node other than the first is popped with
/// no connecting edge.
pub fn prim_mst<V, W>(view: &V, weight: W) -> AlgoResult<MstResult>
where
    V: GraphView + ?Sized,
    W: Fn(&EdgeKey) -> f64,
{
    let nodes = view.node_ids();
    let Some(&start) = nodes.first() else {
        return Ok(MstResult::default());
    };

    let mut pq = PriorityQueue::with_capacity(nodes.len());
    for &v in &nodes {
        pq.add(v, f64::INFINITY);
    }
    pq.decrease(start, 0.0)?;

    // node -> (tree neighbour, weight of the connecting edge)
    let mut parents: FxHashMap<String, (String, f64)> = FxHashMap::default();
    let mut edges = Vec::with_capacity(nodes.len().saturating_sub(1));
    let mut total_weight = 0.0;
    let mut started = false;

    while !pq.is_empty() {
        let v = pq.remove_min()?;
        if let Some((parent, edge_weight)) = parents.remove(&v) {
            total_weight += edge_weight;
            edges.push((v.clone(), parent, edge_weight));
        } else if started {
            return Err(AlgoError::NotConnected);
        } else {
            started = true;
        }

        for edge in view.node_edges(&v).unwrap_or_default() {
            let w = edge.other(&v);
            let Some(priority) = pq.priority(w) else {
                continue;
            };
            let edge_weight = weight(&edge);
            if edge_weight < priority {
                parents.insert(w.to_string(), (v.clone(), edge_weight));
                pq.decrease(w, edge_weight)?;
            }
        }
    }

    debug!(
        "Spanning tree over {} nodes has {} edges, total weight {}",
        nodes.len(),
        edges.len(),
        total_weight
    );

    Ok(MstResult {
        nodes: nodes.into_iter().map(str::to_string).collect(),
        edges,
        total_weight,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{unit_weight, AdjacencyList};
    use std::collections::HashMap;

    fn weights(table: &[(&str, &str, f64)]) -> impl Fn(&EdgeKey) -> f64 {
        let map: HashMap<(String, String), f64> = table
            .iter()
            .map(|&(v, w, d)| ((v.to_string(), w.to_string()), d))
            .collect();
        move |e: &EdgeKey| map[&(e.v().to_string(), e.w().to_string())]
    }

    #[test]
    fn test_prim_mst() {
        // Triangle: a-b (1), b-c (2), a-c (4)
        let table = [("a", "b", 1.0), ("b", "c", 2.0), ("a", "c", 4.0)];
        let view = AdjacencyList::from_edges(false, table.iter().map(|&(v, w, _)| (v, w)));

        let result = prim_mst(&view, weights(&table)).unwrap();
        assert_eq!(result.total_weight, 3.0);
        assert_eq!(result.edges.len(), 2);
        assert!(!result
            .edges
            .iter()
            .any(|(v, w, _)| (v == "a" && w == "c") || (v == "c" && w == "a")));
    }

    #[test]
    fn test_prim_ignores_direction() {
        // c -> a is the only edge reaching c
        let view = AdjacencyList::from_edges(true, [("a", "b"), ("c", "a")]);
        let result = prim_mst(&view, unit_weight).unwrap();
        assert_eq!(result.edges.len(), 2);
        assert_eq!(result.nodes, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_prim_empty() {
        let view = AdjacencyList::new(false);
        assert_eq!(prim_mst(&view, unit_weight), Ok(MstResult::default()));
    }

    #[test]
    fn test_prim_single_node() {
        let mut view = AdjacencyList::new(false);
        view.add_node("a");
        let result = prim_mst(&view, unit_weight).unwrap();
        assert_eq!(result.nodes, vec!["a"]);
        assert!(result.edges.is_empty());
    }

    #[test]
    fn test_prim_disconnected() {
        let view = AdjacencyList::from_edges(false, [("a", "b"), ("c", "d")]);
        assert_eq!(prim_mst(&view, unit_weight), Err(AlgoError::NotConnected));
    }

    fn chain(len: usize) -> (Vec<String>, AdjacencyList) {
        let ids: Vec<String> = (0..len).map(|i| format!("n{}", i)).collect();
        let mut view = AdjacencyList::new(false);
        for pair in ids.windows(2) {
            view.add_edge(&pair[0], &pair[1]);
        }
        (ids, view)
    }

    #[test]
    fn test_prim_deep_chain() {
        let (ids, view) = chain(100_000);
        let result = prim_mst(&view, unit_weight).unwrap();
        assert_eq!(result.nodes.len(), ids.len());
        assert_eq!(result.edges.len(), ids.len() - 1);
        assert_eq!(result.total_weight, (ids.len() - 1) as f64);
    }
}
