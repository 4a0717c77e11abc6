//! Shortest-path algorithms
//!
//! Single-source (Dijkstra, Bellman-Ford) and all-pairs (Dijkstra per node,
//! Floyd-Warshall) shortest paths. Every entry point takes a weight function
//! over edge keys and an edge selector returning the edges to relax out of a
//! node; [`unit_weight`](crate::common::unit_weight) and the view's out-edges
//! are the usual choices.

use super::common::{EdgeKey, GraphView};
use super::error::{AlgoError, AlgoResult};
use super::priority_queue::PriorityQueue;
use ndarray::Array2;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::collections::HashMap;
use tracing::debug;

/// Distance to a node and the node it was reached from
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathEntry {
    pub distance: f64,
    pub predecessor: Option<String>,
}

impl PathEntry {
    fn unreached() -> Self {
        PathEntry {
            distance: f64::INFINITY,
            predecessor: None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.distance != f64::INFINITY
    }
}

/// Node id -> shortest path entry from a fixed source
pub type ShortestPaths = HashMap<String, PathEntry>;

/// Source id -> shortest paths from that source
pub type AllShortestPaths = HashMap<String, ShortestPaths>;

/// Dijkstra's Algorithm (single source)
///
/// Every node starts at `+inf` except `source`, which starts at 0. The
/// cheapest unsettled node is popped from the priority queue and the edges
/// chosen by `edges` are relaxed; the loop stops once the cheapest remaining
/// distance is infinite. Fails on the first relaxed edge with a negative
/// weight. A `source` missing from the graph leaves every node unreached.
pub fn dijkstra<V, W, F>(view: &V, source: &str, weight: W, edges: F) -> AlgoResult<ShortestPaths>
where
    V: GraphView + ?Sized,
    W: Fn(&EdgeKey) -> f64,
    F: Fn(&str) -> Vec<EdgeKey>,
{
    let nodes = view.node_ids();
    let mut results: FxHashMap<&str, PathEntry> =
        FxHashMap::with_capacity_and_hasher(nodes.len(), Default::default());
    let mut pq = PriorityQueue::with_capacity(nodes.len());

    for &v in &nodes {
        let distance = if v == source { 0.0 } else { f64::INFINITY };
        results.insert(v, PathEntry { distance, predecessor: None });
        pq.add(v, distance);
    }

    while !pq.is_empty() {
        let v = pq.remove_min()?;
        let v_distance = match results.get(v.as_str()) {
            Some(entry) if entry.distance != f64::INFINITY => entry.distance,
            _ => break,
        };

        for edge in edges(v.as_str()) {
            let w = edge.other(&v);
            let edge_weight = weight(&edge);
            if edge_weight < 0.0 {
                return Err(AlgoError::NegativeWeight {
                    edge: edge.to_string(),
                    weight: edge_weight,
                });
            }
            let distance = v_distance + edge_weight;
            if let Some(w_entry) = results.get_mut(w) {
                if distance < w_entry.distance {
                    w_entry.distance = distance;
                    w_entry.predecessor = Some(v.clone());
                    pq.decrease(w, distance)?;
                }
            }
        }
    }

    Ok(results
        .into_iter()
        .map(|(k, entry)| (k.to_string(), entry))
        .collect())
}

/// Dijkstra from every node.
///
/// Sources are independent, so the runs are spread across the rayon pool.
pub fn dijkstra_all<V, W, F>(view: &V, weight: W, edges: F) -> AlgoResult<AllShortestPaths>
where
    V: GraphView + Sync + ?Sized,
    W: Fn(&EdgeKey) -> f64 + Sync,
    F: Fn(&str) -> Vec<EdgeKey> + Sync,
{
    let sources = view.node_ids();
    debug!("Running dijkstra from {} sources", sources.len());
    sources
        .par_iter()
        .map(|&source| {
            dijkstra(view, source, &weight, &edges).map(|paths| (source.to_string(), paths))
        })
        .collect()
}

/// Bellman-Ford (single source)
///
/// Relaxes every selected edge up to `|V| - 1` times, stopping early after a
/// pass that changes nothing. Negative weights are fine; a further pass that
/// still improves some distance means a negative cycle is reachable from
/// `source`, reported as `AlgoError::NegativeCycle`.
pub fn bellman_ford<V, W, F>(view: &V, source: &str, weight: W, edges: F) -> AlgoResult<ShortestPaths>
where
    V: GraphView + ?Sized,
    W: Fn(&EdgeKey) -> f64,
    F: Fn(&str) -> Vec<EdgeKey>,
{
    let nodes = view.node_ids();
    let mut results: FxHashMap<&str, PathEntry> = nodes
        .iter()
        .map(|&v| (v, PathEntry::unreached()))
        .collect();
    if let Some(entry) = results.get_mut(source) {
        entry.distance = 0.0;
    }

    // Edge selection and weights do not change between passes
    let mut relaxable: Vec<(&str, &str, f64)> = Vec::new();
    for &v in &nodes {
        for edge in edges(v) {
            let edge_weight = weight(&edge);
            if let Some((&w, _)) = results.get_key_value(edge.other(v)) {
                relaxable.push((v, w, edge_weight));
            }
        }
    }

    for _ in 1..nodes.len() {
        if !relax_pass(&relaxable, &mut results) {
            break;
        }
    }

    if relax_pass(&relaxable, &mut results) {
        debug!("Negative-weight cycle reachable from {}", source);
        return Err(AlgoError::NegativeCycle);
    }

    Ok(results
        .into_iter()
        .map(|(k, entry)| (k.to_string(), entry))
        .collect())
}

/// One Bellman-Ford sweep; returns whether any distance improved.
fn relax_pass<'a>(relaxable: &[(&'a str, &'a str, f64)], results: &mut FxHashMap<&'a str, PathEntry>) -> bool {
    let mut changed = false;
    for &(v, w, edge_weight) in relaxable {
        let v_distance = results.get(v).map_or(f64::INFINITY, |e| e.distance);
        if v_distance == f64::INFINITY {
            continue;
        }
        let distance = v_distance + edge_weight;
        if let Some(w_entry) = results.get_mut(w) {
            if distance < w_entry.distance {
                w_entry.distance = distance;
                w_entry.predecessor = Some(v.to_string());
                changed = true;
            }
        }
    }
    changed
}

/// Floyd-Warshall (all pairs)
///
/// Dense O(|V|^3) dynamic program. The diagonal starts at 0 and each direct
/// edge seeds its pair (the cheapest one wins among parallel edges); then
/// every node `k` is tried as an intermediate hop. Negative weights are
/// accepted and negative cycles are not detected: a negative self-loop just
/// drives the diagonal entry below zero.
pub fn floyd_warshall<V, W, F>(view: &V, weight: W, edges: F) -> AllShortestPaths
where
    V: GraphView + ?Sized,
    W: Fn(&EdgeKey) -> f64,
    F: Fn(&str) -> Vec<EdgeKey>,
{
    let nodes = view.node_ids();
    let n = nodes.len();
    let index: FxHashMap<&str, usize> = nodes.iter().enumerate().map(|(i, &v)| (v, i)).collect();

    let mut dist = Array2::from_elem((n, n), f64::INFINITY);
    let mut pred: Array2<Option<usize>> = Array2::from_elem((n, n), None);

    for (i, &v) in nodes.iter().enumerate() {
        dist[[i, i]] = 0.0;
        for edge in edges(v) {
            let Some(&j) = index.get(edge.other(v)) else {
                continue;
            };
            let d = weight(&edge);
            if d < dist[[i, j]] {
                dist[[i, j]] = d;
                pred[[i, j]] = Some(i);
            }
        }
    }

    for k in 0..n {
        for i in 0..n {
            let ik = dist[[i, k]];
            if ik == f64::INFINITY {
                continue;
            }
            for j in 0..n {
                let alt = ik + dist[[k, j]];
                if alt < dist[[i, j]] {
                    dist[[i, j]] = alt;
                    pred[[i, j]] = pred[[k, j]];
                }
            }
        }
    }

    debug!("Computed all-pairs shortest paths over {} nodes", n);

    nodes
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let row = nodes
                .iter()
                .enumerate()
                .map(|(j, &w)| {
                    let entry = PathEntry {
                        distance: dist[[i, j]],
                        predecessor: pred[[i, j]].map(|p| nodes[p].to_string()),
                    };
                    (w.to_string(), entry)
                })
                .collect();
            (v.to_string(), row)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{unit_weight, AdjacencyList};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn entry(distance: f64, predecessor: Option<&str>) -> PathEntry {
        PathEntry {
            distance,
            predecessor: predecessor.map(str::to_string),
        }
    }

    fn weights(table: &[(&str, &str, f64)]) -> impl Fn(&EdgeKey) -> f64 {
        let map: HashMap<(String, String), f64> = table
            .iter()
            .map(|&(v, w, d)| ((v.to_string(), w.to_string()), d))
            .collect();
        move |e: &EdgeKey| map[&(e.v().to_string(), e.w().to_string())]
    }

    fn weighted_view(directed: bool, table: &[(&str, &str, f64)]) -> AdjacencyList {
        AdjacencyList::from_edges(directed, table.iter().map(|&(v, w, _)| (v, w)))
    }

    #[test]
    fn test_dijkstra_path() {
        // a -> b -> c
        let view = AdjacencyList::from_edges(true, [("a", "b"), ("b", "c")]);
        let result = dijkstra(&view, "a", unit_weight, |v| view.out_edges(v).unwrap_or_default()).unwrap();

        assert_eq!(result["a"], entry(0.0, None));
        assert_eq!(result["b"], entry(1.0, Some("a")));
        assert_eq!(result["c"], entry(2.0, Some("b")));
    }

    #[test]
    fn test_dijkstra_weighted() {
        // 1->2 (10.0), 2->3 (5.0), 1->3 (50.0)
        let table = [("1", "2", 10.0), ("2", "3", 5.0), ("1", "3", 50.0)];
        let view = weighted_view(true, &table);
        let result = dijkstra(&view, "1", weights(&table), |v| view.out_edges(v).unwrap_or_default()).unwrap();

        assert_eq!(result["3"], entry(15.0, Some("2")));
    }

    #[test]
    fn test_dijkstra_unreachable() {
        let mut view = AdjacencyList::from_edges(true, [("a", "b"), ("c", "a")]);
        view.add_node("d");
        let result = dijkstra(&view, "a", unit_weight, |v| view.out_edges(v).unwrap_or_default()).unwrap();

        assert_eq!(result["c"], entry(f64::INFINITY, None));
        assert_eq!(result["d"], entry(f64::INFINITY, None));
        assert!(!result["d"].is_reachable());
    }

    #[test]
    fn test_dijkstra_undirected_with_node_edges() {
        let view = AdjacencyList::from_edges(false, [("b", "a"), ("c", "b")]);
        let result = dijkstra(&view, "c", unit_weight, |v| view.node_edges(v).unwrap_or_default()).unwrap();

        assert_eq!(result["a"], entry(2.0, Some("b")));
    }

    #[test]
    fn test_dijkstra_negative_weight() {
        let table = [("a", "b", 1.0), ("b", "c", -2.0)];
        let view = weighted_view(true, &table);
        let err = dijkstra(&view, "a", weights(&table), |v| view.out_edges(v).unwrap_or_default()).unwrap_err();
        assert!(matches!(err, AlgoError::NegativeWeight { weight, .. } if weight == -2.0));
    }

    #[test]
    fn test_dijkstra_missing_source() {
        let view = AdjacencyList::from_edges(true, [("a", "b")]);
        let result = dijkstra(&view, "z", unit_weight, |v| view.out_edges(v).unwrap_or_default()).unwrap();
        assert!(result.values().all(|e| e.distance == f64::INFINITY));
    }

    #[test]
    fn test_dijkstra_all() {
        let view = AdjacencyList::from_edges(true, [("a", "b"), ("b", "c")]);
        let all = dijkstra_all(&view, unit_weight, |v| view.out_edges(v).unwrap_or_default()).unwrap();

        assert_eq!(all.len(), 3);
        assert_eq!(all["a"]["c"].distance, 2.0);
        assert_eq!(all["c"]["a"].distance, f64::INFINITY);
        assert_eq!(all["b"]["b"].distance, 0.0);
    }

    #[test]
    fn test_bellman_ford_negative_weights() {
        let table = [("a", "b", 4.0), ("a", "c", 2.0), ("c", "b", -3.0), ("b", "d", 1.0)];
        let view = weighted_view(true, &table);
        let result = bellman_ford(&view, "a", weights(&table), |v| view.out_edges(v).unwrap_or_default()).unwrap();

        assert_eq!(result["b"], entry(-1.0, Some("c")));
        assert_eq!(result["d"], entry(0.0, Some("b")));
    }

    #[test]
    fn test_bellman_ford_negative_cycle() {
        let table = [("a", "b", 1.0), ("b", "c", -2.0), ("c", "b", 1.0)];
        let view = weighted_view(true, &table);
        let result = bellman_ford(&view, "a", weights(&table), |v| view.out_edges(v).unwrap_or_default());
        assert_eq!(result, Err(AlgoError::NegativeCycle));
    }

    #[test]
    fn test_floyd_warshall() {
        let table = [("a", "b", 1.0), ("b", "c", 2.0), ("a", "c", 5.0), ("c", "d", -1.0)];
        let view = weighted_view(true, &table);
        let all = floyd_warshall(&view, weights(&table), |v| view.out_edges(v).unwrap_or_default());

        assert_eq!(all["a"]["a"], entry(0.0, None));
        assert_eq!(all["a"]["c"], entry(3.0, Some("b")));
        assert_eq!(all["a"]["d"], entry(2.0, Some("c")));
        assert_eq!(all["d"]["a"], entry(f64::INFINITY, None));
    }

    #[test]
    fn test_floyd_warshall_negative_self_loop() {
        let table = [("a", "a", -1.0)];
        let view = weighted_view(true, &table);
        let all = floyd_warshall(&view, weights(&table), |v| view.out_edges(v).unwrap_or_default());

        assert_eq!(all["a"]["a"], entry(-2.0, Some("a")));
    }

    #[test]
    fn test_floyd_warshall_matches_dijkstra_all() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let n = rng.gen_range(1..12);
            let ids: Vec<String> = (0..n).map(|i| format!("n{}", i)).collect();
            let mut view = AdjacencyList::new(true);
            let mut table: HashMap<(String, String), f64> = HashMap::new();
            for id in &ids {
                view.add_node(id);
            }
            for _ in 0..n * 3 {
                let v = ids[rng.gen_range(0..n)].clone();
                let w = ids[rng.gen_range(0..n)].clone();
                view.add_edge(&v, &w);
                table.entry((v, w)).or_insert_with(|| rng.gen_range(0..10) as f64);
            }
            let weight = |e: &EdgeKey| table[&(e.v().to_string(), e.w().to_string())];
            let out = |v: &str| view.out_edges(v).unwrap_or_default();

            let fw = floyd_warshall(&view, weight, out);
            let dj = dijkstra_all(&view, weight, out).unwrap();

            for v in &ids {
                for w in &ids {
                    assert_eq!(fw[v][w].distance, dj[v][w].distance, "{} -> {}", v, w);
                }
            }
        }
    }
}
