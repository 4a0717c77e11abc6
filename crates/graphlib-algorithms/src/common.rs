//! Shared utilities for graph algorithms
//!
//! Provides the immutable edge identity, the read-only view of graph topology
//! that every algorithm runs against, and a small standalone view for callers
//! that do not own a full graph store.

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;
use std::fmt;

/// Insertion-ordered map with the fast non-cryptographic hasher.
pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
/// Insertion-ordered set with the fast non-cryptographic hasher.
pub type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

/// Identity of an edge: the `(v, w, name)` triple.
///
/// Keys are immutable once built. For undirected graphs the store hands out
/// keys whose endpoints are already canonicalized, so `v <= w`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeKey {
    v: String,
    w: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    name: Option<String>,
}

impl EdgeKey {
    pub fn new(v: impl Into<String>, w: impl Into<String>, name: Option<&str>) -> Self {
        EdgeKey {
            v: v.into(),
            w: w.into(),
            name: name.map(str::to_string),
        }
    }

    /// Build the key under which an edge is stored, swapping the endpoints of
    /// an undirected edge so the lexicographically smaller id comes first.
    pub fn canonical(directed: bool, v: &str, w: &str, name: Option<&str>) -> Self {
        if !directed && v > w {
            EdgeKey::new(w, v, name)
        } else {
            EdgeKey::new(v, w, name)
        }
    }

    /// Tail of the edge
    pub fn v(&self) -> &str {
        &self.v
    }

    /// Head of the edge
    pub fn w(&self) -> &str {
        &self.w
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The endpoint opposite to `node`. For a self-loop this is `node` itself.
    pub fn other(&self, node: &str) -> &str {
        if self.v == node {
            &self.w
        } else {
            &self.v
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.v == self.w
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} -> {} ({})", self.v, self.w, name),
            None => write!(f, "{} -> {}", self.v, self.w),
        }
    }
}

/// Weight function assigning 1 to every edge.
pub fn unit_weight(_edge: &EdgeKey) -> f64 {
    1.0
}

/// Edge selector following out-edges, the usual choice for shortest paths.
pub fn out_edges_of<V: GraphView + ?Sized>(view: &V) -> impl Fn(&str) -> Vec<EdgeKey> + '_ {
    move |v: &str| view.out_edges(v).unwrap_or_default()
}

/// Edge selector following every incident edge, for undirected traversal.
pub fn node_edges_of<V: GraphView + ?Sized>(view: &V) -> impl Fn(&str) -> Vec<EdgeKey> + '_ {
    move |v: &str| view.node_edges(v).unwrap_or_default()
}

/// Read-only view of graph topology.
///
/// Adjacency queries return `None` when the node is absent so that callers
/// can tell "no neighbours" from "no such node".
pub trait GraphView {
    fn is_directed(&self) -> bool;

    /// All node ids in insertion order
    fn node_ids(&self) -> Vec<&str>;

    fn node_count(&self) -> usize {
        self.node_ids().len()
    }

    fn contains_node(&self, v: &str) -> bool;

    /// Distinct heads of the edges leaving `v`
    fn successors(&self, v: &str) -> Option<Vec<&str>>;

    /// Distinct tails of the edges entering `v`
    fn predecessors(&self, v: &str) -> Option<Vec<&str>>;

    /// Union of predecessors and successors, deduplicated
    fn neighbors(&self, v: &str) -> Option<Vec<&str>> {
        let mut union: FxIndexSet<&str> = FxIndexSet::default();
        union.extend(self.predecessors(v)?);
        union.extend(self.successors(v)?);
        Some(union.into_iter().collect())
    }

    fn out_edges(&self, v: &str) -> Option<Vec<EdgeKey>>;

    fn in_edges(&self, v: &str) -> Option<Vec<EdgeKey>>;

    /// Every edge incident on `v`, in-edges first
    fn node_edges(&self, v: &str) -> Option<Vec<EdgeKey>> {
        let mut edges = self.in_edges(v)?;
        edges.extend(self.out_edges(v)?);
        Some(edges)
    }

    /// Nodes without out-edges
    fn sinks(&self) -> Vec<&str> {
        self.node_ids()
            .into_iter()
            .filter(|v| self.out_edges(v).map_or(false, |e| e.is_empty()))
            .collect()
    }
}

#[derive(Debug, Default, Clone)]
struct Adjacency {
    incoming: Vec<EdgeKey>,
    outgoing: Vec<EdgeKey>,
}

/// A lightweight edge-list backed `GraphView`.
///
/// Useful for running the algorithms over topology that lives outside a full
/// graph store. Edges are never deduplicated beyond their key: adding the same
/// key twice is a no-op.
#[derive(Debug, Clone)]
pub struct AdjacencyList {
    directed: bool,
    nodes: FxIndexMap<String, Adjacency>,
    edges: FxIndexSet<EdgeKey>,
}

impl AdjacencyList {
    pub fn new(directed: bool) -> Self {
        AdjacencyList {
            directed,
            nodes: FxIndexMap::default(),
            edges: FxIndexSet::default(),
        }
    }

    /// Helper to build a view from `(v, w)` pairs
    pub fn from_edges<'a>(directed: bool, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut list = AdjacencyList::new(directed);
        for (v, w) in pairs {
            list.add_edge(v, w);
        }
        list
    }

    pub fn add_node(&mut self, v: &str) -> &mut Self {
        if !self.nodes.contains_key(v) {
            self.nodes.insert(v.to_string(), Adjacency::default());
        }
        self
    }

    pub fn add_edge(&mut self, v: &str, w: &str) -> &mut Self {
        self.add_named_edge(v, w, None)
    }

    pub fn add_named_edge(&mut self, v: &str, w: &str, name: Option<&str>) -> &mut Self {
        let key = EdgeKey::canonical(self.directed, v, w, name);
        if self.edges.contains(&key) {
            return self;
        }
        self.add_node(v).add_node(w);
        if let Some(adj) = self.nodes.get_mut(key.v()) {
            adj.outgoing.push(key.clone());
        }
        if let Some(adj) = self.nodes.get_mut(key.w()) {
            adj.incoming.push(key.clone());
        }
        self.edges.insert(key);
        self
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl GraphView for AdjacencyList {
    fn is_directed(&self) -> bool {
        self.directed
    }

    fn node_ids(&self) -> Vec<&str> {
        self.nodes.keys().map(String::as_str).collect()
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn contains_node(&self, v: &str) -> bool {
        self.nodes.contains_key(v)
    }

    fn successors(&self, v: &str) -> Option<Vec<&str>> {
        let adj = self.nodes.get(v)?;
        let heads: FxIndexSet<&str> = adj.outgoing.iter().map(EdgeKey::w).collect();
        Some(heads.into_iter().collect())
    }

    fn predecessors(&self, v: &str) -> Option<Vec<&str>> {
        let adj = self.nodes.get(v)?;
        let tails: FxIndexSet<&str> = adj.incoming.iter().map(EdgeKey::v).collect();
        Some(tails.into_iter().collect())
    }

    fn out_edges(&self, v: &str) -> Option<Vec<EdgeKey>> {
        self.nodes.get(v).map(|adj| adj.outgoing.clone())
    }

    fn in_edges(&self, v: &str) -> Option<Vec<EdgeKey>> {
        self.nodes.get(v).map(|adj| adj.incoming.clone())
    }
}
