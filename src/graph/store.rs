//! In-memory graph storage implementation
//!
//! Node table, edge table, per-node adjacency and the optional parent/child
//! forest of a compound graph. All tables keep insertion order so listings are
//! deterministic.

use super::types::{EdgeKey, GraphOptions};
use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxBuildHasher, FxHashMap};
use std::fmt;
use thiserror::Error;
use tracing::{debug, trace};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

/// Factory for labels of nodes created without one; receives the node id.
pub type NodeLabelFn<N> = Box<dyn Fn(&str) -> N + Send + Sync>;

/// Factory for labels of edges created without one; receives the canonical key.
pub type EdgeLabelFn<E> = Box<dyn Fn(&EdgeKey) -> E + Send + Sync>;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Operation requires a compound graph")]
    NotCompound,

    #[error("Cannot set a named edge ({0}) when multigraph = false")]
    NamedEdgeInSimpleGraph(EdgeKey),

    #[error("Setting {parent} as parent of {node} would create a cycle")]
    ParentCycle { node: String, parent: String },
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Per-node state: the label plus both adjacency directions.
///
/// `incoming`/`outgoing` hold the keys of incident edges; `predecessors`/
/// `successors` count edges per neighbour so parallel edges share one
/// neighbour entry that disappears only with the last of them.
struct NodeEntry<N> {
    label: Option<N>,
    incoming: FxIndexSet<EdgeKey>,
    outgoing: FxIndexSet<EdgeKey>,
    predecessors: FxIndexMap<String, usize>,
    successors: FxIndexMap<String, usize>,
}

impl<N> NodeEntry<N> {
    fn new(label: Option<N>) -> Self {
        NodeEntry {
            label,
            incoming: FxIndexSet::default(),
            outgoing: FxIndexSet::default(),
            predecessors: FxIndexMap::default(),
            successors: FxIndexMap::default(),
        }
    }
}

fn increment(counts: &mut FxIndexMap<String, usize>, key: &str) {
    match counts.get_mut(key) {
        Some(count) => *count += 1,
        None => {
            counts.insert(key.to_string(), 1);
        }
    }
}

fn decrement(counts: &mut FxIndexMap<String, usize>, key: &str) {
    if let Some(count) = counts.get_mut(key) {
        *count -= 1;
        if *count == 0 {
            counts.shift_remove(key);
        }
    }
}

/// In-memory graph
///
/// - `N`: node label, `E`: edge label, `G`: graph label.
/// - Nodes are keyed by string id; edges by [`EdgeKey`], canonicalized for
///   undirected graphs so `(a, b)` and `(b, a)` name the same edge.
/// - Labels are optional. A node or edge created without one takes the
///   default-label factory's output, if a factory is installed.
/// - Lookups of missing nodes and edges return `None`; only structural
///   violations are errors.
pub struct Graph<N = (), E = (), G = ()> {
    options: GraphOptions,
    label: Option<G>,
    default_node_label: Option<NodeLabelFn<N>>,
    default_edge_label: Option<EdgeLabelFn<E>>,

    /// Node table with adjacency
    nodes: FxIndexMap<String, NodeEntry<N>>,

    /// Edge labels keyed by canonical edge key
    edges: FxIndexMap<EdgeKey, Option<E>>,

    /// Compound forest: child -> parent. Absent means root.
    parent: FxHashMap<String, String>,

    /// Compound forest: parent -> children
    children: FxHashMap<String, FxIndexSet<String>>,
}

impl<N, E, G> Default for Graph<N, E, G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E, G> Graph<N, E, G> {
    /// Create a directed, simple, non-compound graph
    pub fn new() -> Self {
        Self::with_options(GraphOptions::default())
    }

    pub fn with_options(options: GraphOptions) -> Self {
        Graph {
            options,
            label: None,
            default_node_label: None,
            default_edge_label: None,
            nodes: FxIndexMap::default(),
            edges: FxIndexMap::default(),
            parent: FxHashMap::default(),
            children: FxHashMap::default(),
        }
    }

    pub fn options(&self) -> GraphOptions {
        self.options
    }

    pub fn is_directed(&self) -> bool {
        self.options.directed
    }

    pub fn is_multigraph(&self) -> bool {
        self.options.multigraph
    }

    pub fn is_compound(&self) -> bool {
        self.options.compound
    }

    // ---------------------------------------------------------------------
    // Graph label and default-label factories
    // ---------------------------------------------------------------------

    pub fn set_graph(&mut self, label: G) -> &mut Self {
        self.label = Some(label);
        self
    }

    pub fn graph(&self) -> Option<&G> {
        self.label.as_ref()
    }

    pub fn graph_mut(&mut self) -> Option<&mut G> {
        self.label.as_mut()
    }

    /// Install the factory used for nodes created without a label.
    pub fn set_default_node_label<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&str) -> N + Send + Sync + 'static,
    {
        self.default_node_label = Some(Box::new(f));
        self
    }

    /// Give every node created without a label a copy of `value`.
    pub fn set_default_node_value(&mut self, value: N) -> &mut Self
    where
        N: Clone + Send + Sync + 'static,
    {
        self.set_default_node_label(move |_| value.clone())
    }

    /// Install the factory used for edges created without a label.
    pub fn set_default_edge_label<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&EdgeKey) -> E + Send + Sync + 'static,
    {
        self.default_edge_label = Some(Box::new(f));
        self
    }

    /// Give every edge created without a label a copy of `value`.
    pub fn set_default_edge_value(&mut self, value: E) -> &mut Self
    where
        E: Clone + Send + Sync + 'static,
    {
        self.set_default_edge_label(move |_| value.clone())
    }

    // ---------------------------------------------------------------------
    // Nodes
    // ---------------------------------------------------------------------

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node ids in insertion order
    pub fn nodes(&self) -> Vec<&str> {
        self.nodes.keys().map(String::as_str).collect()
    }

    pub fn has_node(&self, v: &str) -> bool {
        self.nodes.contains_key(v)
    }

    /// Label of `v`; `None` if the node is missing or carries no label.
    pub fn node(&self, v: &str) -> Option<&N> {
        self.nodes.get(v).and_then(|entry| entry.label.as_ref())
    }

    pub fn node_mut(&mut self, v: &str) -> Option<&mut N> {
        self.nodes.get_mut(v).and_then(|entry| entry.label.as_mut())
    }

    /// Create node `v` or update its label.
    ///
    /// The id is stringified. On an existing node a `None` value leaves the
    /// label alone; on a new node it falls back to the default-label factory.
    pub fn set_node(&mut self, v: impl ToString, value: impl Into<Option<N>>) -> &mut Self {
        let v = v.to_string();
        let value = value.into();

        if let Some(entry) = self.nodes.get_mut(&v) {
            if value.is_some() {
                entry.label = value;
            }
            return self;
        }

        let label = value.or_else(|| self.default_node_label.as_ref().map(|f| f(&v)));
        trace!("Created node {}", v);
        self.nodes.insert(v, NodeEntry::new(label));
        self
    }

    /// `set_node` for each id, all with the same value
    pub fn set_nodes<I, T>(&mut self, ids: I, value: Option<N>) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
        N: Clone,
    {
        for v in ids {
            self.set_node(v, value.clone());
        }
        self
    }

    /// Remove `v` together with every incident edge.
    ///
    /// In a compound graph the children of `v` become roots. Returns whether
    /// the node existed.
    pub fn remove_node(&mut self, v: &str) -> bool {
        let Some(entry) = self.nodes.shift_remove(v) else {
            return false;
        };

        if self.options.compound {
            self.detach_from_parent(v);
            if let Some(children) = self.children.remove(v) {
                for child in &children {
                    self.parent.remove(child);
                }
                debug!("Promoted {} children of {} to root", children.len(), v);
            }
        }

        let incident: Vec<EdgeKey> = entry
            .incoming
            .into_iter()
            .chain(entry.outgoing)
            .collect();
        let mut removed = 0;
        for key in &incident {
            if self.unlink_edge(key) {
                removed += 1;
            }
        }
        debug!("Removed node {} and {} incident edges", v, removed);
        true
    }

    /// Nodes without in-edges
    pub fn sources(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|(_, entry)| entry.incoming.is_empty())
            .map(|(v, _)| v.as_str())
            .collect()
    }

    /// Nodes without out-edges
    pub fn sinks(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|(_, entry)| entry.outgoing.is_empty())
            .map(|(v, _)| v.as_str())
            .collect()
    }

    pub fn predecessors(&self, v: &str) -> Option<Vec<&str>> {
        self.nodes
            .get(v)
            .map(|entry| entry.predecessors.keys().map(String::as_str).collect())
    }

    pub fn successors(&self, v: &str) -> Option<Vec<&str>> {
        self.nodes
            .get(v)
            .map(|entry| entry.successors.keys().map(String::as_str).collect())
    }

    /// Predecessors and successors of `v`, deduplicated
    pub fn neighbors(&self, v: &str) -> Option<Vec<&str>> {
        let entry = self.nodes.get(v)?;
        let mut union: FxIndexSet<&str> = entry.predecessors.keys().map(String::as_str).collect();
        union.extend(entry.successors.keys().map(String::as_str));
        Some(union.into_iter().collect())
    }

    /// No successors (directed) or no neighbours (undirected). A missing node
    /// is not a leaf.
    pub fn is_leaf(&self, v: &str) -> bool {
        let adjacent = if self.options.directed {
            self.successors(v)
        } else {
            self.neighbors(v)
        };
        adjacent.map_or(false, |nodes| nodes.is_empty())
    }

    // ---------------------------------------------------------------------
    // Edges
    // ---------------------------------------------------------------------

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edge keys in insertion order
    pub fn edges(&self) -> Vec<EdgeKey> {
        self.edges.keys().cloned().collect()
    }

    fn key(&self, v: &str, w: &str, name: Option<&str>) -> EdgeKey {
        EdgeKey::canonical(self.options.directed, v, w, name)
    }

    /// Create the unnamed edge `v -> w` or update its label.
    ///
    /// Missing endpoints are created. A `None` value leaves an existing label
    /// alone and falls back to the default factory for a new edge.
    pub fn set_edge(&mut self, v: impl ToString, w: impl ToString, value: impl Into<Option<E>>) -> &mut Self {
        let key = self.key(&v.to_string(), &w.to_string(), None);
        self.upsert_edge(key, value.into())
    }

    /// Create or update a possibly named edge.
    ///
    /// Naming a new edge in a graph that is not a multigraph is an error.
    pub fn set_named_edge(
        &mut self,
        v: impl ToString,
        w: impl ToString,
        name: Option<&str>,
        value: impl Into<Option<E>>,
    ) -> GraphResult<&mut Self> {
        let key = self.key(&v.to_string(), &w.to_string(), name);
        if name.is_some() && !self.options.multigraph {
            return Err(GraphError::NamedEdgeInSimpleGraph(key));
        }
        Ok(self.upsert_edge(key, value.into()))
    }

    /// `set_named_edge` taking an existing key
    pub fn set_edge_key(&mut self, key: &EdgeKey, value: impl Into<Option<E>>) -> GraphResult<&mut Self> {
        self.set_named_edge(key.v(), key.w(), key.name(), value)
    }

    /// Chain of unnamed edges through `ids`, all with the same value
    pub fn set_path<T: ToString>(&mut self, ids: &[T], value: Option<E>) -> &mut Self
    where
        E: Clone,
    {
        for pair in ids.windows(2) {
            self.set_edge(pair[0].to_string(), pair[1].to_string(), value.clone());
        }
        self
    }

    fn upsert_edge(&mut self, key: EdgeKey, value: Option<E>) -> &mut Self {
        if let Some(label) = self.edges.get_mut(&key) {
            if value.is_some() {
                *label = value;
            }
            return self;
        }

        self.set_node(key.v(), None);
        self.set_node(key.w(), None);

        let label = value.or_else(|| self.default_edge_label.as_ref().map(|f| f(&key)));

        if let Some(tail) = self.nodes.get_mut(key.v()) {
            increment(&mut tail.successors, key.w());
            tail.outgoing.insert(key.clone());
        }
        if let Some(head) = self.nodes.get_mut(key.w()) {
            increment(&mut head.predecessors, key.v());
            head.incoming.insert(key.clone());
        }
        trace!("Created edge {}", key);
        self.edges.insert(key, label);
        self
    }

    pub fn has_edge(&self, v: &str, w: &str, name: Option<&str>) -> bool {
        self.edges.contains_key(&self.key(v, w, name))
    }

    /// Label of edge `(v, w, name)`; `None` if missing or unlabelled.
    pub fn edge(&self, v: &str, w: &str, name: Option<&str>) -> Option<&E> {
        self.edges.get(&self.key(v, w, name)).and_then(Option::as_ref)
    }

    pub fn edge_mut(&mut self, v: &str, w: &str, name: Option<&str>) -> Option<&mut E> {
        let key = self.key(v, w, name);
        self.edges.get_mut(&key).and_then(Option::as_mut)
    }

    pub fn edge_by_key(&self, key: &EdgeKey) -> Option<&E> {
        self.edge(key.v(), key.w(), key.name())
    }

    /// Remove edge `(v, w, name)`. Returns whether it existed.
    pub fn remove_edge(&mut self, v: &str, w: &str, name: Option<&str>) -> bool {
        let key = self.key(v, w, name);
        self.unlink_edge(&key)
    }

    pub fn remove_edge_key(&mut self, key: &EdgeKey) -> bool {
        self.remove_edge(key.v(), key.w(), key.name())
    }

    /// Drop a stored (already canonical) edge from the edge table and from
    /// whichever endpoints still exist.
    fn unlink_edge(&mut self, key: &EdgeKey) -> bool {
        if self.edges.shift_remove(key).is_none() {
            return false;
        }
        if let Some(head) = self.nodes.get_mut(key.w()) {
            decrement(&mut head.predecessors, key.v());
            head.incoming.shift_remove(key);
        }
        if let Some(tail) = self.nodes.get_mut(key.v()) {
            decrement(&mut tail.successors, key.w());
            tail.outgoing.shift_remove(key);
        }
        trace!("Removed edge {}", key);
        true
    }

    /// Edges entering `v`, optionally only those coming from `u`
    pub fn in_edges(&self, v: &str, u: Option<&str>) -> Option<Vec<EdgeKey>> {
        let entry = self.nodes.get(v)?;
        Some(
            entry
                .incoming
                .iter()
                .filter(|key| u.map_or(true, |u| key.v() == u))
                .cloned()
                .collect(),
        )
    }

    /// Edges leaving `v`, optionally only those going to `w`
    pub fn out_edges(&self, v: &str, w: Option<&str>) -> Option<Vec<EdgeKey>> {
        let entry = self.nodes.get(v)?;
        Some(
            entry
                .outgoing
                .iter()
                .filter(|key| w.map_or(true, |w| key.w() == w))
                .cloned()
                .collect(),
        )
    }

    /// In-edges followed by out-edges of `v`, optionally only those joining
    /// `v` and `w`
    pub fn node_edges(&self, v: &str, w: Option<&str>) -> Option<Vec<EdgeKey>> {
        let mut edges = self.in_edges(v, w)?;
        edges.extend(self.out_edges(v, w)?);
        Some(edges)
    }

    // ---------------------------------------------------------------------
    // Compound forest
    // ---------------------------------------------------------------------

    /// Nest `v` under `parent`, or make it a root when `parent` is `None`.
    ///
    /// Missing nodes are created. Fails on a non-compound graph and when
    /// `v` is `parent` or one of its ancestors.
    pub fn set_parent(&mut self, v: impl ToString, parent: Option<&str>) -> GraphResult<&mut Self> {
        if !self.options.compound {
            return Err(GraphError::NotCompound);
        }
        let v = v.to_string();

        if let Some(parent) = parent {
            let mut ancestor = Some(parent);
            while let Some(a) = ancestor {
                if a == v {
                    return Err(GraphError::ParentCycle {
                        node: v,
                        parent: parent.to_string(),
                    });
                }
                ancestor = self.parent.get(a).map(String::as_str);
            }
            self.set_node(parent, None);
        }

        self.set_node(v.as_str(), None);
        self.detach_from_parent(&v);
        if let Some(parent) = parent {
            self.attach(v, parent.to_string());
        }
        Ok(self)
    }

    /// Parent of `v`; `None` for roots and missing nodes.
    pub fn parent(&self, v: &str) -> GraphResult<Option<&str>> {
        if !self.options.compound {
            return Err(GraphError::NotCompound);
        }
        Ok(self.parent.get(v).map(String::as_str))
    }

    /// Children of `v`, or the root-level nodes when `v` is `None`.
    ///
    /// `Ok(None)` when `v` is not in the graph.
    pub fn children(&self, v: Option<&str>) -> GraphResult<Option<Vec<&str>>> {
        if !self.options.compound {
            return Err(GraphError::NotCompound);
        }
        let Some(v) = v else {
            let roots = self
                .nodes
                .keys()
                .filter(|id| !self.parent.contains_key(*id))
                .map(String::as_str)
                .collect();
            return Ok(Some(roots));
        };
        if !self.has_node(v) {
            return Ok(None);
        }
        Ok(Some(
            self.children
                .get(v)
                .map(|set| set.iter().map(String::as_str).collect())
                .unwrap_or_default(),
        ))
    }

    fn attach(&mut self, v: String, parent: String) {
        self.children.entry(parent.clone()).or_default().insert(v.clone());
        self.parent.insert(v, parent);
    }

    fn detach_from_parent(&mut self, v: &str) {
        if let Some(old) = self.parent.remove(v) {
            if let Some(siblings) = self.children.get_mut(&old) {
                siblings.shift_remove(v);
                if siblings.is_empty() {
                    self.children.remove(&old);
                }
            }
        }
    }

    // ---------------------------------------------------------------------
    // Subgraphs
    // ---------------------------------------------------------------------

    /// New graph holding the nodes accepted by `predicate` and every edge
    /// between two of them.
    ///
    /// Options and graph label carry over; default-label factories do not.
    /// In a compound graph each kept node is re-parented to its nearest kept
    /// ancestor.
    pub fn filter_nodes<P>(&self, predicate: P) -> Graph<N, E, G>
    where
        P: Fn(&str) -> bool,
        N: Clone,
        E: Clone,
        G: Clone,
    {
        let mut copy = Graph::with_options(self.options);
        copy.label = self.label.clone();

        for (v, entry) in &self.nodes {
            if predicate(v) {
                copy.nodes.insert(v.clone(), NodeEntry::new(entry.label.clone()));
            }
        }

        for (key, label) in &self.edges {
            if copy.has_node(key.v()) && copy.has_node(key.w()) {
                copy.upsert_edge(key.clone(), label.clone());
            }
        }

        if self.options.compound {
            let kept: Vec<String> = copy.nodes.keys().cloned().collect();
            for v in kept {
                let mut ancestor = self.parent.get(&v);
                while let Some(a) = ancestor {
                    if copy.has_node(a) {
                        break;
                    }
                    ancestor = self.parent.get(a);
                }
                if let Some(a) = ancestor {
                    copy.attach(v, a.clone());
                }
            }
        }

        debug!(
            "Filtered graph down to {} of {} nodes, {} of {} edges",
            copy.node_count(),
            self.node_count(),
            copy.edge_count(),
            self.edge_count()
        );
        copy
    }
}

impl<N: fmt::Debug, E: fmt::Debug, G: fmt::Debug> fmt::Debug for Graph<N, E, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("options", &self.options)
            .field("label", &self.label)
            .field(
                "nodes",
                &self.nodes.iter().map(|(v, e)| (v, &e.label)).collect::<Vec<_>>(),
            )
            .field("edges", &self.edges)
            .field("parent", &self.parent)
            .finish()
    }
}
