//! JSON form of a [`Graph`]
//!
//! `{ options, nodes: [{v, value?, parent?}], edges: [{v, w, name?, value?}], value? }`
//!
//! [`write`] captures the graph as plain serde data; [`read`] rebuilds an
//! equivalent graph through the public mutation API only, so everything the
//! graph enforces (named edges, parent cycles) is enforced on input too.

use crate::graph::{Graph, GraphError, GraphOptions};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// JSON conversion errors
#[derive(Error, Debug)]
pub enum JsonError {
    #[error("JSON error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

pub type JsonResult<T> = Result<T, JsonError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonNode<N> {
    pub v: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<N>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonEdge<E> {
    pub v: String,
    pub w: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<E>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonGraph<N, E, G> {
    #[serde(default)]
    pub options: GraphOptions,
    #[serde(default = "Vec::new")]
    pub nodes: Vec<JsonNode<N>>,
    #[serde(default = "Vec::new")]
    pub edges: Vec<JsonEdge<E>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<G>,
}

/// Capture `g` as serializable data, nodes and edges in insertion order.
pub fn write<N, E, G>(g: &Graph<N, E, G>) -> JsonGraph<N, E, G>
where
    N: Clone,
    E: Clone,
    G: Clone,
{
    let nodes = g
        .nodes()
        .into_iter()
        .map(|v| JsonNode {
            v: v.to_string(),
            value: g.node(v).cloned(),
            parent: g.parent(v).ok().flatten().map(str::to_string),
        })
        .collect();

    let edges = g
        .edges()
        .into_iter()
        .map(|key| JsonEdge {
            value: g.edge_by_key(&key).cloned(),
            v: key.v().to_string(),
            w: key.w().to_string(),
            name: key.name().map(str::to_string),
        })
        .collect();

    JsonGraph {
        options: g.options(),
        nodes,
        edges,
        value: g.graph().cloned(),
    }
}

/// Rebuild a graph from its JSON form.
///
/// Nodes are created first, then parents are assigned, then edges are added.
pub fn read<N, E, G>(json: JsonGraph<N, E, G>) -> JsonResult<Graph<N, E, G>> {
    let mut g = Graph::with_options(json.options);
    if let Some(value) = json.value {
        g.set_graph(value);
    }

    let mut parents = Vec::new();
    for node in json.nodes {
        g.set_node(node.v.as_str(), node.value);
        if let Some(parent) = node.parent {
            parents.push((node.v, parent));
        }
    }
    for (v, parent) in &parents {
        g.set_parent(v.as_str(), Some(parent.as_str()))?;
    }

    for edge in json.edges {
        g.set_named_edge(edge.v, edge.w, edge.name.as_deref(), edge.value)?;
    }

    debug!(
        "Read {} graph with {} nodes and {} edges",
        g.options(),
        g.node_count(),
        g.edge_count()
    );
    Ok(g)
}

pub fn to_value<N, E, G>(g: &Graph<N, E, G>) -> JsonResult<serde_json::Value>
where
    N: Clone + Serialize,
    E: Clone + Serialize,
    G: Clone + Serialize,
{
    Ok(serde_json::to_value(write(g))?)
}

pub fn to_string<N, E, G>(g: &Graph<N, E, G>) -> JsonResult<String>
where
    N: Clone + Serialize,
    E: Clone + Serialize,
    G: Clone + Serialize,
{
    Ok(serde_json::to_string(&write(g))?)
}

pub fn from_str<N, E, G>(s: &str) -> JsonResult<Graph<N, E, G>>
where
    N: DeserializeOwned,
    E: DeserializeOwned,
    G: DeserializeOwned,
{
    let json: JsonGraph<N, E, G> = serde_json::from_str(s)?;
    read(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_shape() {
        let mut g: Graph<String, i32, String> =
            Graph::with_options(GraphOptions::new().multigraph(true).compound(true));
        g.set_graph("root".to_string());
        g.set_node("a", "A".to_string());
        g.set_parent("a", Some("p")).unwrap();
        g.set_named_edge("a", "b", Some("x"), 7).unwrap();

        let value = to_value(&g).unwrap();
        assert_eq!(
            value,
            json!({
                "options": {"directed": true, "multigraph": true, "compound": true},
                "nodes": [
                    {"v": "a", "value": "A", "parent": "p"},
                    {"v": "p"},
                    {"v": "b"}
                ],
                "edges": [{"v": "a", "w": "b", "name": "x", "value": 7}],
                "value": "root"
            })
        );
    }

    #[test]
    fn test_read_rebuilds_graph() {
        let input = r#"{
            "options": {"directed": false, "compound": true},
            "nodes": [{"v": "c", "parent": "p"}, {"v": "p", "value": 1}, {"v": "d", "value": 2}],
            "edges": [{"v": "d", "w": "c", "value": "dc"}]
        }"#;
        let g: Graph<i32, String> = from_str(input).unwrap();

        assert!(!g.is_directed());
        assert!(g.is_compound());
        assert_eq!(g.nodes(), vec!["c", "p", "d"]);
        assert_eq!(g.node("p"), Some(&1));
        assert_eq!(g.parent("c"), Ok(Some("p")));
        assert_eq!(g.edge("c", "d", None).map(String::as_str), Some("dc"));
        assert_eq!(g.graph(), None);
    }

    #[test]
    fn test_round_trip_preserves_structure() {
        let mut g: Graph<u32, f64> = Graph::with_options(GraphOptions::new().compound(true));
        g.set_node("a", 1).set_node("b", 2);
        g.set_edge("a", "b", 0.5).set_edge("b", "c", None);
        g.set_parent("c", Some("a")).unwrap();

        let restored: Graph<u32, f64> = from_str(&to_string(&g).unwrap()).unwrap();
        assert_eq!(write(&restored), write(&g));
    }

    /// Label type with no `Default` impl
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Weight(u32);

    #[test]
    fn test_missing_values_without_default_labels() {
        let input = r#"{
            "nodes": [{"v": "a"}, {"v": "b", "value": 2}],
            "edges": [{"v": "a", "w": "b"}]
        }"#;
        let g: Graph<Weight, Weight, Weight> = from_str(input).unwrap();

        assert_eq!(g.node("a"), None);
        assert_eq!(g.node("b"), Some(&Weight(2)));
        assert!(g.has_edge("a", "b", None));
        assert_eq!(g.edge("a", "b", None), None);
        assert_eq!(g.graph(), None);

        let restored: Graph<Weight, Weight, Weight> = from_str(&to_string(&g).unwrap()).unwrap();
        assert_eq!(write(&restored), write(&g));
    }

    #[test]
    fn test_read_rejects_named_edge_in_simple_graph() {
        let input = r#"{"nodes": [], "edges": [{"v": "a", "w": "b", "name": "x"}]}"#;
        let result: JsonResult<Graph> = from_str(input);
        assert!(matches!(
            result,
            Err(JsonError::Graph(GraphError::NamedEdgeInSimpleGraph(_)))
        ));
    }

    #[test]
    fn test_read_rejects_parent_without_compound() {
        let input = r#"{"nodes": [{"v": "a", "parent": "p"}]}"#;
        let result: JsonResult<Graph> = from_str(input);
        assert!(matches!(result, Err(JsonError::Graph(GraphError::NotCompound))));
    }

    #[test]
    fn test_malformed_json() {
        let result: JsonResult<Graph> = from_str("{\"nodes\": 3}");
        assert!(matches!(result, Err(JsonError::Parse(_))));
    }
}
