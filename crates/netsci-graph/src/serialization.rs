use std::fmt::Display;

use netsci_core::errors::{ErrorInfo, NetError};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::kleinberg::KleinbergLattice;
use crate::model::{Edge, Graph, Node};

fn map_err(err: serde_json::Error, code: &str) -> NetError {
    NetError::Serde(ErrorInfo::new(code, err.to_string()))
}

/// Serializes the graph to a JSON string of `nodes` and `links`.
pub fn graph_to_json(graph: &Graph) -> Result<String, NetError> {
    serde_json::to_string_pretty(graph).map_err(|err| map_err(err, "serialize-json"))
}

/// Restores a graph from JSON, re-checking every structural invariant.
///
/// Edge endpoints may be plain identifiers or resolved node objects, and the
/// edge list may be named `links` or `edges`.
pub fn graph_from_json(json: &str) -> Result<Graph, NetError> {
    let payload: GraphPayload =
        serde_json::from_str(json).map_err(|err| map_err(err, "deserialize-json"))?;
    Graph::try_from(payload)
}

/// Serializes a Kleinberg lattice, including per-node adjacency, to JSON.
pub fn lattice_to_json(lattice: &KleinbergLattice) -> Result<String, NetError> {
    serde_json::to_string_pretty(lattice).map_err(|err| map_err(err, "serialize-json"))
}

/// Wire form of [`Graph`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphPayload {
    nodes: Vec<Node>,
    #[serde(alias = "edges", default)]
    links: Vec<Edge>,
}

impl From<Graph> for GraphPayload {
    fn from(graph: Graph) -> Self {
        let (nodes, links) = graph.into_parts();
        Self { nodes, links }
    }
}

impl TryFrom<GraphPayload> for Graph {
    type Error = NetError;

    fn try_from(payload: GraphPayload) -> Result<Self, Self::Error> {
        Graph::new(payload.nodes, payload.links)
    }
}

/// Serializes a map whose keys are not strings by rendering each key with `Display`.
pub(crate) fn serialize_keyed<'a, K, V, I, S>(entries: I, serializer: S) -> Result<S::Ok, S::Error>
where
    K: Display + 'a,
    V: Serialize + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
    S: Serializer,
{
    let entries = entries.into_iter();
    let mut map = serializer.serialize_map(entries.size_hint().1)?;
    for (key, value) in entries {
        map.serialize_entry(&key.to_string(), value)?;
    }
    map.end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_alias_and_resolved_endpoints() {
        let json = r#"{
            "nodes": [{"kind": "plain", "id": "A"}, {"kind": "plain", "id": "B"}],
            "edges": [{"source": {"id": "A"}, "target": {"id": "B", "x": 3.5}}]
        }"#;
        let graph = graph_from_json(json).unwrap();
        assert_eq!(graph.edges(), &[Edge::new("A", "B")]);
    }

    #[test]
    fn invariants_rechecked_on_import() {
        let json = r#"{
            "nodes": [{"kind": "plain", "id": "A"}],
            "links": [{"source": "A", "target": "A"}]
        }"#;
        let err = graph_from_json(json).unwrap_err();
        assert_eq!(err.info().code, "self-loop");

        let err = graph_from_json("{ not json").unwrap_err();
        assert_eq!(err.info().code, "deserialize-json");
    }

    #[test]
    fn export_uses_links_key() {
        let graph = Graph::new(
            vec![Node::plain("A"), Node::plain("B")],
            vec![Edge::new("A", "B")],
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&graph_to_json(&graph).unwrap()).unwrap();
        assert_eq!(value["links"][0]["source"], "A");
        assert_eq!(value["nodes"][1]["kind"], "plain");
        assert!(value.get("edges").is_none());
    }
}
