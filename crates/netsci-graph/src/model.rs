use indexmap::{IndexMap, IndexSet};
use netsci_core::errors::{ErrorInfo, NetError};
use netsci_core::{Coord, NodeKey};
use serde::{Deserialize, Deserializer, Serialize};

use crate::adjacency::AdjacencyIndex;
use crate::serialization::GraphPayload;

/// Categorised attribute values carried by an [`AttributeNode`].
///
/// Category and value order is insertion order, which is also the order in
/// which shared attributes are reported by the similarity scorer.
pub type AttributeMap = IndexMap<String, IndexSet<String>>;

/// Node produced by the random and Watts–Strogatz generators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlainNode {
    /// Unique label.
    pub id: String,
}

/// Node carrying categorised attributes for attribute-based link prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeNode {
    /// Unique label.
    pub id: String,
    /// Attribute values grouped by category.
    #[serde(default)]
    pub attributes: AttributeMap,
}

/// Node of a Kleinberg lattice, carrying its navigation neighbourhood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatticeNode {
    /// Grid position, also the node identifier.
    pub coord: Coord,
    /// Lattice neighbours in axis order followed by the shortcut target.
    #[serde(default)]
    pub adjacency: Vec<Coord>,
    /// Long-range contact drawn by the harmonic sampler.
    #[serde(default)]
    pub shortcut: Option<Coord>,
}

/// A graph node. Each generator populates exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Node {
    /// Label-only node.
    Plain(PlainNode),
    /// Node with categorised attributes.
    Attribute(AttributeNode),
    /// Lattice node with navigation adjacency.
    Lattice(LatticeNode),
}

impl Node {
    /// Creates a plain node with the given label.
    pub fn plain(id: impl Into<String>) -> Self {
        Node::Plain(PlainNode { id: id.into() })
    }

    /// Returns the identifier of the node.
    pub fn key(&self) -> NodeKey {
        match self {
            Node::Plain(node) => NodeKey::Label(node.id.clone()),
            Node::Attribute(node) => NodeKey::Label(node.id.clone()),
            Node::Lattice(node) => NodeKey::Coord(node.coord),
        }
    }

    /// Returns the attribute payload for attribute nodes.
    pub fn as_attribute(&self) -> Option<&AttributeNode> {
        match self {
            Node::Attribute(node) => Some(node),
            _ => None,
        }
    }

    /// Returns the lattice payload for lattice nodes.
    pub fn as_lattice(&self) -> Option<&LatticeNode> {
        match self {
            Node::Lattice(node) => Some(node),
            _ => None,
        }
    }
}

/// Undirected edge between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// First endpoint. Resolved node objects are accepted on input.
    #[serde(deserialize_with = "deserialize_endpoint")]
    pub source: NodeKey,
    /// Second endpoint. Resolved node objects are accepted on input.
    #[serde(deserialize_with = "deserialize_endpoint")]
    pub target: NodeKey,
    /// Set when the Watts–Strogatz rewiring pass moved this edge's target.
    #[serde(default)]
    pub rewired: bool,
    /// Display annotation marking the edge as part of a highlighted path.
    #[serde(default, skip_serializing_if = "is_false")]
    pub highlighted: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Edge {
    /// Creates an unannotated edge.
    pub fn new(source: impl Into<NodeKey>, target: impl Into<NodeKey>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            rewired: false,
            highlighted: false,
        }
    }

    /// Returns the endpoints ordered so that `(a, b)` and `(b, a)` compare equal.
    pub fn pair(&self) -> (&NodeKey, &NodeKey) {
        if self.source <= self.target {
            (&self.source, &self.target)
        } else {
            (&self.target, &self.source)
        }
    }

    /// Returns `true` when the edge joins `a` and `b` in either direction.
    pub fn connects(&self, a: &NodeKey, b: &NodeKey) -> bool {
        (&self.source == a && &self.target == b) || (&self.source == b && &self.target == a)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EndpointRepr {
    Resolved { id: NodeKey },
    ResolvedLattice { coord: Coord },
    Key(NodeKey),
}

fn deserialize_endpoint<'de, D>(deserializer: D) -> Result<NodeKey, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match EndpointRepr::deserialize(deserializer)? {
        EndpointRepr::Resolved { id } => id,
        EndpointRepr::ResolvedLattice { coord } => NodeKey::Coord(coord),
        EndpointRepr::Key(key) => key,
    })
}

/// Immutable node/edge collection produced by the generators.
///
/// Node order is insertion order (also render order). Topology cannot change
/// after construction; only the `highlighted` display flag is writable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GraphPayload", into = "GraphPayload")]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Assembles a graph after checking every structural invariant.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, NetError> {
        let mut keys = IndexSet::with_capacity(nodes.len());
        for node in &nodes {
            let key = node.key();
            if keys.contains(&key) {
                return Err(NetError::Graph(
                    ErrorInfo::new("duplicate-node", "node identifiers must be unique")
                        .with_context("node", key.to_string()),
                ));
            }
            keys.insert(key);
        }

        let mut pairs = IndexSet::with_capacity(edges.len());
        for (position, edge) in edges.iter().enumerate() {
            for endpoint in [&edge.source, &edge.target] {
                if !keys.contains(endpoint) {
                    return Err(NetError::UnknownNodeReference(
                        ErrorInfo::new("unknown-node", "edge references a node that does not exist")
                            .with_context("edge", position.to_string())
                            .with_context("node", endpoint.to_string()),
                    ));
                }
            }
            if edge.source == edge.target {
                return Err(NetError::Graph(
                    ErrorInfo::new("self-loop", "edge connects a node to itself")
                        .with_context("edge", position.to_string())
                        .with_context("node", edge.source.to_string()),
                ));
            }
            let (a, b) = edge.pair();
            if !pairs.insert((a.clone(), b.clone())) {
                return Err(NetError::Graph(
                    ErrorInfo::new("duplicate-edge", "a node pair may be joined at most once")
                        .with_context("edge", position.to_string())
                        .with_context("source", a.to_string())
                        .with_context("target", b.to_string()),
                ));
            }
        }

        Ok(Self { nodes, edges })
    }

    /// Builds a graph whose invariants are guaranteed by the calling generator.
    pub(crate) fn from_parts_unchecked(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Returns the nodes in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Looks up a node by identifier.
    pub fn node(&self, key: &NodeKey) -> Option<&Node> {
        self.nodes.iter().find(|node| &node.key() == key)
    }

    /// Iterates over the attribute payloads of attribute nodes.
    pub fn attribute_nodes(&self) -> impl Iterator<Item = &AttributeNode> + '_ {
        self.nodes.iter().filter_map(Node::as_attribute)
    }

    /// Builds the neighbour index used by metrics and link prediction.
    pub fn adjacency(&self) -> AdjacencyIndex {
        AdjacencyIndex::from_graph(self)
    }

    /// Marks the edges along `path` as highlighted and clears all others.
    ///
    /// Returns the number of highlighted edges. Consecutive path entries that
    /// are not joined by an edge are skipped.
    pub fn highlight_path(&mut self, path: &[NodeKey]) -> usize {
        let mut highlighted = 0;
        for edge in &mut self.edges {
            edge.highlighted = path
                .windows(2)
                .any(|step| edge.connects(&step[0], &step[1]));
            if edge.highlighted {
                highlighted += 1;
            }
        }
        highlighted
    }

    /// Clears every highlight annotation.
    pub fn clear_highlights(&mut self) {
        for edge in &mut self.edges {
            edge.highlighted = false;
        }
    }

    pub(crate) fn into_parts(self) -> (Vec<Node>, Vec<Edge>) {
        (self.nodes, self.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Vec<Node> {
        vec![Node::plain("A"), Node::plain("B"), Node::plain("C")]
    }

    #[test]
    fn rejects_structural_violations() {
        let dup = Graph::new(vec![Node::plain("A"), Node::plain("A")], vec![]).unwrap_err();
        assert_eq!(dup.info().code, "duplicate-node");

        let looped = Graph::new(abc(), vec![Edge::new("A", "A")]).unwrap_err();
        assert_eq!(looped.info().code, "self-loop");

        let twice = Graph::new(abc(), vec![Edge::new("A", "B"), Edge::new("B", "A")]).unwrap_err();
        assert_eq!(twice.info().code, "duplicate-edge");

        let unknown = Graph::new(abc(), vec![Edge::new("A", "Z")]).unwrap_err();
        assert!(matches!(unknown, NetError::UnknownNodeReference(_)));
        assert_eq!(unknown.info().context.get("node"), Some(&"Z".to_string()));
    }

    #[test]
    fn highlight_marks_only_path_edges() {
        let mut graph = Graph::new(
            abc(),
            vec![Edge::new("A", "B"), Edge::new("B", "C"), Edge::new("A", "C")],
        )
        .unwrap();
        let path = vec![NodeKey::from("A"), NodeKey::from("B"), NodeKey::from("C")];
        assert_eq!(graph.highlight_path(&path), 2);
        let flags: Vec<bool> = graph.edges().iter().map(|edge| edge.highlighted).collect();
        assert_eq!(flags, vec![true, true, false]);

        graph.clear_highlights();
        assert!(graph.edges().iter().all(|edge| !edge.highlighted));
    }

    #[test]
    fn edge_endpoints_accept_resolved_nodes() {
        let edge: Edge = serde_json::from_str(
            r#"{"source": {"id": "A", "x": 12.5, "y": -3.0}, "target": "B"}"#,
        )
        .unwrap();
        assert_eq!(edge, Edge::new("A", "B"));

        let lattice: Edge = serde_json::from_str(
            r#"{"source": {"coord": {"x": 0, "y": 0, "z": 0}, "adjacency": []},
                "target": {"x": 1, "y": 0, "z": 0}}"#,
        )
        .unwrap();
        assert_eq!(lattice, Edge::new(Coord::new(0, 0, 0), Coord::new(1, 0, 0)));
    }
}
