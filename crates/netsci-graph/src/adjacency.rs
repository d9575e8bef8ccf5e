use indexmap::IndexSet;
use netsci_core::errors::NetError;
use netsci_core::NodeKey;

use crate::model::{Edge, Graph, Node};

/// Neighbour sets keyed by node, shared by every metric and link predictor.
///
/// Nodes are addressed by their position in the source node sequence;
/// neighbour sets keep edge insertion order so traversal is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyIndex {
    keys: IndexSet<NodeKey>,
    neighbours: Vec<IndexSet<usize>>,
}

impl AdjacencyIndex {
    /// Builds the index from raw parts, rejecting edges that name unknown nodes.
    ///
    /// Self-loops are ignored and repeated pairs collapse into one neighbour
    /// entry. Runs in `O(V + E)`.
    pub fn build(nodes: &[Node], edges: &[Edge]) -> Result<Self, NetError> {
        let mut index = Self::with_nodes(nodes);
        for edge in edges {
            let source = index.require(&edge.source)?;
            let target = index.require(&edge.target)?;
            index.link(source, target);
        }
        Ok(index)
    }

    /// Builds the index of an already validated graph.
    pub fn from_graph(graph: &Graph) -> Self {
        let mut index = Self::with_nodes(graph.nodes());
        for edge in graph.edges() {
            if let (Some(source), Some(target)) =
                (index.position(&edge.source), index.position(&edge.target))
            {
                index.link(source, target);
            }
        }
        index
    }

    fn with_nodes(nodes: &[Node]) -> Self {
        let keys: IndexSet<NodeKey> = nodes.iter().map(Node::key).collect();
        let neighbours = vec![IndexSet::new(); keys.len()];
        Self { keys, neighbours }
    }

    fn link(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.neighbours[a].insert(b);
        self.neighbours[b].insert(a);
    }

    /// Number of indexed nodes.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` when no node is indexed.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the position of `key`, if indexed.
    pub fn position(&self, key: &NodeKey) -> Option<usize> {
        self.keys.get_index_of(key)
    }

    /// Returns the position of `key` or an [`NetError::UnknownNodeReference`].
    pub fn require(&self, key: &NodeKey) -> Result<usize, NetError> {
        self.position(key).ok_or_else(|| NetError::unknown_node(key))
    }

    /// Returns the identifier stored at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of range.
    pub fn key(&self, position: usize) -> &NodeKey {
        &self.keys[position]
    }

    /// Iterates over node identifiers in node order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &NodeKey> + '_ {
        self.keys.iter()
    }

    /// Returns the neighbour positions of the node at `position`.
    pub fn neighbours(&self, position: usize) -> &IndexSet<usize> {
        &self.neighbours[position]
    }

    /// Returns the identifiers adjacent to `key`.
    pub fn neighbours_of(&self, key: &NodeKey) -> Result<Vec<&NodeKey>, NetError> {
        let position = self.require(key)?;
        Ok(self.neighbours[position]
            .iter()
            .map(|&neighbour| self.key(neighbour))
            .collect())
    }

    /// Number of distinct neighbours of the node at `position`.
    pub fn degree(&self, position: usize) -> usize {
        self.neighbours[position].len()
    }

    /// Returns `true` when the two positions share an edge.
    pub fn are_adjacent(&self, a: usize, b: usize) -> bool {
        self.neighbours[a].contains(&b)
    }
}
