use indexmap::IndexSet;
use netsci_core::errors::NetError;
use netsci_core::rng::RngHandle;
use rand::Rng;
use tracing::debug;

use crate::model::{Edge, Graph, Node};
use crate::params::{ensure_node_count, ensure_probability};

/// Label assigned to the node at zero-based `index`.
pub fn node_label(index: usize) -> String {
    format!("Node {}", index + 1)
}

pub(crate) fn labelled_nodes(n_nodes: usize) -> Vec<Node> {
    (0..n_nodes).map(|index| Node::plain(node_label(index))).collect()
}

/// Generates a uniform random graph: every unordered pair is joined
/// independently with probability `edge_probability`.
///
/// Nodes are named `"Node 1"` … `"Node n"`. Connectivity is not guaranteed.
pub fn generate_random_graph(
    n_nodes: usize,
    edge_probability: f64,
    rng: &mut RngHandle,
) -> Result<Graph, NetError> {
    ensure_node_count("n", n_nodes)?;
    ensure_probability("p", edge_probability)?;

    let mut edges = Vec::new();
    for i in 0..n_nodes {
        for j in (i + 1)..n_nodes {
            if rng.gen_bool(edge_probability) {
                edges.push(Edge::new(node_label(i), node_label(j)));
            }
        }
    }
    debug!(nodes = n_nodes, edges = edges.len(), "generated random graph");
    Ok(Graph::from_parts_unchecked(labelled_nodes(n_nodes), edges))
}

/// Generates a connected random graph.
///
/// A random spanning tree is laid first (node `i` joins a uniformly chosen
/// earlier node), then every remaining pair is added with probability
/// `edge_probability`.
pub fn generate_connected_random_graph(
    n_nodes: usize,
    edge_probability: f64,
    rng: &mut RngHandle,
) -> Result<Graph, NetError> {
    ensure_node_count("n", n_nodes)?;
    ensure_probability("p", edge_probability)?;

    let mut pairs: IndexSet<(usize, usize)> = IndexSet::new();
    for i in 1..n_nodes {
        let j = rng.gen_range(0..i);
        pairs.insert((j, i));
    }
    for i in 0..n_nodes {
        for j in (i + 1)..n_nodes {
            if !pairs.contains(&(i, j)) && rng.gen_bool(edge_probability) {
                pairs.insert((i, j));
            }
        }
    }

    let edges: Vec<Edge> = pairs
        .into_iter()
        .map(|(i, j)| Edge::new(node_label(i), node_label(j)))
        .collect();
    debug!(nodes = n_nodes, edges = edges.len(), "generated connected random graph");
    Ok(Graph::from_parts_unchecked(labelled_nodes(n_nodes), edges))
}
