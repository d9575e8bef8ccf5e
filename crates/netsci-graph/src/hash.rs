use sha2::{Digest, Sha256};

use crate::model::Graph;

/// Computes a structural hash of the graph.
///
/// Node identifiers are hashed in insertion order and undirected edge pairs
/// in sorted order, so two runs with the same seed hash identically while
/// edge order and display annotations do not matter.
pub fn canonical_hash(graph: &Graph) -> String {
    let mut hasher = Sha256::new();
    hasher.update((graph.node_count() as u64).to_le_bytes());
    for node in graph.nodes() {
        update_str(&node.key().to_string(), &mut hasher);
    }

    let mut pairs: Vec<(String, String)> = graph
        .edges()
        .iter()
        .map(|edge| {
            let (a, b) = edge.pair();
            (a.to_string(), b.to_string())
        })
        .collect();
    pairs.sort();
    hasher.update((pairs.len() as u64).to_le_bytes());
    for (a, b) in &pairs {
        update_str(a, &mut hasher);
        update_str(b, &mut hasher);
    }

    format!("{:x}", hasher.finalize())
}

fn update_str(value: &str, hasher: &mut Sha256) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Edge, Node};

    #[test]
    fn ignores_edge_order_and_direction() {
        let nodes = vec![Node::plain("A"), Node::plain("B"), Node::plain("C")];
        let first = Graph::new(nodes.clone(), vec![Edge::new("A", "B"), Edge::new("B", "C")]).unwrap();
        let mut second =
            Graph::new(nodes, vec![Edge::new("C", "B"), Edge::new("B", "A")]).unwrap();
        second.highlight_path(&["A".into(), "B".into()]);
        assert_eq!(canonical_hash(&first), canonical_hash(&second));
    }

    #[test]
    fn different_topologies_differ() {
        let nodes = vec![Node::plain("A"), Node::plain("B"), Node::plain("C")];
        let first = Graph::new(nodes.clone(), vec![Edge::new("A", "B")]).unwrap();
        let second = Graph::new(nodes, vec![Edge::new("A", "C")]).unwrap();
        assert_ne!(canonical_hash(&first), canonical_hash(&second));
    }
}
