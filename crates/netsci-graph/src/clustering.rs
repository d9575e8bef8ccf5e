use indexmap::IndexMap;
use netsci_core::NodeKey;

use crate::adjacency::AdjacencyIndex;

fn local_coefficient(index: &AdjacencyIndex, position: usize) -> Option<f64> {
    let neighbours: Vec<usize> = index.neighbours(position).iter().copied().collect();
    let k = neighbours.len();
    if k < 2 {
        return None;
    }
    let mut links = 0usize;
    for (offset, &a) in neighbours.iter().enumerate() {
        for &b in &neighbours[offset + 1..] {
            if index.are_adjacent(a, b) {
                links += 1;
            }
        }
    }
    Some(2.0 * links as f64 / (k * (k - 1)) as f64)
}

/// Local clustering coefficient of every node with degree at least two.
///
/// `C(v) = 2·|edges among N(v)| / (|N(v)|·(|N(v)| − 1))`.
pub fn local_clustering(index: &AdjacencyIndex) -> IndexMap<NodeKey, f64> {
    (0..index.len())
        .filter_map(|position| {
            local_coefficient(index, position).map(|value| (index.key(position).clone(), value))
        })
        .collect()
}

/// Mean local clustering coefficient over nodes with degree at least two.
///
/// Returns 0 when no node qualifies.
pub fn clustering_coefficient(index: &AdjacencyIndex) -> f64 {
    let mut total = 0.0;
    let mut counted = 0usize;
    for position in 0..index.len() {
        if let Some(value) = local_coefficient(index, position) {
            total += value;
            counted += 1;
        }
    }
    if counted == 0 {
        0.0
    } else {
        total / counted as f64
    }
}
