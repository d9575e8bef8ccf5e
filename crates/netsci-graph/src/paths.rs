use std::collections::VecDeque;

use indexmap::IndexMap;
use netsci_core::errors::NetError;
use netsci_core::NodeKey;
use serde::Serialize;

use crate::adjacency::AdjacencyIndex;

/// Shortest path between two nodes: hop count and the visited identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathInfo {
    /// Number of edges on the path.
    pub distance: usize,
    /// Node identifiers from source to target inclusive.
    pub path: Vec<NodeKey>,
}

struct BfsTree {
    distance: Vec<Option<usize>>,
    parent: Vec<Option<usize>>,
    order: Vec<usize>,
}

impl BfsTree {
    fn path_to(&self, index: &AdjacencyIndex, target: usize) -> Vec<NodeKey> {
        let mut path = vec![index.key(target).clone()];
        let mut cursor = target;
        while let Some(parent) = self.parent[cursor] {
            path.push(index.key(parent).clone());
            cursor = parent;
        }
        path.reverse();
        path
    }
}

/// Breadth-first search from `source`, stopping early once `stop_at` is labelled.
fn bfs(index: &AdjacencyIndex, source: usize, stop_at: Option<usize>) -> BfsTree {
    let mut tree = BfsTree {
        distance: vec![None; index.len()],
        parent: vec![None; index.len()],
        order: Vec::new(),
    };
    tree.distance[source] = Some(0);
    tree.order.push(source);
    let mut queue = VecDeque::from([source]);

    while let Some(current) = queue.pop_front() {
        let next_distance = tree.distance[current].map_or(0, |d| d + 1);
        for &neighbour in index.neighbours(current) {
            if tree.distance[neighbour].is_some() {
                continue;
            }
            tree.distance[neighbour] = Some(next_distance);
            tree.parent[neighbour] = Some(current);
            tree.order.push(neighbour);
            if stop_at == Some(neighbour) {
                return tree;
            }
            queue.push_back(neighbour);
        }
    }
    tree
}

/// Hop distances from `source` to every node (`None` when unreachable).
pub(crate) fn distances_from(index: &AdjacencyIndex, source: usize) -> Vec<Option<usize>> {
    bfs(index, source, None).distance
}

/// Finds a shortest path between two nodes by breadth-first search.
///
/// Returns `Ok(None)` when the target is unreachable. Identical endpoints
/// yield distance 0 and a single-node path.
pub fn find_shortest_path(
    index: &AdjacencyIndex,
    source: &NodeKey,
    target: &NodeKey,
) -> Result<Option<PathInfo>, NetError> {
    let source_pos = index.require(source)?;
    let target_pos = index.require(target)?;
    if source_pos == target_pos {
        return Ok(Some(PathInfo {
            distance: 0,
            path: vec![source.clone()],
        }));
    }
    let tree = bfs(index, source_pos, Some(target_pos));
    Ok(tree.distance[target_pos].map(|distance| PathInfo {
        distance,
        path: tree.path_to(index, target_pos),
    }))
}

/// Shortest paths from `source` to every reachable node, in discovery order.
pub fn find_all_shortest_paths(
    index: &AdjacencyIndex,
    source: &NodeKey,
) -> Result<IndexMap<NodeKey, PathInfo>, NetError> {
    let source_pos = index.require(source)?;
    let tree = bfs(index, source_pos, None);
    let mut results = IndexMap::with_capacity(tree.order.len());
    for &reached in &tree.order {
        if let Some(distance) = tree.distance[reached] {
            results.insert(
                index.key(reached).clone(),
                PathInfo {
                    distance,
                    path: tree.path_to(index, reached),
                },
            );
        }
    }
    Ok(results)
}

/// Mean shortest-path length over reachable unordered pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathLengthSummary {
    /// Mean distance; infinite when no pair is reachable, 0 for graphs under two nodes.
    pub average: f64,
    /// Number of reachable unordered pairs.
    pub path_count: usize,
    /// Number of unordered pairs with no connecting path.
    pub unreachable_pairs: usize,
    /// `true` when at least one pair is unreachable.
    pub disconnected: bool,
    /// `n(n - 1) / 2`.
    pub total_possible_pairs: usize,
}

/// Computes the average path length, counting each unordered pair once.
pub fn average_path_length(index: &AdjacencyIndex) -> PathLengthSummary {
    let n = index.len();
    let total_possible_pairs = n * n.saturating_sub(1) / 2;
    if n < 2 {
        return PathLengthSummary {
            average: 0.0,
            path_count: 0,
            unreachable_pairs: 0,
            disconnected: false,
            total_possible_pairs,
        };
    }

    let mut total_distance = 0usize;
    let mut path_count = 0usize;
    let mut unreachable_pairs = 0usize;
    for i in 0..n {
        let distances = distances_from(index, i);
        for distance in &distances[i + 1..] {
            match distance {
                Some(d) => {
                    total_distance += d;
                    path_count += 1;
                }
                None => unreachable_pairs += 1,
            }
        }
    }

    PathLengthSummary {
        average: if path_count > 0 {
            total_distance as f64 / path_count as f64
        } else {
            f64::INFINITY
        },
        path_count,
        unreachable_pairs,
        disconnected: unreachable_pairs > 0,
        total_possible_pairs,
    }
}

/// Number of reachable unordered pairs at a given distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LengthBucket {
    /// Path length in hops.
    pub length: usize,
    /// Number of pairs at that length.
    pub count: usize,
}

/// Histogram of shortest-path lengths over reachable unordered pairs.
///
/// Buckets run from 1 to the longest distance with empty lengths zero-filled.
pub fn path_length_distribution(index: &AdjacencyIndex) -> Vec<LengthBucket> {
    let mut counts: Vec<usize> = Vec::new();
    for i in 0..index.len() {
        let distances = distances_from(index, i);
        for d in distances[i + 1..].iter().flatten() {
            if counts.len() <= *d {
                counts.resize(d + 1, 0);
            }
            counts[*d] += 1;
        }
    }
    counts
        .into_iter()
        .enumerate()
        .skip(1)
        .map(|(length, count)| LengthBucket { length, count })
        .collect()
}

/// Eccentricity-derived shape of a graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphMetrics {
    /// Largest finite distance from each node (0 for isolated nodes).
    #[serde(serialize_with = "crate::serialization::serialize_keyed")]
    pub eccentricities: IndexMap<NodeKey, usize>,
    /// Minimum eccentricity over nodes with at least one neighbour.
    pub radius: usize,
    /// Maximum eccentricity.
    pub diameter: usize,
    /// Non-isolated nodes whose eccentricity equals the radius.
    pub central_nodes: Vec<NodeKey>,
    /// Non-isolated nodes whose eccentricity equals the diameter.
    pub peripheral_nodes: Vec<NodeKey>,
}

/// Computes eccentricity, radius and diameter.
///
/// Unreachable nodes do not contribute to a node's eccentricity, so on a
/// disconnected graph the values describe the components separately.
pub fn graph_metrics(index: &AdjacencyIndex) -> GraphMetrics {
    let mut eccentricities = IndexMap::with_capacity(index.len());
    let mut radius: Option<usize> = None;
    let mut diameter = 0usize;
    for position in 0..index.len() {
        let eccentricity = distances_from(index, position)
            .into_iter()
            .flatten()
            .max()
            .unwrap_or(0);
        eccentricities.insert(index.key(position).clone(), eccentricity);
        diameter = diameter.max(eccentricity);
        if index.degree(position) > 0 {
            radius = Some(radius.map_or(eccentricity, |r| r.min(eccentricity)));
        }
    }
    let radius = radius.unwrap_or(0);

    let connected = |position: usize| index.degree(position) > 0;
    let with_eccentricity = |target: usize| -> Vec<NodeKey> {
        eccentricities
            .iter()
            .enumerate()
            .filter(|(position, (_, ecc))| connected(*position) && **ecc == target)
            .map(|(_, (key, _))| key.clone())
            .collect()
    };
    let central_nodes = with_eccentricity(radius);
    let peripheral_nodes = with_eccentricity(diameter);

    GraphMetrics {
        eccentricities,
        radius,
        diameter,
        central_nodes,
        peripheral_nodes,
    }
}
