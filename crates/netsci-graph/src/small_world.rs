use std::collections::HashSet;

use netsci_core::errors::NetError;
use netsci_core::rng::RngHandle;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clustering::clustering_coefficient;
use crate::model::{Edge, Graph};
use crate::params::{ensure_node_count, ensure_probability};
use crate::paths::average_path_length;
use crate::random::{labelled_nodes, node_label};

/// Watts–Strogatz graph together with its rewiring statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WattsStrogatzGraph {
    /// Generated graph; rewired edges carry `rewired = true`.
    #[serde(flatten)]
    pub graph: Graph,
    /// Number of lattice edges whose target was moved.
    pub rewired_count: usize,
    /// Total number of edges (unchanged by rewiring).
    pub total_edges: usize,
}

/// Generates a Watts–Strogatz small-world graph.
///
/// `k` is the total ring degree; odd values are truncated to the next lower
/// even value, so every node links to `k / 2` successors. Each lattice edge
/// is then rewired with probability `p` to a uniformly chosen node that is
/// neither its source nor already adjacent to it. A rewire that finds no
/// valid target within `2n` draws leaves the edge in place.
pub fn generate_watts_strogatz_graph(
    n_nodes: usize,
    k: usize,
    p: f64,
    rng: &mut RngHandle,
) -> Result<WattsStrogatzGraph, NetError> {
    ensure_node_count("n", n_nodes)?;
    ensure_probability("p", p)?;
    let half_k = k / 2;
    if n_nodes > 1 && half_k == 0 {
        return Err(NetError::invalid_parameter(
            "neighbour-count",
            "k",
            k,
            "k must be at least 2 for the ring lattice to be connected",
        ));
    }

    let lattice = ring_lattice(n_nodes, half_k);
    let (edges, rewired_count) = rewire(&lattice, n_nodes, p, rng);
    let total_edges = edges.len();
    debug!(
        nodes = n_nodes,
        edges = total_edges,
        rewired = rewired_count,
        "generated watts-strogatz graph"
    );

    Ok(WattsStrogatzGraph {
        graph: Graph::from_parts_unchecked(labelled_nodes(n_nodes), edges),
        rewired_count,
        total_edges,
    })
}

fn pair_key(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

fn ring_lattice(n_nodes: usize, half_k: usize) -> Vec<(usize, usize)> {
    let mut seen = HashSet::new();
    let mut lattice = Vec::with_capacity(n_nodes * half_k);
    for i in 0..n_nodes {
        for offset in 1..=half_k {
            let j = (i + offset) % n_nodes;
            if i != j && seen.insert(pair_key(i, j)) {
                lattice.push((i, j));
            }
        }
    }
    lattice
}

fn rewire(
    lattice: &[(usize, usize)],
    n_nodes: usize,
    p: f64,
    rng: &mut RngHandle,
) -> (Vec<Edge>, usize) {
    let mut present: HashSet<(usize, usize)> =
        lattice.iter().map(|&(a, b)| pair_key(a, b)).collect();
    let mut rewired_count = 0;
    let mut edges = Vec::with_capacity(lattice.len());

    for &(source, target) in lattice {
        let mut edge = Edge::new(node_label(source), node_label(target));
        if rng.gen_bool(p) {
            for _ in 0..n_nodes * 2 {
                let candidate = rng.gen_range(0..n_nodes);
                let key = pair_key(source, candidate);
                if candidate != source && !present.contains(&key) {
                    present.remove(&pair_key(source, target));
                    present.insert(key);
                    edge.target = node_label(candidate).into();
                    edge.rewired = true;
                    rewired_count += 1;
                    break;
                }
            }
        }
        edges.push(edge);
    }
    (edges, rewired_count)
}

/// Coarse classification of a Watts–Strogatz graph by its rewiring probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Regime {
    /// `p <= 0.01`: high clustering, long paths.
    RegularLattice,
    /// `0.01 < p <= 0.5`: high clustering, short paths.
    SmallWorld,
    /// `p > 0.5`: low clustering, short paths.
    RandomGraph,
}

impl Regime {
    /// Classifies a rewiring probability.
    pub fn classify(p: f64) -> Self {
        if p > 0.5 {
            Regime::RandomGraph
        } else if p > 0.01 {
            Regime::SmallWorld
        } else {
            Regime::RegularLattice
        }
    }
}

/// Headline metrics of a Watts–Strogatz graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmallWorldSummary {
    /// Global clustering coefficient.
    pub clustering_coefficient: f64,
    /// Average shortest-path length over reachable pairs.
    pub average_path_length: f64,
    /// Number of rewired edges.
    pub rewired_edges: usize,
    /// Total number of edges.
    pub total_edges: usize,
    /// Regime implied by the rewiring probability.
    pub regime: Regime,
    /// Rewiring probability the graph was generated with.
    pub rewiring_probability: f64,
}

/// Computes clustering, path length and regime for a generated graph.
pub fn small_world_summary(generated: &WattsStrogatzGraph, p: f64) -> SmallWorldSummary {
    let index = generated.graph.adjacency();
    SmallWorldSummary {
        clustering_coefficient: clustering_coefficient(&index),
        average_path_length: average_path_length(&index).average,
        rewired_edges: generated.rewired_count,
        total_edges: generated.total_edges,
        regime: Regime::classify(p),
        rewiring_probability: p,
    }
}

/// Clustering coefficient of a ring lattice where every node has `k` neighbours.
///
/// `3(k - 2) / (4(k - 1))`; holds when the ring is long enough that
/// neighbourhoods do not wrap onto each other.
pub fn ring_lattice_clustering(k: usize) -> f64 {
    let k = (k / 2 * 2) as f64;
    if k < 2.0 {
        return 0.0;
    }
    3.0 * (k - 2.0) / (4.0 * (k - 1.0))
}

/// One point of the measured Watts–Strogatz phase-transition curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    /// Rewiring probability.
    pub probability: f64,
    /// Mean clustering coefficient across trials.
    pub clustering: f64,
    /// Mean average path length across connected trials.
    pub average_path_length: f64,
    /// `C(p) / C(0)`.
    pub clustering_ratio: f64,
    /// `L(p) / L(0)`.
    pub path_length_ratio: f64,
    /// Trials whose graph was disconnected (excluded from the path mean).
    pub disconnected_trials: usize,
}

/// Measures `C(p)/C(0)` and `L(p)/L(0)` over seeded trials.
///
/// Trial `t` of probability index `i` draws from substream `i * trials + t`
/// of `seed`, so adding probabilities never perturbs earlier points.
pub fn small_world_sweep(
    n_nodes: usize,
    k: usize,
    probabilities: &[f64],
    trials: usize,
    seed: u64,
) -> Result<Vec<SweepPoint>, NetError> {
    if trials == 0 {
        return Err(NetError::invalid_parameter(
            "trial-count",
            "trials",
            trials,
            "at least one trial is required",
        ));
    }
    for &p in probabilities {
        ensure_probability("p", p)?;
    }

    let mut baseline_rng = RngHandle::from_seed(seed);
    let baseline = generate_watts_strogatz_graph(n_nodes, k, 0.0, &mut baseline_rng)?;
    let baseline_index = baseline.graph.adjacency();
    let c0 = clustering_coefficient(&baseline_index);
    let l0 = average_path_length(&baseline_index).average;

    let mut points = Vec::with_capacity(probabilities.len());
    for (position, &p) in probabilities.iter().enumerate() {
        let mut clustering_sum = 0.0;
        let mut path_sum = 0.0;
        let mut connected = 0usize;
        for trial in 0..trials {
            let substream = (position * trials + trial) as u64;
            let mut rng = RngHandle::for_substream(seed, substream);
            let generated = generate_watts_strogatz_graph(n_nodes, k, p, &mut rng)?;
            let index = generated.graph.adjacency();
            clustering_sum += clustering_coefficient(&index);
            let paths = average_path_length(&index);
            if !paths.disconnected {
                path_sum += paths.average;
                connected += 1;
            }
        }
        let clustering = clustering_sum / trials as f64;
        let average_path_length = if connected > 0 {
            path_sum / connected as f64
        } else {
            f64::INFINITY
        };
        points.push(SweepPoint {
            probability: p,
            clustering,
            average_path_length,
            clustering_ratio: ratio(clustering, c0),
            path_length_ratio: ratio(average_path_length, l0),
            disconnected_trials: trials - connected,
        });
    }
    debug!(points = points.len(), trials, "completed small-world sweep");
    Ok(points)
}

fn ratio(value: f64, baseline: f64) -> f64 {
    if baseline > 0.0 && baseline.is_finite() {
        value / baseline
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_k_is_truncated_to_even() {
        let mut rng = RngHandle::from_seed(3);
        let graph = generate_watts_strogatz_graph(10, 5, 0.0, &mut rng).unwrap();
        assert_eq!(graph.total_edges, 20);
        assert_eq!(graph.rewired_count, 0);
    }

    #[test]
    fn small_rings_skip_duplicate_pairs() {
        let mut rng = RngHandle::from_seed(3);
        let graph = generate_watts_strogatz_graph(3, 4, 0.0, &mut rng).unwrap();
        assert_eq!(graph.total_edges, 3);
        assert!(Graph::new(graph.graph.nodes().to_vec(), graph.graph.edges().to_vec()).is_ok());
    }

    #[test]
    fn k_below_two_is_rejected() {
        let mut rng = RngHandle::from_seed(3);
        let err = generate_watts_strogatz_graph(10, 1, 0.1, &mut rng).unwrap_err();
        assert_eq!(err.info().code, "neighbour-count");
        assert!(generate_watts_strogatz_graph(1, 0, 0.1, &mut rng).is_ok());
    }

    #[test]
    fn complete_ring_cannot_be_rewired() {
        let mut rng = RngHandle::from_seed(11);
        let graph = generate_watts_strogatz_graph(5, 4, 1.0, &mut rng).unwrap();
        assert_eq!(graph.total_edges, 10);
        assert_eq!(graph.rewired_count, 0);
    }

    #[test]
    fn regimes_follow_probability_thresholds() {
        assert_eq!(Regime::classify(0.0), Regime::RegularLattice);
        assert_eq!(Regime::classify(0.01), Regime::RegularLattice);
        assert_eq!(Regime::classify(0.2), Regime::SmallWorld);
        assert_eq!(Regime::classify(0.5), Regime::SmallWorld);
        assert_eq!(Regime::classify(0.9), Regime::RandomGraph);
    }

    #[test]
    fn theoretical_lattice_clustering() {
        assert_eq!(ring_lattice_clustering(2), 0.0);
        assert_eq!(ring_lattice_clustering(4), 0.5);
        assert_eq!(ring_lattice_clustering(5), 0.5);
        assert!((ring_lattice_clustering(6) - 0.6).abs() < 1e-12);
    }
}
