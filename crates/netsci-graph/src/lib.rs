#![deny(missing_docs)]

//! Graph generators, BFS metrics, link prediction and greedy navigation.
//!
//! Every generator takes an explicit [`netsci_core::RngHandle`], so a run is
//! reproducible from its seed. Metrics and link prediction operate on an
//! [`AdjacencyIndex`] built once per graph.

mod adjacency;
mod clustering;
mod hash;
mod kleinberg;
mod link_prediction;
mod model;
mod navigation;
mod params;
mod paths;
mod random;
mod serialization;
mod similarity;
mod small_world;

pub use adjacency::AdjacencyIndex;
pub use clustering::{clustering_coefficient, local_clustering};
pub use hash::canonical_hash;
pub use kleinberg::{generate_kleinberg_grid, KleinbergLattice};
pub use link_prediction::{
    adamic_adar, neighbour_weight, rank_candidate_links, AdamicAdarScore, NeighbourContribution,
    RankedCandidate,
};
pub use model::{AttributeMap, AttributeNode, Edge, Graph, LatticeNode, Node, PlainNode};
pub use navigation::{
    greedy_navigate, navigation_trials, paced_navigate, select_next, NavigationFrame,
    NavigationStatus, NavigationTrace, NavigationWalk, PacingConfig, TrialSummary,
    DEFAULT_STEP_DELAY, GREEDY_MAX_STEPS, PACED_MAX_STEPS,
};
pub use paths::{
    average_path_length, find_all_shortest_paths, find_shortest_path, graph_metrics,
    path_length_distribution, GraphMetrics, LengthBucket, PathInfo, PathLengthSummary,
};
pub use random::{generate_connected_random_graph, generate_random_graph, node_label};
pub use similarity::{
    calculate_similarity, flatten_attributes, generate_attribute_graph, similarity_with_frequencies,
    token_weight, AttributeFrequencies, SharedAttribute, SimilarityScore, ATTRIBUTE_CATEGORIES,
    DISPLAY_EDGE_THRESHOLD, SECOND_VALUE_PROBABILITY, UNIQUE_TOKEN_FREQUENCY,
};
pub use small_world::{
    generate_watts_strogatz_graph, ring_lattice_clustering, small_world_summary,
    small_world_sweep, Regime, SmallWorldSummary, SweepPoint, WattsStrogatzGraph,
};

/// Re-export serialization helpers for downstream crates.
pub use serialization::{graph_from_json, graph_to_json, lattice_to_json};
