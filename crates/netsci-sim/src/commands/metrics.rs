//! `metrics` subcommand: path lengths, eccentricities and clustering of a graph.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use indexmap::IndexMap;
use netsci_graph::{
    average_path_length, clustering_coefficient, graph_from_json, graph_metrics,
    local_clustering, path_length_distribution, GraphMetrics, LengthBucket, PathLengthSummary,
};
use serde::Serialize;
use tracing::info;

use crate::commands::emit;

/// Arguments of `netsci-sim metrics`.
#[derive(Args, Debug)]
pub struct MetricsArgs {
    /// Graph JSON produced by `generate` (or any `nodes`/`links` document).
    #[arg(long)]
    pub graph: PathBuf,
    /// Output file for the report; stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Path, eccentricity and clustering report of one graph.
#[derive(Debug, Serialize)]
pub struct MetricsReport {
    /// Number of nodes.
    pub nodes: usize,
    /// Number of edges.
    pub edges: usize,
    /// Average path length over reachable pairs.
    pub path_lengths: PathLengthSummary,
    /// Histogram of pair distances.
    pub distribution: Vec<LengthBucket>,
    /// Eccentricity, radius and diameter.
    pub shape: GraphMetrics,
    /// Mean local clustering coefficient.
    pub clustering_coefficient: f64,
    /// Local clustering per node of degree two or more.
    pub local_clustering: IndexMap<String, f64>,
}

/// Computes every metric of the graph at `args.graph`.
pub fn run(args: &MetricsArgs) -> Result<(), Box<dyn Error>> {
    let graph = graph_from_json(&fs::read_to_string(&args.graph)?)?;
    let index = graph.adjacency();
    let report = MetricsReport {
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        path_lengths: average_path_length(&index),
        distribution: path_length_distribution(&index),
        shape: graph_metrics(&index),
        clustering_coefficient: clustering_coefficient(&index),
        local_clustering: local_clustering(&index)
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect(),
    };
    info!(
        nodes = report.nodes,
        diameter = report.shape.diameter,
        average = report.path_lengths.average,
        "computed metrics"
    );
    emit(args.out.as_deref(), &serde_json::to_string_pretty(&report)?)
}
