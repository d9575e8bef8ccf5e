//! `sweep` subcommand: Watts–Strogatz small-world transition.

use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use netsci_graph::small_world_sweep;
use tracing::info;

use crate::commands::emit;

/// Arguments of `netsci-sim sweep`.
#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Number of ring nodes.
    #[arg(long, default_value_t = 100)]
    pub nodes: usize,
    /// Ring degree `k`.
    #[arg(long, default_value_t = 4)]
    pub neighbours: usize,
    /// Rewiring probabilities to measure.
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "0,0.0001,0.001,0.01,0.1,1"
    )]
    pub probabilities: Vec<f64>,
    /// Graphs generated per probability.
    #[arg(long, default_value_t = 5)]
    pub trials: usize,
    /// Master seed.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
    /// Output file for the table; stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Measures the Watts–Strogatz clustering and path-length curves.
pub fn run(args: &SweepArgs) -> Result<(), Box<dyn Error>> {
    let points = small_world_sweep(
        args.nodes,
        args.neighbours,
        &args.probabilities,
        args.trials,
        args.seed,
    )?;
    for point in &points {
        info!(
            p = point.probability,
            clustering_ratio = point.clustering_ratio,
            path_length_ratio = point.path_length_ratio,
            "sweep point"
        );
    }
    emit(args.out.as_deref(), &serde_json::to_string_pretty(&points)?)
}
