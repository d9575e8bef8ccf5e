//! `generate` subcommand: build a network from a run configuration.

use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use netsci_core::rng::RngHandle;
use tracing::info;

use crate::commands::emit;
use crate::config::RunConfig;

/// Arguments of `netsci-sim generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// YAML run configuration; built-in defaults when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Overrides the configured seed.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Output file for the graph JSON; stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Generates the configured network and writes it as JSON.
pub fn run(args: &GenerateArgs) -> Result<(), Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut rng = RngHandle::from_seed(config.seed);
    let network = config.generator.build(&mut rng)?;
    info!(seed = config.seed, hash = %network.hash(), "generated network");
    emit(args.out.as_deref(), &network.to_json()?)
}
