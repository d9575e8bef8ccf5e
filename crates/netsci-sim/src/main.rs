use std::error::Error;

use clap::{Parser, Subcommand};
use netsci_sim::commands::{
    generate::{self, GenerateArgs},
    metrics::{self, MetricsArgs},
    navigate::{self, NavigateArgs},
    predict::{self, PredictArgs},
    sweep::{self, SweepArgs},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "netsci-sim", about = "Network science simulation CLI")]
struct Cli {
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` takes precedence.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a network from a run configuration and emit it as JSON.
    Generate(GenerateArgs),
    /// Report path lengths, eccentricities and clustering of a graph.
    Metrics(MetricsArgs),
    /// Score a candidate link with Adamic–Adar.
    Predict(PredictArgs),
    /// Route greedily across a Kleinberg lattice.
    Navigate(NavigateArgs),
    /// Measure the Watts–Strogatz small-world transition.
    Sweep(SweepArgs),
}

fn init_tracing(level: &str) -> Result<(), Box<dyn Error>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| err.to_string())?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;
    match cli.command {
        Command::Generate(args) => generate::run(&args),
        Command::Metrics(args) => metrics::run(&args),
        Command::Predict(args) => predict::run(&args),
        Command::Navigate(args) => navigate::run(&args),
        Command::Sweep(args) => sweep::run(&args),
    }
}
