//! `navigate` subcommand: paced greedy routing on a Kleinberg lattice.

use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Args;
use netsci_core::errors::{ErrorInfo, NetError};
use netsci_core::rng::RngHandle;
use netsci_graph::{greedy_navigate, navigation_trials, paced_navigate, NavigationStatus};
use tracing::{info, warn};

use crate::commands::{emit, parse_coord};
use crate::config::{GeneratedNetwork, GeneratorConfig, RunConfig};

/// Arguments of `netsci-sim navigate`.
#[derive(Args, Debug)]
pub struct NavigateArgs {
    /// YAML run configuration with a `kleinberg` generator.
    #[arg(long)]
    pub config: PathBuf,
    /// Stream one JSON line per frame, pausing between frames.
    #[arg(long)]
    pub paced: bool,
    /// Start node as `x,y,z`; overrides the configuration.
    #[arg(long, value_parser = coord_arg)]
    pub start: Option<netsci_core::Coord>,
    /// Target node as `x,y,z`; overrides the configuration.
    #[arg(long, value_parser = coord_arg)]
    pub target: Option<netsci_core::Coord>,
    /// Run this many corner-to-corner trials on fresh lattices instead.
    #[arg(long)]
    pub trials: Option<usize>,
    /// Output file for the trace; stdout when omitted (ignored with `--paced`).
    #[arg(long)]
    pub out: Option<PathBuf>,
}

fn coord_arg(raw: &str) -> Result<netsci_core::Coord, String> {
    parse_coord(raw).ok_or_else(|| format!("expected x,y,z but got `{raw}`"))
}

/// Generates the configured lattice and routes greedily across it.
pub fn run(args: &NavigateArgs) -> Result<(), Box<dyn Error>> {
    let mut config = RunConfig::load(&args.config)?;
    let GeneratorConfig::Kleinberg {
        grid_size,
        exponent,
    } = config.generator
    else {
        return Err(NetError::Config(
            ErrorInfo::new("navigation-generator", "navigation needs a kleinberg generator")
                .with_hint("set generator.type to `kleinberg`"),
        )
        .into());
    };

    if let Some(trials) = args.trials {
        let summary = navigation_trials(grid_size, exponent, trials, config.seed)?;
        info!(
            trials,
            success_rate = summary.success_rate,
            mean_steps = summary.mean_steps,
            "navigation trials finished"
        );
        return emit(args.out.as_deref(), &serde_json::to_string_pretty(&summary)?);
    }

    let network = config.generator.build(&mut RngHandle::from_seed(config.seed))?;
    let GeneratedNetwork::Lattice(lattice) = network else {
        return Err("kleinberg generator returned a non-lattice network".into());
    };
    config.navigation.start = args.start.or(config.navigation.start);
    config.navigation.target = args.target.or(config.navigation.target);
    let (start, target) = config.navigation.endpoints(&lattice);

    if !args.paced {
        let trace = greedy_navigate(&lattice, start, target)?;
        info!(status = ?trace.status, steps = trace.steps, "navigation finished");
        return emit(args.out.as_deref(), &serde_json::to_string_pretty(&trace)?);
    }

    // A closed stdout (e.g. `| head`) abandons the walk instead of failing it.
    let cancelled = AtomicBool::new(false);
    let mut stdout = io::stdout().lock();
    let trace = paced_navigate(
        &lattice,
        start,
        target,
        &config.navigation.pacing(),
        &cancelled,
        |frame| {
            let written = serde_json::to_string(frame)
                .map_err(io::Error::from)
                .and_then(|line| writeln!(stdout, "{line}"))
                .and_then(|()| stdout.flush());
            if let Err(err) = written {
                warn!(error = %err, "stopping paced navigation");
                cancelled.store(true, Ordering::Release);
            }
        },
    )?;
    if trace.status == NavigationStatus::Running {
        info!(steps = trace.steps, "paced navigation abandoned");
    }
    Ok(())
}
