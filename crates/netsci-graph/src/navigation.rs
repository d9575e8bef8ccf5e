//! Decentralised greedy routing on a Kleinberg lattice.
//!
//! A walk only sees the current node's adjacency (lattice neighbours plus
//! its shortcut) and always hops to the neighbour closest to the target.
//! [`NavigationWalk`] yields one [`NavigationFrame`] per step; the
//! synchronous and paced drivers both consume it, so their paths agree.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use netsci_core::errors::NetError;
use netsci_core::rng::RngHandle;
use netsci_core::Coord;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::kleinberg::{generate_kleinberg_grid, KleinbergLattice};

/// Step ceiling of [`greedy_navigate`].
pub const GREEDY_MAX_STEPS: usize = 500;

/// Step ceiling of [`paced_navigate`] under [`PacingConfig::default`].
pub const PACED_MAX_STEPS: usize = 300;

/// Pause between paced frames under [`PacingConfig::default`].
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(120);

/// Lifecycle of a navigation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavigationStatus {
    /// Not started.
    Idle,
    /// Moving towards the target.
    Running,
    /// Target reached.
    Success,
    /// Current node has no neighbours.
    Stuck,
    /// Step ceiling reached before the target.
    Timeout,
}

impl NavigationStatus {
    /// Returns `true` for `Success`, `Stuck` and `Timeout`.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            NavigationStatus::Success | NavigationStatus::Stuck | NavigationStatus::Timeout
        )
    }
}

/// Progress report emitted after each step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationFrame {
    /// Nodes visited so far, start first.
    pub path: Vec<Coord>,
    /// Number of hops attempted.
    pub step: usize,
    /// Manhattan distance from the current node to the target.
    pub remaining_distance: u32,
    /// Status after this step.
    pub status: NavigationStatus,
}

/// Final outcome of a navigation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationTrace {
    /// Nodes visited, start first.
    pub path: Vec<Coord>,
    /// Number of hops attempted.
    pub steps: usize,
    /// Manhattan distance left when the run ended.
    pub remaining_distance: u32,
    /// Final status; `Running` means the caller abandoned the run.
    pub status: NavigationStatus,
}

/// Picks the neighbour closest to `target`; the earliest one wins ties.
pub fn select_next(adjacency: &[Coord], target: Coord) -> Option<Coord> {
    let (first, rest) = adjacency.split_first()?;
    let mut best = *first;
    let mut best_distance = best.manhattan(&target);
    for candidate in rest {
        let distance = candidate.manhattan(&target);
        if distance < best_distance {
            best = *candidate;
            best_distance = distance;
        }
    }
    Some(best)
}

/// Step-by-step greedy walk between two lattice nodes.
///
/// The first frame reports `Running` at step 0 from the start node; the last
/// frame carries the terminal status, after which the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct NavigationWalk<'a> {
    lattice: &'a KleinbergLattice,
    target: Coord,
    current: Coord,
    path: Vec<Coord>,
    steps: usize,
    max_steps: usize,
    status: NavigationStatus,
}

impl<'a> NavigationWalk<'a> {
    /// Prepares a walk; both endpoints must lie inside the lattice.
    pub fn new(
        lattice: &'a KleinbergLattice,
        start: Coord,
        target: Coord,
        max_steps: usize,
    ) -> Result<Self, NetError> {
        lattice.require(start)?;
        lattice.require(target)?;
        Ok(Self {
            lattice,
            target,
            current: start,
            path: vec![start],
            steps: 0,
            max_steps,
            status: NavigationStatus::Idle,
        })
    }

    /// Current status.
    pub fn status(&self) -> NavigationStatus {
        self.status
    }

    /// Nodes visited so far.
    pub fn path(&self) -> &[Coord] {
        &self.path
    }

    /// Distance from the current node to the target.
    pub fn remaining_distance(&self) -> u32 {
        self.current.manhattan(&self.target)
    }

    /// Advances the state machine by one transition.
    ///
    /// Returns `false` once the terminal transition has already happened.
    fn advance(&mut self) -> bool {
        match self.status {
            NavigationStatus::Idle => {
                self.status = NavigationStatus::Running;
                return true;
            }
            NavigationStatus::Running => {}
            _ => return false,
        }

        if self.remaining_distance() == 0 {
            self.status = NavigationStatus::Success;
        } else if self.steps >= self.max_steps {
            self.status = NavigationStatus::Timeout;
        } else {
            self.steps += 1;
            let adjacency = self
                .lattice
                .node(self.current)
                .map(|node| node.adjacency.as_slice())
                .unwrap_or_default();
            match select_next(adjacency, self.target) {
                Some(next) => {
                    trace!(step = self.steps, from = %self.current, to = %next, "greedy hop");
                    self.current = next;
                    self.path.push(next);
                }
                None => self.status = NavigationStatus::Stuck,
            }
        }

        if self.status.is_terminal() {
            debug!(
                status = ?self.status,
                steps = self.steps,
                remaining = self.remaining_distance(),
                "navigation finished"
            );
        }
        true
    }

    fn frame(&self) -> NavigationFrame {
        NavigationFrame {
            path: self.path.clone(),
            step: self.steps,
            remaining_distance: self.remaining_distance(),
            status: self.status,
        }
    }

    /// Drives the walk to its terminal state without producing frames.
    pub fn run_to_end(mut self) -> NavigationTrace {
        while self.advance() {}
        self.into_trace()
    }

    /// Consumes the walk, returning what has happened so far.
    pub fn into_trace(self) -> NavigationTrace {
        let remaining_distance = self.remaining_distance();
        NavigationTrace {
            path: self.path,
            steps: self.steps,
            remaining_distance,
            status: self.status,
        }
    }
}

impl Iterator for NavigationWalk<'_> {
    type Item = NavigationFrame;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().then(|| self.frame())
    }
}

/// Runs a greedy walk to completion with the [`GREEDY_MAX_STEPS`] ceiling.
pub fn greedy_navigate(
    lattice: &KleinbergLattice,
    start: Coord,
    target: Coord,
) -> Result<NavigationTrace, NetError> {
    Ok(NavigationWalk::new(lattice, start, target, GREEDY_MAX_STEPS)?.run_to_end())
}

/// Pacing of [`paced_navigate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Pause after each non-terminal frame.
    pub delay: Duration,
    /// Step ceiling.
    pub max_steps: usize,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_STEP_DELAY,
            max_steps: PACED_MAX_STEPS,
        }
    }
}

/// Runs a greedy walk, reporting every frame to `on_step` and sleeping
/// `pacing.delay` between frames.
///
/// `cancelled` is checked before each callback; once set, no further frame is
/// reported and the partial trace is returned with status `Running`.
pub fn paced_navigate<F>(
    lattice: &KleinbergLattice,
    start: Coord,
    target: Coord,
    pacing: &PacingConfig,
    cancelled: &AtomicBool,
    mut on_step: F,
) -> Result<NavigationTrace, NetError>
where
    F: FnMut(&NavigationFrame),
{
    let mut walk = NavigationWalk::new(lattice, start, target, pacing.max_steps)?;
    while let Some(frame) = walk.next() {
        if cancelled.load(Ordering::Acquire) {
            debug!(step = frame.step, "navigation abandoned by caller");
            break;
        }
        on_step(&frame);
        if frame.status.is_terminal() {
            break;
        }
        if !pacing.delay.is_zero() {
            thread::sleep(pacing.delay);
        }
    }
    Ok(walk.into_trace())
}

/// Aggregate outcome of repeated corner-to-corner navigation trials.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialSummary {
    /// Grid side length.
    pub grid_size: usize,
    /// Clustering exponent.
    pub exponent: f64,
    /// Number of trials run.
    pub trials: usize,
    /// Trials that reached the target.
    pub successes: usize,
    /// `successes / trials`.
    pub success_rate: f64,
    /// Mean steps over successful trials; infinite when none succeeded.
    pub mean_steps: f64,
}

/// Navigates between opposite corners of `trials` freshly generated lattices.
///
/// Trial `t` generates its lattice from substream `t` of `seed`.
pub fn navigation_trials(
    grid_size: usize,
    r: f64,
    trials: usize,
    seed: u64,
) -> Result<TrialSummary, NetError> {
    if trials == 0 {
        return Err(NetError::invalid_parameter(
            "trial-count",
            "trials",
            trials,
            "at least one trial is required",
        ));
    }
    let mut successes = 0usize;
    let mut step_total = 0usize;
    for trial in 0..trials {
        let mut rng = RngHandle::for_substream(seed, trial as u64);
        let lattice = generate_kleinberg_grid(grid_size, r, &mut rng)?;
        let (start, target) = lattice.corners();
        let trace = greedy_navigate(&lattice, start, target)?;
        if trace.status == NavigationStatus::Success {
            successes += 1;
            step_total += trace.steps;
        }
    }
    Ok(TrialSummary {
        grid_size,
        exponent: r,
        trials,
        successes,
        success_rate: successes as f64 / trials as f64,
        mean_steps: if successes > 0 {
            step_total as f64 / successes as f64
        } else {
            f64::INFINITY
        },
    })
}
