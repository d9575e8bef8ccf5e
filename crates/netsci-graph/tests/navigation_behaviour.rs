use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use netsci_core::rng::RngHandle;
use netsci_core::Coord;
use netsci_graph::{
    generate_kleinberg_grid, greedy_navigate, navigation_trials, paced_navigate,
    KleinbergLattice, NavigationStatus, PacingConfig,
};

fn lattice(grid_size: usize, r: f64, seed: u64) -> KleinbergLattice {
    let mut rng = RngHandle::from_seed(seed);
    generate_kleinberg_grid(grid_size, r, &mut rng).unwrap()
}

#[test]
fn every_node_has_one_foreign_shortcut() {
    let lattice = lattice(5, 2.0, 3);
    assert_eq!(lattice.nodes.len(), 125);
    assert_eq!(lattice.lattice_links.len(), KleinbergLattice::expected_lattice_links(5));
    assert_eq!(lattice.lattice_links.len(), 300);
    assert_eq!(lattice.shortcut_links.len(), 125);
    for node in &lattice.nodes {
        let shortcut = node.shortcut.unwrap();
        assert_ne!(shortcut, node.coord);
        assert!(lattice.node(shortcut).is_some());
        assert_eq!(node.adjacency.last(), Some(&shortcut));
    }
}

#[test]
fn greedy_walks_always_reach_the_target() {
    let lattice = lattice(5, 3.0, 12);
    let (start, target) = lattice.corners();
    let trace = greedy_navigate(&lattice, start, target).unwrap();
    assert_eq!(trace.status, NavigationStatus::Success);
    assert!(trace.steps <= 12);
    assert_eq!(trace.path.first(), Some(&start));
    assert_eq!(trace.path.last(), Some(&target));
    for hop in trace.path.windows(2) {
        assert!(hop[1].manhattan(&target) < hop[0].manhattan(&target));
    }
}

#[test]
fn uniform_shortcuts_route_no_slower_than_local_ones() {
    let dense = navigation_trials(6, 0.0, 20, 5).unwrap();
    let sparse = navigation_trials(6, 6.0, 20, 5).unwrap();
    assert_eq!(dense.success_rate, 1.0);
    assert_eq!(sparse.success_rate, 1.0);
    assert!(dense.mean_steps <= sparse.mean_steps);
}

#[test]
fn paced_run_reports_the_same_path() {
    let lattice = lattice(4, 2.0, 40);
    let (start, target) = lattice.corners();
    let pacing = PacingConfig {
        delay: Duration::ZERO,
        ..PacingConfig::default()
    };
    let cancelled = AtomicBool::new(false);
    let mut frames = Vec::new();
    let paced = paced_navigate(&lattice, start, target, &pacing, &cancelled, |frame| {
        frames.push(frame.clone())
    })
    .unwrap();

    let synchronous = greedy_navigate(&lattice, start, target).unwrap();
    assert_eq!(paced.path, synchronous.path);
    assert_eq!(paced.status, NavigationStatus::Success);
    assert_eq!(frames.len(), synchronous.steps + 2);
    assert_eq!(frames.last().map(|frame| frame.status), Some(NavigationStatus::Success));
    for pair in frames.windows(2) {
        assert!(pair[1].step >= pair[0].step);
    }
}

#[test]
fn cancelled_run_stops_reporting() {
    let lattice = lattice(6, 2.0, 41);
    let (start, target) = lattice.corners();
    let pacing = PacingConfig {
        delay: Duration::ZERO,
        ..PacingConfig::default()
    };
    let cancelled = AtomicBool::new(false);
    let mut reported = 0;
    let trace = paced_navigate(&lattice, start, target, &pacing, &cancelled, |_| {
        reported += 1;
        cancelled.store(true, Ordering::Release);
    })
    .unwrap();
    assert_eq!(reported, 1);
    assert_eq!(trace.status, NavigationStatus::Running);
    assert_eq!(trace.steps, 1);
    assert_eq!(trace.path.len(), 2);
}

#[test]
fn paced_ceiling_times_out() {
    let lattice = lattice(5, 1.0, 9);
    let (start, target) = lattice.corners();
    let pacing = PacingConfig {
        delay: Duration::ZERO,
        max_steps: 2,
    };
    let trace = paced_navigate(&lattice, start, target, &pacing, &AtomicBool::new(false), |_| {})
        .unwrap();
    assert_eq!(trace.status, NavigationStatus::Timeout);
    assert_eq!(trace.steps, 2);
    assert_eq!(trace.path.len(), 3);
    assert!(Coord::new(0, 0, 0).manhattan(&target) > trace.remaining_distance);
}
