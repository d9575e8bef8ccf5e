use netsci_core::rng::RngHandle;
use netsci_graph::{
    average_path_length, clustering_coefficient, generate_watts_strogatz_graph,
    ring_lattice_clustering, small_world_summary, small_world_sweep, Regime,
};

#[test]
fn unrewired_graph_is_the_ring_lattice() {
    let mut rng = RngHandle::from_seed(1);
    let generated = generate_watts_strogatz_graph(20, 4, 0.0, &mut rng).unwrap();
    assert_eq!(generated.rewired_count, 0);
    assert_eq!(generated.total_edges, 40);
    assert!(generated.graph.edges().iter().all(|edge| !edge.rewired));

    let index = generated.graph.adjacency();
    assert!((clustering_coefficient(&index) - ring_lattice_clustering(4)).abs() < 1e-12);
    assert!((ring_lattice_clustering(4) - 0.5).abs() < 1e-12);
    assert!(index.neighbours_of(&"Node 1".into()).unwrap().len() == 4);
}

#[test]
fn odd_degree_truncates_to_even() {
    let mut rng = RngHandle::from_seed(1);
    let generated = generate_watts_strogatz_graph(12, 5, 0.0, &mut rng).unwrap();
    assert_eq!(generated.total_edges, 24);
    assert_eq!(ring_lattice_clustering(5), ring_lattice_clustering(4));
}

#[test]
fn full_rewiring_shortens_paths() {
    let mut lattice_total = 0.0;
    let mut rewired_total = 0.0;
    for seed in 0..5 {
        let mut rng = RngHandle::for_substream(77, seed);
        let lattice = generate_watts_strogatz_graph(40, 4, 0.0, &mut rng).unwrap();
        let rewired = generate_watts_strogatz_graph(40, 4, 1.0, &mut rng).unwrap();
        lattice_total += average_path_length(&lattice.graph.adjacency()).average;
        rewired_total += average_path_length(&rewired.graph.adjacency()).average;
        assert!(rewired.rewired_count > 0);
    }
    assert!(rewired_total < lattice_total);
}

#[test]
fn summary_reports_regime() {
    let mut rng = RngHandle::from_seed(4);
    let generated = generate_watts_strogatz_graph(30, 4, 0.1, &mut rng).unwrap();
    let summary = small_world_summary(&generated, 0.1);
    assert_eq!(summary.regime, Regime::SmallWorld);
    assert_eq!(summary.total_edges, 60);
    assert_eq!(summary.rewired_edges, generated.rewired_count);
    assert_eq!(Regime::classify(0.0), Regime::RegularLattice);
    assert_eq!(Regime::classify(0.9), Regime::RandomGraph);
}

#[test]
fn sweep_starts_at_unit_ratios() {
    let points = small_world_sweep(30, 4, &[0.0, 0.2, 1.0], 3, 11).unwrap();
    assert_eq!(points.len(), 3);
    assert!((points[0].clustering_ratio - 1.0).abs() < 1e-12);
    assert!((points[0].path_length_ratio - 1.0).abs() < 1e-12);
    assert!(points[2].clustering_ratio < points[0].clustering_ratio);

    let again = small_world_sweep(30, 4, &[0.0, 0.2, 1.0], 3, 11).unwrap();
    assert_eq!(points, again);

    let err = small_world_sweep(30, 4, &[0.5], 0, 11).unwrap_err();
    assert_eq!(err.info().code, "trial-count");
}
