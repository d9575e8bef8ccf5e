use std::collections::HashSet;

use netsci_core::errors::NetError;
use netsci_core::rng::RngHandle;
use netsci_core::{Coord, NodeKey};
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::model::{Edge, Graph, LatticeNode, Node};
use crate::params::ensure_exponent;

/// Unit steps to the six axis-aligned neighbours, in adjacency order.
const DIRECTIONS: [(i32, i32, i32); 6] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

/// Cubic lattice augmented with one harmonic long-range shortcut per node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KleinbergLattice {
    /// Side length of the cube.
    pub grid_size: usize,
    /// Nodes ordered by `x`, then `y`, then `z`.
    pub nodes: Vec<LatticeNode>,
    /// Axis-aligned unit edges, each undirected pair once.
    pub lattice_links: Vec<Edge>,
    /// One edge per node from the node to its shortcut target.
    pub shortcut_links: Vec<Edge>,
}

impl KleinbergLattice {
    /// Number of axis-aligned adjacent pairs in a cube of side `grid_size`.
    pub fn expected_lattice_links(grid_size: usize) -> usize {
        grid_size
            .saturating_mul(grid_size)
            .saturating_mul(grid_size.saturating_sub(1))
            .saturating_mul(3)
    }

    /// Position of `coord` in [`Self::nodes`], if it lies inside the grid.
    pub fn index_of(&self, coord: Coord) -> Option<usize> {
        let g = self.grid_size as i64;
        let inside = |v: i32| (0..g).contains(&i64::from(v));
        if !(inside(coord.x) && inside(coord.y) && inside(coord.z)) {
            return None;
        }
        let index = (i64::from(coord.x) * g + i64::from(coord.y)) * g + i64::from(coord.z);
        usize::try_from(index).ok()
    }

    /// Looks up the node at `coord`.
    pub fn node(&self, coord: Coord) -> Option<&LatticeNode> {
        self.index_of(coord).and_then(|index| self.nodes.get(index))
    }

    /// Looks up the node at `coord`, failing with an unknown-node error.
    pub fn require(&self, coord: Coord) -> Result<&LatticeNode, NetError> {
        self.node(coord).ok_or_else(|| NetError::unknown_node(NodeKey::Coord(coord)))
    }

    /// Opposite corners `(0,0,0)` and `(g-1,g-1,g-1)`, the default navigation endpoints.
    pub fn corners(&self) -> (Coord, Coord) {
        let far = self.grid_size.saturating_sub(1) as i32;
        (Coord::new(0, 0, 0), Coord::new(far, far, far))
    }

    /// Flattens the lattice into a [`Graph`] of lattice and shortcut edges.
    ///
    /// Shortcuts that coincide with a lattice edge or with another shortcut
    /// are merged, so the result satisfies the graph invariants.
    pub fn to_graph(&self) -> Graph {
        let nodes = self.nodes.iter().cloned().map(Node::Lattice).collect();
        let mut seen = HashSet::new();
        let edges = self
            .lattice_links
            .iter()
            .chain(&self.shortcut_links)
            .filter(|edge| {
                let (a, b) = edge.pair();
                seen.insert((a.clone(), b.clone()))
            })
            .cloned()
            .collect();
        Graph::from_parts_unchecked(nodes, edges)
    }
}

/// Generates a `grid_size³` Kleinberg lattice with clustering exponent `r`.
///
/// Every node keeps its in-grid axis neighbours and draws one shortcut target
/// `v != u` with probability proportional to `d(u, v)^(-r)` (Manhattan `d`).
/// `r = 0` draws uniformly; larger `r` keeps shortcuts closer to home, and
/// `r` near 3 is the regime where greedy routing is efficient.
pub fn generate_kleinberg_grid(
    grid_size: usize,
    r: f64,
    rng: &mut RngHandle,
) -> Result<KleinbergLattice, NetError> {
    if grid_size < 2 {
        return Err(NetError::invalid_parameter(
            "grid-size",
            "grid_size",
            grid_size,
            "grid needs at least two nodes per side for shortcuts to exist",
        ));
    }
    let too_large =
        || NetError::invalid_parameter("grid-size", "grid_size", grid_size, "grid is too large");
    let side = i32::try_from(grid_size).map_err(|_| too_large())?;
    // Lattice link count is bounded by three links per node.
    let node_count = grid_size
        .checked_pow(3)
        .filter(|count| count.checked_mul(3).is_some())
        .ok_or_else(too_large)?;
    ensure_exponent("r", r)?;

    let mut nodes = Vec::with_capacity(node_count);
    for x in 0..side {
        for y in 0..side {
            for z in 0..side {
                nodes.push(LatticeNode {
                    coord: Coord::new(x, y, z),
                    adjacency: Vec::with_capacity(7),
                    shortcut: None,
                });
            }
        }
    }

    let inside = |v: i32| (0..side).contains(&v);
    let mut lattice_links = Vec::with_capacity(KleinbergLattice::expected_lattice_links(grid_size));
    for node in &mut nodes {
        for (dx, dy, dz) in DIRECTIONS {
            let neighbour = node.coord.offset(dx, dy, dz);
            if inside(neighbour.x) && inside(neighbour.y) && inside(neighbour.z) {
                node.adjacency.push(neighbour);
                if dx > 0 || dy > 0 || dz > 0 {
                    lattice_links.push(Edge::new(node.coord, neighbour));
                }
            }
        }
    }

    let coords: Vec<Coord> = nodes.iter().map(|node| node.coord).collect();
    let mut shortcut_links = Vec::with_capacity(nodes.len());
    for node in &mut nodes {
        let target = draw_shortcut(node.coord, &coords, r, rng);
        node.shortcut = Some(target);
        node.adjacency.push(target);
        shortcut_links.push(Edge::new(node.coord, target));
    }

    debug!(
        grid_size,
        r,
        lattice_links = lattice_links.len(),
        shortcuts = shortcut_links.len(),
        "generated kleinberg lattice"
    );
    Ok(KleinbergLattice {
        grid_size,
        nodes,
        lattice_links,
        shortcut_links,
    })
}

fn harmonic_weight(source: Coord, candidate: Coord, r: f64) -> f64 {
    f64::from(source.manhattan(&candidate)).powf(-r)
}

/// Draws one shortcut target in two passes: total weight, then a running
/// threshold. No per-source weight table is materialised.
fn draw_shortcut(source: Coord, coords: &[Coord], r: f64, rng: &mut RngHandle) -> Coord {
    let candidates = || coords.iter().copied().filter(move |&candidate| candidate != source);
    let total: f64 = candidates()
        .map(|candidate| harmonic_weight(source, candidate, r))
        .sum();

    let mut threshold = rng.gen::<f64>() * total;
    let mut last = source;
    for candidate in candidates() {
        threshold -= harmonic_weight(source, candidate, r);
        last = candidate;
        if threshold <= 0.0 {
            return candidate;
        }
    }
    // Rounding can leave a sliver of threshold after the final candidate.
    last
}
