#![deny(missing_docs)]
#![doc = "Core identifiers, errors and deterministic randomness shared by the netsci engine."]

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod rng;

pub use errors::{ErrorInfo, NetError};
pub use rng::{derive_substream_seed, RngHandle};

/// Integer position of a node inside a cubic lattice.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Coord {
    /// Position along the x axis.
    pub x: i32,
    /// Position along the y axis.
    pub y: i32,
    /// Position along the z axis.
    pub z: i32,
}

impl Coord {
    /// Creates a coordinate from its components.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns the 3-D Manhattan (L1) distance to `other`.
    pub fn manhattan(&self, other: &Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) + self.z.abs_diff(other.z)
    }

    /// Returns the coordinate shifted by the given offsets.
    pub const fn offset(&self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Identifier for a node within a graph.
///
/// Plain and attribute nodes are named by label; lattice nodes are named by
/// their coordinate. Serialized untagged, so a JSON string becomes a label and
/// an `{x, y, z}` object becomes a coordinate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeKey {
    /// Free-form label such as `"Node 3"`.
    Label(String),
    /// Lattice position.
    Coord(Coord),
}

impl NodeKey {
    /// Returns the label when the key is label based.
    pub fn as_label(&self) -> Option<&str> {
        match self {
            NodeKey::Label(label) => Some(label),
            NodeKey::Coord(_) => None,
        }
    }

    /// Returns the coordinate when the key is lattice based.
    pub fn as_coord(&self) -> Option<Coord> {
        match self {
            NodeKey::Label(_) => None,
            NodeKey::Coord(coord) => Some(*coord),
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Label(label) => f.write_str(label),
            NodeKey::Coord(coord) => coord.fmt(f),
        }
    }
}

impl From<&str> for NodeKey {
    fn from(value: &str) -> Self {
        NodeKey::Label(value.to_owned())
    }
}

impl From<String> for NodeKey {
    fn from(value: String) -> Self {
        NodeKey::Label(value)
    }
}

impl From<Coord> for NodeKey {
    fn from(value: Coord) -> Self {
        NodeKey::Coord(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_is_symmetric_sum_of_axis_gaps() {
        let a = Coord::new(0, 0, 0);
        let b = Coord::new(7, 7, 7);
        assert_eq!(a.manhattan(&b), 21);
        assert_eq!(b.manhattan(&a), 21);
        assert_eq!(Coord::new(2, -1, 4).manhattan(&Coord::new(-1, 3, 4)), 7);
    }

    #[test]
    fn node_keys_display_readably() {
        assert_eq!(NodeKey::from("Node 1").to_string(), "Node 1");
        assert_eq!(NodeKey::from(Coord::new(1, 2, 3)).to_string(), "(1, 2, 3)");
    }
}
