//! Subcommand implementations of the `netsci-sim` binary.

use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use netsci_core::{Coord, NodeKey};

pub mod generate;
pub mod metrics;
pub mod navigate;
pub mod predict;
pub mod sweep;

/// Writes `payload` to `out`, or to stdout when no path is given.
pub fn emit(out: Option<&Path>, payload: &str) -> Result<(), Box<dyn Error>> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, payload)?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(payload.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

/// Parses a node identifier: `x,y,z` becomes a lattice coordinate, anything
/// else is a label.
pub fn parse_node_key(raw: &str) -> NodeKey {
    parse_coord(raw).map_or_else(|| NodeKey::from(raw), NodeKey::Coord)
}

/// Parses `x,y,z` (whitespace and surrounding parentheses allowed).
pub fn parse_coord(raw: &str) -> Option<Coord> {
    let trimmed = raw.trim().trim_start_matches('(').trim_end_matches(')');
    let mut parts = trimmed.split(',').map(|part| part.trim().parse::<i32>());
    let coord = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(Ok(x)), Some(Ok(y)), Some(Ok(z)), None) => Coord::new(x, y, z),
        _ => return None,
    };
    Some(coord)
}
