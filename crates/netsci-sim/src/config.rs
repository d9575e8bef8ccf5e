//! YAML run configuration and generator dispatch for the netsci-sim driver.

use std::fs;
use std::path::Path;
use std::time::Duration;

use netsci_core::errors::{ErrorInfo, NetError};
use netsci_core::rng::RngHandle;
use netsci_core::Coord;
use netsci_graph::{
    canonical_hash, generate_attribute_graph, generate_connected_random_graph,
    generate_kleinberg_grid, generate_random_graph, generate_watts_strogatz_graph,
    graph_to_json, lattice_to_json, Graph, KleinbergLattice, PacingConfig, WattsStrogatzGraph,
    DEFAULT_STEP_DELAY, PACED_MAX_STEPS,
};
use serde::{Deserialize, Serialize};

/// YAML-configurable parameters of a single run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Master seed; every random draw of the run derives from it.
    #[serde(default)]
    pub seed: u64,
    /// Which network to generate.
    #[serde(default)]
    pub generator: GeneratorConfig,
    /// Greedy navigation settings (Kleinberg generator only).
    #[serde(default)]
    pub navigation: NavigationConfig,
}

impl RunConfig {
    /// Parses a configuration from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, NetError> {
        serde_yaml::from_str(text)
            .map_err(|err| NetError::Config(ErrorInfo::new("parse-config", err.to_string())))
    }

    /// Reads and parses a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, NetError> {
        let text = fs::read_to_string(path).map_err(|err| {
            NetError::Config(
                ErrorInfo::new("read-config", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml_str(&text)
    }

    /// Serializes the configuration back to YAML.
    pub fn to_yaml(&self) -> Result<String, NetError> {
        serde_yaml::to_string(self)
            .map_err(|err| NetError::Serde(ErrorInfo::new("serialize-yaml", err.to_string())))
    }
}

/// Network generator selection, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum GeneratorConfig {
    /// Uniform random graph.
    Random {
        /// Number of nodes.
        #[serde(default = "default_random_nodes")]
        nodes: usize,
        /// Independent edge probability.
        #[serde(default = "default_random_probability")]
        probability: f64,
        /// Lay a spanning tree first so the graph is connected.
        #[serde(default)]
        connected: bool,
    },
    /// Watts–Strogatz ring lattice with rewiring.
    WattsStrogatz {
        /// Number of nodes.
        #[serde(default = "default_ring_nodes")]
        nodes: usize,
        /// Ring degree `k`.
        #[serde(default = "default_neighbours")]
        neighbours: usize,
        /// Rewiring probability `p`.
        #[serde(default)]
        rewiring: f64,
    },
    /// Kleinberg cubic lattice with harmonic shortcuts.
    Kleinberg {
        /// Side length of the cube.
        #[serde(default = "default_grid_size")]
        grid_size: usize,
        /// Clustering exponent `r`.
        #[serde(default = "default_exponent")]
        exponent: f64,
    },
    /// Attribute population for attribute-based link prediction.
    Attributes {
        /// Number of nodes.
        #[serde(default = "default_attribute_nodes")]
        nodes: usize,
    },
}

fn default_random_nodes() -> usize {
    12
}

fn default_random_probability() -> f64 {
    0.3
}

fn default_ring_nodes() -> usize {
    20
}

fn default_neighbours() -> usize {
    4
}

fn default_grid_size() -> usize {
    8
}

fn default_exponent() -> f64 {
    3.0
}

fn default_attribute_nodes() -> usize {
    10
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig::Random {
            nodes: default_random_nodes(),
            probability: default_random_probability(),
            connected: false,
        }
    }
}

impl GeneratorConfig {
    /// Runs the selected generator.
    pub fn build(&self, rng: &mut RngHandle) -> Result<GeneratedNetwork, NetError> {
        Ok(match *self {
            GeneratorConfig::Random {
                nodes,
                probability,
                connected,
            } => {
                let graph = if connected {
                    generate_connected_random_graph(nodes, probability, rng)?
                } else {
                    generate_random_graph(nodes, probability, rng)?
                };
                GeneratedNetwork::Graph(graph)
            }
            GeneratorConfig::WattsStrogatz {
                nodes,
                neighbours,
                rewiring,
            } => GeneratedNetwork::SmallWorld(generate_watts_strogatz_graph(
                nodes, neighbours, rewiring, rng,
            )?),
            GeneratorConfig::Kleinberg {
                grid_size,
                exponent,
            } => GeneratedNetwork::Lattice(generate_kleinberg_grid(grid_size, exponent, rng)?),
            GeneratorConfig::Attributes { nodes } => {
                GeneratedNetwork::Graph(generate_attribute_graph(nodes, rng)?)
            }
        })
    }
}

/// Output of [`GeneratorConfig::build`].
#[derive(Debug, Clone)]
pub enum GeneratedNetwork {
    /// Random or attribute graph.
    Graph(Graph),
    /// Watts–Strogatz graph with rewiring statistics.
    SmallWorld(WattsStrogatzGraph),
    /// Kleinberg lattice with per-node adjacency.
    Lattice(KleinbergLattice),
}

impl GeneratedNetwork {
    /// Flattened graph view.
    pub fn graph(&self) -> Graph {
        match self {
            GeneratedNetwork::Graph(graph) => graph.clone(),
            GeneratedNetwork::SmallWorld(generated) => generated.graph.clone(),
            GeneratedNetwork::Lattice(lattice) => lattice.to_graph(),
        }
    }

    /// Structural hash of the flattened graph.
    pub fn hash(&self) -> String {
        canonical_hash(&self.graph())
    }

    /// Pretty JSON; lattices keep their adjacency and shortcut fields.
    pub fn to_json(&self) -> Result<String, NetError> {
        match self {
            GeneratedNetwork::Graph(graph) => graph_to_json(graph),
            GeneratedNetwork::SmallWorld(generated) => serde_json::to_string_pretty(generated)
                .map_err(|err| NetError::Serde(ErrorInfo::new("serialize-json", err.to_string()))),
            GeneratedNetwork::Lattice(lattice) => lattice_to_json(lattice),
        }
    }
}

/// Greedy navigation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Pause between paced frames, in milliseconds.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// Step ceiling of the paced walk.
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    /// Start node; defaults to the `(0, 0, 0)` corner.
    #[serde(default)]
    pub start: Option<Coord>,
    /// Target node; defaults to the opposite corner.
    #[serde(default)]
    pub target: Option<Coord>,
}

fn default_delay_ms() -> u64 {
    DEFAULT_STEP_DELAY.as_millis() as u64
}

fn default_max_steps() -> usize {
    PACED_MAX_STEPS
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            max_steps: default_max_steps(),
            start: None,
            target: None,
        }
    }
}

impl NavigationConfig {
    /// Pacing for the paced driver.
    pub fn pacing(&self) -> PacingConfig {
        PacingConfig {
            delay: Duration::from_millis(self.delay_ms),
            max_steps: self.max_steps,
        }
    }

    /// Resolves the walk endpoints, falling back to opposite corners.
    pub fn endpoints(&self, lattice: &KleinbergLattice) -> (Coord, Coord) {
        let (near, far) = lattice.corners();
        (self.start.unwrap_or(near), self.target.unwrap_or(far))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = RunConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.navigation.pacing(), PacingConfig::default());
    }

    #[test]
    fn variant_fields_default_individually() {
        let config = RunConfig::from_yaml_str(
            "seed: 3\ngenerator:\n  type: watts-strogatz\n  rewiring: 0.2\n",
        )
        .unwrap();
        assert_eq!(
            config.generator,
            GeneratorConfig::WattsStrogatz {
                nodes: 20,
                neighbours: 4,
                rewiring: 0.2,
            }
        );

        let kleinberg = RunConfig::from_yaml_str("generator:\n  type: kleinberg\n").unwrap();
        assert_eq!(
            kleinberg.generator,
            GeneratorConfig::Kleinberg {
                grid_size: 8,
                exponent: 3.0,
            }
        );
    }

    #[test]
    fn unknown_generator_is_a_config_error() {
        let err = RunConfig::from_yaml_str("generator:\n  type: barabasi\n").unwrap_err();
        assert!(matches!(err, NetError::Config(_)));
        assert_eq!(err.info().code, "parse-config");
    }

    #[test]
    fn build_matches_direct_generation() {
        let config = RunConfig::from_yaml_str("seed: 9\ngenerator:\n  type: attributes\n").unwrap();
        let network = config
            .generator
            .build(&mut RngHandle::from_seed(config.seed))
            .unwrap();
        let direct = generate_attribute_graph(10, &mut RngHandle::from_seed(9)).unwrap();
        assert_eq!(network.hash(), canonical_hash(&direct));
    }
}
