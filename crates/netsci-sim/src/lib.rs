#![deny(missing_docs)]

//! Command-line driver for the netsci engine: YAML run configurations in,
//! JSON reports out.

pub mod commands;
pub mod config;

pub use config::{GeneratedNetwork, GeneratorConfig, NavigationConfig, RunConfig};
