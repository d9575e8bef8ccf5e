//! `predict` subcommand: Adamic–Adar scoring of a candidate link.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use netsci_core::errors::NetError;
use netsci_core::NodeKey;
use netsci_graph::{
    adamic_adar, calculate_similarity, graph_from_json, rank_candidate_links, AttributeNode, Graph,
};
use tracing::info;

use crate::commands::{emit, parse_node_key};

/// Arguments of `netsci-sim predict`.
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Graph JSON to score.
    #[arg(long)]
    pub graph: PathBuf,
    /// Source node (label, or `x,y,z` for lattice nodes).
    #[arg(long)]
    pub source: String,
    /// Target node; ranks every unlinked candidate when omitted.
    #[arg(long)]
    pub target: Option<String>,
    /// Score shared attributes instead of common neighbours.
    #[arg(long)]
    pub attributes: bool,
    /// Output file for the report; stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Scores a candidate link or ranks all candidates of a source node.
pub fn run(args: &PredictArgs) -> Result<(), Box<dyn Error>> {
    let graph = graph_from_json(&fs::read_to_string(&args.graph)?)?;
    let source = parse_node_key(&args.source);

    let payload = match (&args.target, args.attributes) {
        (Some(target), true) => {
            let target = parse_node_key(target);
            let score = calculate_similarity(
                attribute_node(&graph, &source)?,
                attribute_node(&graph, &target)?,
                graph.attribute_nodes(),
            );
            info!(%source, %target, score = score.score, "attribute similarity");
            serde_json::to_string_pretty(&score)?
        }
        (Some(target), false) => {
            let target = parse_node_key(target);
            let score = adamic_adar(&graph.adjacency(), &source, &target)?;
            info!(%source, %target, score = score.score, "adamic-adar score");
            serde_json::to_string_pretty(&score)?
        }
        (None, false) => {
            let ranked = rank_candidate_links(&graph.adjacency(), &source)?;
            info!(%source, candidates = ranked.len(), "ranked candidate links");
            serde_json::to_string_pretty(&ranked)?
        }
        (None, true) => return Err("--attributes scoring needs --target".into()),
    };
    emit(args.out.as_deref(), &payload)
}

fn attribute_node<'a>(graph: &'a Graph, key: &NodeKey) -> Result<&'a AttributeNode, NetError> {
    graph
        .node(key)
        .and_then(|node| node.as_attribute())
        .ok_or_else(|| NetError::unknown_node(key))
}
