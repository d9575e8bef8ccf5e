//! Attribute-based Adamic–Adar similarity (Adamic & Adar, 2003).
//!
//! Every attribute value is flattened to a `category:value` token. Two nodes
//! sharing a token gain `1 / log10(f)` where `f` is how many nodes in the
//! population carry it, so rare shared attributes weigh more.

use std::collections::HashMap;

use indexmap::IndexSet;
use netsci_core::errors::NetError;
use netsci_core::rng::RngHandle;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::model::{AttributeMap, AttributeNode, Edge, Graph, Node};
use crate::params::{ensure_node_count, round_to};
use crate::random::node_label;

/// Attribute categories and their candidate values.
pub const ATTRIBUTE_CATEGORIES: [(&str, [&str; 8]); 4] = [
    (
        "Interests",
        ["Music", "Sports", "Cooking", "Coding", "Gaming", "Reading", "Art", "Travel"],
    ),
    (
        "Location",
        ["New York", "London", "Tokyo", "Vegas", "Istanbul", "Paris", "Berlin", "Seoul"],
    ),
    (
        "Language",
        ["English", "Spanish", "Turkish", "Japanese", "French", "German", "Chinese", "Russian"],
    ),
    (
        "Device",
        ["iPhone", "Android", "Windows", "MacOS", "Linux", "iPad", "ChromeOS", "XBox"],
    ),
];

/// Probability that a node draws two values for a category instead of one.
pub const SECOND_VALUE_PROBABILITY: f64 = 0.3;

/// Similarity a pair must exceed before the generator draws an edge between them.
pub const DISPLAY_EDGE_THRESHOLD: f64 = 0.8;

/// Stand-in frequency for tokens seen at most once, keeping `1/log10` finite.
pub const UNIQUE_TOKEN_FREQUENCY: f64 = 1.1;

/// Flattens an attribute map to `category:value` tokens in insertion order.
pub fn flatten_attributes(attributes: &AttributeMap) -> Vec<String> {
    attributes
        .iter()
        .flat_map(|(category, values)| values.iter().map(move |value| format!("{category}:{value}")))
        .collect()
}

/// Global token frequencies of a population.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeFrequencies {
    counts: HashMap<String, usize>,
}

impl AttributeFrequencies {
    /// Counts how many population members carry each token.
    pub fn from_population<'a, I>(population: I) -> Self
    where
        I: IntoIterator<Item = &'a AttributeNode>,
    {
        let mut counts = HashMap::new();
        for node in population {
            for token in flatten_attributes(&node.attributes) {
                *counts.entry(token).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    /// Frequency of `token`; 0 when no member carries it.
    pub fn frequency(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }
}

/// Weight of a shared token seen `frequency` times in the population.
pub fn token_weight(frequency: usize) -> f64 {
    if frequency > 1 {
        1.0 / (frequency as f64).log10()
    } else {
        1.0 / UNIQUE_TOKEN_FREQUENCY.log10()
    }
}

/// One attribute shared by the scored pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharedAttribute {
    /// `category:value` token.
    pub name: String,
    /// Population frequency of the token.
    pub frequency: usize,
    /// Weight added to the score.
    pub contribution: f64,
}

/// Attribute similarity with its per-token breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityScore {
    /// Sum of contributions rounded to four decimals.
    pub score: f64,
    /// Shared tokens in source order.
    pub shared_attributes: Vec<SharedAttribute>,
}

/// Scores two attribute nodes against precomputed population frequencies.
///
/// Nodes with equal identifiers score 0.
pub fn similarity_with_frequencies(
    source: &AttributeNode,
    target: &AttributeNode,
    frequencies: &AttributeFrequencies,
) -> SimilarityScore {
    if source.id == target.id {
        return SimilarityScore {
            score: 0.0,
            shared_attributes: Vec::new(),
        };
    }
    let target_tokens: IndexSet<String> = flatten_attributes(&target.attributes)
        .into_iter()
        .collect();
    let mut raw = 0.0;
    let shared_attributes: Vec<SharedAttribute> = flatten_attributes(&source.attributes)
        .into_iter()
        .filter(|token| target_tokens.contains(token))
        .map(|name| {
            let frequency = frequencies.frequency(&name);
            let contribution = token_weight(frequency);
            raw += contribution;
            SharedAttribute {
                name,
                frequency,
                contribution,
            }
        })
        .collect();
    SimilarityScore {
        score: round_to(raw, 4),
        shared_attributes,
    }
}

/// Scores two attribute nodes against the population they belong to.
pub fn calculate_similarity<'a, I>(
    source: &AttributeNode,
    target: &AttributeNode,
    population: I,
) -> SimilarityScore
where
    I: IntoIterator<Item = &'a AttributeNode>,
{
    let frequencies = AttributeFrequencies::from_population(population);
    similarity_with_frequencies(source, target, &frequencies)
}

fn random_attributes(rng: &mut RngHandle) -> AttributeMap {
    let mut attributes = AttributeMap::new();
    for (category, options) in ATTRIBUTE_CATEGORIES {
        let count = if rng.gen_bool(SECOND_VALUE_PROBABILITY) { 2 } else { 1 };
        let values: IndexSet<String> = options
            .choose_multiple(rng, count)
            .map(|value| (*value).to_owned())
            .collect();
        attributes.insert(category.to_owned(), values);
    }
    attributes
}

/// Generates `n_nodes` attribute nodes and links pairs whose similarity
/// exceeds [`DISPLAY_EDGE_THRESHOLD`].
///
/// Each node draws one value per category, or two with probability
/// [`SECOND_VALUE_PROBABILITY`]. The edges only aid visualisation.
pub fn generate_attribute_graph(n_nodes: usize, rng: &mut RngHandle) -> Result<Graph, NetError> {
    ensure_node_count("n", n_nodes)?;
    let members: Vec<AttributeNode> = (0..n_nodes)
        .map(|index| AttributeNode {
            id: node_label(index),
            attributes: random_attributes(rng),
        })
        .collect();

    let frequencies = AttributeFrequencies::from_population(&members);
    let mut edges = Vec::new();
    for (i, source) in members.iter().enumerate() {
        for target in &members[i + 1..] {
            let similarity = similarity_with_frequencies(source, target, &frequencies);
            if similarity.score > DISPLAY_EDGE_THRESHOLD {
                edges.push(Edge::new(source.id.as_str(), target.id.as_str()));
            }
        }
    }
    debug!(nodes = n_nodes, edges = edges.len(), "generated attribute graph");

    let nodes = members.into_iter().map(Node::Attribute).collect();
    Ok(Graph::from_parts_unchecked(nodes, edges))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str, pairs: &[(&str, &str)]) -> AttributeNode {
        let mut attributes = AttributeMap::new();
        for (category, value) in pairs {
            attributes
                .entry((*category).to_owned())
                .or_default()
                .insert((*value).to_owned());
        }
        AttributeNode {
            id: id.to_owned(),
            attributes,
        }
    }

    #[test]
    fn shared_tokens_weighted_by_population_frequency() {
        let a = member("a", &[("Interests", "Music"), ("Location", "Paris")]);
        let b = member("b", &[("Interests", "Music"), ("Location", "Paris")]);
        let c = member("c", &[("Interests", "Music"), ("Location", "Tokyo")]);
        let population = [a.clone(), b.clone(), c];

        let result = calculate_similarity(&a, &b, &population);
        let names: Vec<&str> = result
            .shared_attributes
            .iter()
            .map(|shared| shared.name.as_str())
            .collect();
        assert_eq!(names, vec!["Interests:Music", "Location:Paris"]);
        assert_eq!(result.shared_attributes[0].frequency, 3);
        assert_eq!(result.shared_attributes[1].frequency, 2);
        let expected = 1.0 / 3f64.log10() + 1.0 / 2f64.log10();
        assert_eq!(result.score, round_to(expected, 4));
    }

    #[test]
    fn unique_tokens_use_fixed_fallback() {
        assert_eq!(token_weight(1), 1.0 / 1.1f64.log10());
        assert_eq!(token_weight(0), token_weight(1));

        let a = member("a", &[("Device", "Linux")]);
        let b = member("b", &[("Device", "Linux")]);
        let result = calculate_similarity(&a, &b, std::iter::empty());
        assert_eq!(result.shared_attributes[0].frequency, 0);
        assert_eq!(result.score, round_to(1.0 / 1.1f64.log10(), 4));
    }

    #[test]
    fn same_node_and_disjoint_nodes_score_zero() {
        let a = member("a", &[("Language", "French")]);
        let b = member("b", &[("Language", "German")]);
        assert_eq!(calculate_similarity(&a, &a, [&a]).score, 0.0);
        let disjoint = calculate_similarity(&a, &b, [&a, &b]);
        assert_eq!(disjoint.score, 0.0);
        assert!(disjoint.shared_attributes.is_empty());
    }

    #[test]
    fn generated_nodes_carry_one_or_two_values_per_category() {
        let mut rng = RngHandle::from_seed(5);
        let graph = generate_attribute_graph(25, &mut rng).unwrap();
        assert_eq!(graph.node_count(), 25);
        for node in graph.attribute_nodes() {
            assert_eq!(node.attributes.len(), ATTRIBUTE_CATEGORIES.len());
            for values in node.attributes.values() {
                assert!((1..=2).contains(&values.len()));
            }
        }
        let population: Vec<&AttributeNode> = graph.attribute_nodes().collect();
        let frequencies = AttributeFrequencies::from_population(population.iter().copied());
        for edge in graph.edges() {
            let find = |key: &netsci_core::NodeKey| {
                population
                    .iter()
                    .find(|node| key.as_label() == Some(node.id.as_str()))
                    .copied()
                    .unwrap()
            };
            let score =
                similarity_with_frequencies(find(&edge.source), find(&edge.target), &frequencies);
            assert!(score.score > DISPLAY_EDGE_THRESHOLD);
        }
    }
}
