use netsci_core::errors::NetError;
use netsci_core::NodeKey;
use serde::Serialize;

use crate::adjacency::AdjacencyIndex;
use crate::params::round_to;

/// Contribution of one common neighbour to an Adamic–Adar score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighbourContribution {
    /// The common neighbour.
    pub id: NodeKey,
    /// Its degree.
    pub degree: usize,
    /// `1 / log10(degree)`, or 0 for degree-1 neighbours.
    pub contribution: f64,
}

/// Topological Adamic–Adar score with its per-neighbour breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdamicAdarScore {
    /// Sum of contributions rounded to four decimals.
    pub score: f64,
    /// Common neighbours in source-neighbour order.
    pub neighbours: Vec<NeighbourContribution>,
}

impl AdamicAdarScore {
    fn zero() -> Self {
        Self {
            score: 0.0,
            neighbours: Vec::new(),
        }
    }
}

/// Weight of a common neighbour of the given degree.
///
/// A degree-1 neighbour would divide by `log10(1) = 0`; it contributes
/// nothing instead.
pub fn neighbour_weight(degree: usize) -> f64 {
    if degree > 1 {
        1.0 / (degree as f64).log10()
    } else {
        0.0
    }
}

fn score_positions(index: &AdjacencyIndex, source: usize, target: usize) -> AdamicAdarScore {
    if source == target {
        return AdamicAdarScore::zero();
    }
    let target_neighbours = index.neighbours(target);
    let mut raw = 0.0;
    let neighbours: Vec<NeighbourContribution> = index
        .neighbours(source)
        .iter()
        .filter(|candidate| target_neighbours.contains(*candidate))
        .map(|&common| {
            let degree = index.degree(common);
            let contribution = neighbour_weight(degree);
            raw += contribution;
            NeighbourContribution {
                id: index.key(common).clone(),
                degree,
                contribution,
            }
        })
        .collect();
    AdamicAdarScore {
        score: round_to(raw, 4),
        neighbours,
    }
}

/// Scores the likelihood of a link between `source` and `target`.
///
/// Sums `1 / log10(degree(u))` over common neighbours `u`. A node scored
/// against itself scores 0.
pub fn adamic_adar(
    index: &AdjacencyIndex,
    source: &NodeKey,
    target: &NodeKey,
) -> Result<AdamicAdarScore, NetError> {
    let source = index.require(source)?;
    let target = index.require(target)?;
    Ok(score_positions(index, source, target))
}

/// Candidate link from a source node, ranked by Adamic–Adar score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    /// Candidate endpoint.
    pub target: NodeKey,
    /// Adamic–Adar score against the source.
    pub score: f64,
}

/// Scores `source` against every node it is not yet linked to.
///
/// Candidates with a zero score are omitted; ties keep node order.
pub fn rank_candidate_links(
    index: &AdjacencyIndex,
    source: &NodeKey,
) -> Result<Vec<RankedCandidate>, NetError> {
    let source_pos = index.require(source)?;
    let mut ranked: Vec<RankedCandidate> = (0..index.len())
        .filter(|&candidate| candidate != source_pos && !index.are_adjacent(source_pos, candidate))
        .filter_map(|candidate| {
            let scored = score_positions(index, source_pos, candidate);
            (scored.score > 0.0).then(|| RankedCandidate {
                target: index.key(candidate).clone(),
                score: scored.score,
            })
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Edge, Node};

    fn star_with_tail() -> AdjacencyIndex {
        let nodes: Vec<Node> = ["A", "B", "C", "D"].into_iter().map(Node::plain).collect();
        let edges = vec![Edge::new("A", "C"), Edge::new("B", "C"), Edge::new("C", "D")];
        AdjacencyIndex::build(&nodes, &edges).unwrap()
    }

    #[test]
    fn common_neighbour_of_degree_three() {
        let index = star_with_tail();
        let result = adamic_adar(&index, &"A".into(), &"B".into()).unwrap();
        assert_eq!(result.score, 2.0959);
        assert_eq!(result.neighbours.len(), 1);
        assert_eq!(result.neighbours[0].id, NodeKey::from("C"));
        assert_eq!(result.neighbours[0].degree, 3);
    }

    #[test]
    fn self_pair_scores_zero() {
        let index = star_with_tail();
        let result = adamic_adar(&index, &"C".into(), &"C".into()).unwrap();
        assert_eq!(result, AdamicAdarScore::zero());
    }

    #[test]
    fn degree_one_neighbours_contribute_nothing() {
        assert_eq!(neighbour_weight(1), 0.0);
        assert_eq!(neighbour_weight(0), 0.0);
        assert!((neighbour_weight(10) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn ranking_skips_existing_links() {
        let index = star_with_tail();
        let ranked = rank_candidate_links(&index, &"A".into()).unwrap();
        let targets: Vec<String> = ranked.iter().map(|c| c.target.to_string()).collect();
        assert_eq!(targets, vec!["B", "D"]);
        assert!(ranked.iter().all(|c| c.score == 2.0959));
    }
}
