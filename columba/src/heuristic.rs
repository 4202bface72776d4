//! Weighted multi-factor node similarity.

use crate::distance::NodeDistance;
use crate::similarity::bounded_similarity;
use crate::tree::NodeData;
use rapidhash::RapidHashSet as HashSet;

const POINTS_FOR_LCS: f64 = 100.0;
const POINTS_FOR_TAG: f64 = 100.0;
const POINTS_FOR_ID: f64 = 50.0;
const POINTS_FOR_CLASS: f64 = 40.0;
const POINTS_FOR_TEXT: f64 = 30.0;
const POINTS_FOR_OTHER_ATTRIBUTE: f64 = 30.0;
// Computed but currently weightless; the slot stays in MAX_SCORE so the
// sibling-index signal can be re-enabled without rescaling the other weights.
const POINTS_FOR_INDEX: f64 = 0.0;

const MAX_SCORE: f64 = POINTS_FOR_LCS
    + POINTS_FOR_TAG
    + POINTS_FOR_ID
    + POINTS_FOR_CLASS
    + POINTS_FOR_TEXT
    + POINTS_FOR_OTHER_ATTRIBUTE
    + POINTS_FOR_INDEX;

/// Chains normalized against more than this many levels must clear
/// [`MIN_OVERLAP_RATIO`] to score at all.
const DEEP_CHAIN_DEPTH: usize = 5;
const MIN_OVERLAP_RATIO: f64 = 0.7;

const ID_SIMILARITY_THRESHOLD: f64 = 0.3;
const TEXT_SIMILARITY_THRESHOLD: f64 = 0.3;
const ATTRIBUTE_SIMILARITY_THRESHOLD: f64 = 0.75;

/// [`NodeDistance`] combining structural overlap, tag, id, text, class and
/// generic-attribute signals into one `[0, 1]` score.
///
/// Missing data never fails: an absent id, empty text, no classes or no
/// generic attributes each degrade to a defined zero or neutral contribution.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicNodeDistance;

impl NodeDistance for HeuristicNodeDistance {
    fn distance(
        &self,
        node1: &NodeData,
        node2: &NodeData,
        lcs_overlap: usize,
        comparison_depth: usize,
    ) -> f64 {
        // Too little structural correspondence relative to depth disqualifies
        // the candidate outright.
        if comparison_depth == 0 {
            return 0.0;
        }
        let overlap_ratio = lcs_overlap as f64 / comparison_depth as f64;
        if comparison_depth > DEEP_CHAIN_DEPTH && overlap_ratio < MIN_OVERLAP_RATIO {
            return 0.0;
        }

        let mut score = overlap_ratio * POINTS_FOR_LCS;

        if node1.tag().eq_ignore_ascii_case(node2.tag()) {
            score += POINTS_FOR_TAG;
        }
        if node1.index() == node2.index() {
            score += POINTS_FOR_INDEX;
        }
        if let (Some(id1), Some(id2)) = (node1.id(), node2.id()) {
            score += POINTS_FOR_ID
                * bounded_similarity(Some(id1), Some(id2), ID_SIMILARITY_THRESHOLD);
        }
        score += POINTS_FOR_TEXT
            * bounded_similarity(
                Some(node1.inner_text()),
                Some(node2.inner_text()),
                TEXT_SIMILARITY_THRESHOLD,
            );
        score += class_score(node1.classes(), node2.classes());
        score += other_attribute_score(node1, node2);

        score / MAX_SCORE
    }
}

/// Exact-overlap and near-miss contributions of the two class sets.
fn class_score(classes1: &HashSet<String>, classes2: &HashSet<String>) -> f64 {
    let union_len = classes1.union(classes2).count();
    let mut score = if union_len > 0 {
        let intersection_len = classes1.intersection(classes2).count();
        intersection_len as f64 * POINTS_FOR_CLASS / union_len as f64
    } else {
        // no classes on either side counts as a perfect match
        POINTS_FOR_CLASS
    };

    let difference1: Vec<&str> = classes1.difference(classes2).map(String::as_str).collect();
    let difference2: Vec<&str> = classes2.difference(classes1).map(String::as_str).collect();
    let differing = difference1.len() + difference2.len();
    if differing > 0 {
        // Renamed rather than removed classes: fuzzy-match the differing side
        // against the other node's full set.
        let near_miss = if !difference1.is_empty() {
            let full2: Vec<&str> = classes2.iter().map(String::as_str).collect();
            average_pairwise_similarity(&difference1, &full2)
        } else {
            let full1: Vec<&str> = classes1.iter().map(String::as_str).collect();
            average_pairwise_similarity(&full1, &difference2)
        };
        score += differing as f64 * POINTS_FOR_CLASS * near_miss / union_len as f64;
    }
    score
}

fn average_pairwise_similarity(from: &[&str], to: &[&str]) -> f64 {
    if from.is_empty() || to.is_empty() {
        return 0.0;
    }
    let mut total = 0.0;
    for &a in from {
        for &b in to {
            total += bounded_similarity(Some(a), Some(b), ATTRIBUTE_SIMILARITY_THRESHOLD);
        }
    }
    total / (from.len() * to.len()) as f64
}

/// Per-name similarity averaged over the union of generic attribute names; an
/// attribute present on only one side scores 0 for that name.
fn other_attribute_score(node1: &NodeData, node2: &NodeData) -> f64 {
    let names: HashSet<&str> = node1
        .other_attributes()
        .keys()
        .chain(node2.other_attributes().keys())
        .map(String::as_str)
        .collect();
    if names.is_empty() {
        // no generic attributes anywhere counts as a perfect match
        return POINTS_FOR_OTHER_ATTRIBUTE;
    }
    let total: f64 = names
        .iter()
        .map(|name| {
            POINTS_FOR_OTHER_ATTRIBUTE
                * bounded_similarity(
                    node1.other_attributes().get(*name).map(String::as_str),
                    node2.other_attributes().get(*name).map(String::as_str),
                    ATTRIBUTE_SIMILARITY_THRESHOLD,
                )
        })
        .sum();
    total / names.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{NodeBuilder, Tree, TreeBuilder};

    fn single(node: NodeBuilder) -> Tree {
        let mut builder = TreeBuilder::new();
        let id = builder.insert(node);
        builder.finish(id)
    }

    fn full_node() -> NodeBuilder {
        NodeBuilder::new("button")
            .id("login")
            .classes(["btn", "primary"])
            .other_attributes([("type", "submit"), ("data-test", "auth")])
            .content("Sign in")
    }

    #[test]
    fn test_identical_node_with_full_overlap_scores_one() {
        let tree = single(full_node());
        let data = tree.root().data();
        let score = HeuristicNodeDistance.distance(data, data, 4, 4);
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_score_stays_in_unit_interval() {
        let a = single(full_node());
        let b = single(
            NodeBuilder::new("a")
                .id("nav")
                .classes(["link"])
                .content("Home"),
        );
        let score = HeuristicNodeDistance.distance(a.root().data(), b.root().data(), 2, 3);
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn test_zero_comparison_depth_gates_everything() {
        let tree = single(full_node());
        let data = tree.root().data();
        assert_eq!(HeuristicNodeDistance.distance(data, data, 0, 0), 0.0);
    }

    #[test]
    fn test_weak_overlap_on_deep_chain_gates_everything() {
        let tree = single(full_node());
        let data = tree.root().data();
        // ratio 0.6 < 0.7 at depth 10
        assert_eq!(HeuristicNodeDistance.distance(data, data, 6, 10), 0.0);
        // ratio exactly 0.7 passes
        assert!(HeuristicNodeDistance.distance(data, data, 7, 10) > 0.0);
        // shallow chains are never ratio-gated
        assert!(HeuristicNodeDistance.distance(data, data, 1, 5) > 0.0);
    }

    #[test]
    fn test_absent_id_contributes_nothing() {
        let tree = single(
            NodeBuilder::new("button")
                .classes(["btn", "primary"])
                .other_attributes([("type", "submit")])
                .content("Sign in"),
        );
        let data = tree.root().data();
        assert_eq!(data.id(), None);
        let score = HeuristicNodeDistance.distance(data, data, 3, 3);
        let expected = (MAX_SCORE - POINTS_FOR_ID) / MAX_SCORE;
        assert!((score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_classless_sides_get_full_class_points() {
        let tree = single(NodeBuilder::new("span").id("x"));
        let data = tree.root().data();
        // everything matches perfectly, classless included
        assert_eq!(HeuristicNodeDistance.distance(data, data, 2, 2), 1.0);
    }

    #[test]
    fn test_renamed_class_earns_partial_near_miss_credit() {
        let a = single(NodeBuilder::new("div").id("x").classes(["btn-primary"]));
        let b = single(NodeBuilder::new("div").id("x").classes(["btn-primari"]));
        let score = HeuristicNodeDistance.distance(a.root().data(), b.root().data(), 1, 1);

        // sim("btn-primary", "btn-primari") = 10/11; union of 2 disjoint classes
        let near_miss = 10.0 / 11.0;
        let class_points = 2.0 * POINTS_FOR_CLASS * near_miss / 2.0;
        let expected = (POINTS_FOR_LCS
            + POINTS_FOR_TAG
            + POINTS_FOR_ID
            + POINTS_FOR_TEXT
            + POINTS_FOR_OTHER_ATTRIBUTE
            + class_points)
            / MAX_SCORE;
        assert!((score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_one_sided_attribute_drags_the_average() {
        let a = single(NodeBuilder::new("input").id("q").other_attributes([
            ("type", "text"),
            ("placeholder", "Search"),
        ]));
        let b = single(
            NodeBuilder::new("input")
                .id("q")
                .other_attributes([("type", "text")]),
        );
        let score = HeuristicNodeDistance.distance(a.root().data(), b.root().data(), 1, 1);

        // one perfect name, one absent on the right: average is 1/2
        let attribute_points = POINTS_FOR_OTHER_ATTRIBUTE / 2.0;
        let expected = (POINTS_FOR_LCS
            + POINTS_FOR_TAG
            + POINTS_FOR_ID
            + POINTS_FOR_TEXT
            + POINTS_FOR_CLASS
            + attribute_points)
            / MAX_SCORE;
        assert!((score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_tag_comparison_ignores_case() {
        let a = single(NodeBuilder::new("DIV").id("x"));
        let b = single(NodeBuilder::new("div").id("x"));
        assert_eq!(
            HeuristicNodeDistance.distance(a.root().data(), b.root().data(), 1, 1),
            1.0
        );
    }
}
