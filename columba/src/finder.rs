//! Candidate search and ranking.
//!
//! [`PathFinder`] re-locates a recorded element in a freshly parsed tree:
//! enumerate every leaf path of the new tree, keep the ones that structurally
//! overlap the recorded chain, score every node of their overlapping
//! suffixes, then group by score and rank.

use crate::distance::{NodeDistance, PathDistance};
use crate::heuristic::HeuristicNodeDistance;
use crate::lcs::LcsPathDistance;
use crate::path::Path;
use crate::tree::NodeRef;
use crate::{debug, warn};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Sentinel floor that no score can fall below.
const DISABLED_MIN_SCORE: f64 = -1.0;

/// A score attached to a ranked value.
#[derive(Debug, Clone, Copy)]
pub struct Scored<T> {
    /// The score the producing distance function assigned.
    pub score: f64,
    /// The ranked value.
    pub value: T,
}

/// Total-order wrapper so exact score values can key a sorted map.
#[derive(Debug, Clone, Copy)]
struct ScoreKey(f64);

impl PartialEq for ScoreKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for ScoreKey {}

impl PartialOrd for ScoreKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoreKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Candidates grouped by the exact score they earned, together with the
/// comparison depth the scores were normalized against.
///
/// Produced by [`PathFinder::score_candidates`]; feed it back to
/// [`PathFinder::sorted_nodes`] to re-rank under a different limit or score
/// floor without recomputing any distances.
#[derive(Debug)]
pub struct ScoredCandidates<'s> {
    comparison_depth: usize,
    groups: BTreeMap<ScoreKey, Vec<NodeRef<'s>>>,
}

impl<'s> ScoredCandidates<'s> {
    /// Number of trailing ancestor levels the scores were normalized against.
    pub fn comparison_depth(&self) -> usize {
        self.comparison_depth
    }

    /// Total number of scored candidates. A node reachable through several
    /// overlapping leaf paths is counted once per path.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Whether no candidate survived the overlap filter.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Score groups in descending score order; order within a group is
    /// unspecified.
    pub fn groups(&self) -> impl Iterator<Item = (f64, &[NodeRef<'s>])> {
        self.groups
            .iter()
            .rev()
            .map(|(key, nodes)| (key.0, nodes.as_slice()))
    }
}

/// Re-locates a recorded element in a changed tree.
///
/// Holds one [`PathDistance`] and one [`NodeDistance`]. Both must be pure
/// functions of their inputs, which keeps the finder stateless: one instance
/// can serve any number of lookups, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct PathFinder<P = LcsPathDistance, N = HeuristicNodeDistance> {
    path_distance: P,
    node_distance: N,
}

impl PathFinder {
    /// A finder with the stock LCS and heuristic strategies.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: PathDistance, N: NodeDistance> PathFinder<P, N> {
    /// A finder with custom comparison strategies.
    pub fn with_strategies(path_distance: P, node_distance: N) -> Self {
        Self {
            path_distance,
            node_distance,
        }
    }

    /// The node of `search_root`'s tree that most likely is the recorded one,
    /// or `None` when nothing structurally overlaps `reference`.
    pub fn find_nearest<'s>(
        &self,
        reference: &Path<'_>,
        search_root: NodeRef<'s>,
    ) -> Option<NodeRef<'s>> {
        self.find(reference, search_root, 1)
            .into_iter()
            .next()
            .map(|scored| scored.value)
    }

    /// Up to `limit` nodes ranked by likeness to `reference`'s last node,
    /// best first. Ties share a score; their relative order is unspecified.
    pub fn find<'s>(
        &self,
        reference: &Path<'_>,
        search_root: NodeRef<'s>,
        limit: usize,
    ) -> Vec<Scored<NodeRef<'s>>> {
        self.sorted_nodes(
            &self.score_candidates(reference, search_root),
            limit,
            DISABLED_MIN_SCORE,
        )
    }

    /// Enumerate, filter and score every candidate without ranking it yet.
    ///
    /// Every leaf path of `search_root`'s tree is matched against `reference`;
    /// paths with zero overlap are discarded, and each surviving path
    /// contributes the nodes of its suffix from the last structurally matched
    /// depth down to the leaf.
    pub fn score_candidates<'s>(
        &self,
        reference: &Path<'_>,
        search_root: NodeRef<'s>,
    ) -> ScoredCandidates<'s> {
        let mut overlapping: Vec<(Path<'s>, usize)> = Vec::new();
        let mut max_overlap = 0;
        for leaf in leaf_paths(search_root) {
            let overlap = self.path_distance.distance(reference, &leaf);
            if overlap < 1 {
                continue;
            }
            max_overlap = max_overlap.max(overlap);
            overlapping.push((leaf, overlap));
        }

        let comparison_depth = max_overlap.min(reference.len());
        let target = reference.last();
        let mut groups: BTreeMap<ScoreKey, Vec<NodeRef<'s>>> = BTreeMap::new();
        for (leaf, overlap) in &overlapping {
            for candidate in leaf.suffix(overlap - 1) {
                let score = self.node_distance.distance(
                    target.data(),
                    candidate.data(),
                    *overlap,
                    comparison_depth,
                );
                groups.entry(ScoreKey(score)).or_default().push(candidate);
            }
        }
        debug!(
            surviving_paths = overlapping.len(),
            comparison_depth, "scored candidates"
        );
        ScoredCandidates {
            comparison_depth,
            groups,
        }
    }

    /// Rank previously scored candidates: groups below `min_score` are
    /// dropped, the rest flatten in descending score order and truncate to
    /// `limit`. A `min_score` above 1 is ignored, since every score lives in
    /// the producing metric's range.
    pub fn sorted_nodes<'s>(
        &self,
        candidates: &ScoredCandidates<'s>,
        limit: usize,
        min_score: f64,
    ) -> Vec<Scored<NodeRef<'s>>> {
        let min_score = normalize_min_score(min_score);
        let mut ranked = Vec::new();
        for (key, nodes) in candidates.groups.iter().rev() {
            if key.0 < min_score {
                debug!(score = key.0, min_score, "dropping group below score floor");
                continue;
            }
            for &node in nodes {
                if ranked.len() >= limit {
                    return ranked;
                }
                ranked.push(Scored {
                    score: key.0,
                    value: node,
                });
            }
        }
        ranked
    }
}

/// Score floors live in `[0, 1]`; anything above 1 would filter every result,
/// so it is treated as "no floor".
fn normalize_min_score(value: f64) -> f64 {
    if value > 1.0 {
        warn!(value, "minimum score ignored: it must be in [0, 1]");
        return DISABLED_MIN_SCORE;
    }
    value
}

/// Every root-to-leaf chain of the tree under `root`.
///
/// Walks an explicit work stack so document depth can never overflow the
/// call stack.
fn leaf_paths(root: NodeRef<'_>) -> Vec<Path<'_>> {
    let mut leaves = Vec::new();
    let mut work = vec![Path::new(root)];
    while let Some(path) = work.pop() {
        let node = path.last();
        if node.is_leaf() {
            leaves.push(path);
        } else {
            for child in node.children() {
                work.push(path.extended(child));
            }
        }
    }
    leaves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{NodeBuilder, Tree, TreeBuilder};

    /// html > body > (div#a > button, div#b)
    fn sample_tree() -> Tree {
        let mut builder = TreeBuilder::new();
        let button = builder.insert(NodeBuilder::new("button").index(0));
        let div_a = builder.insert(NodeBuilder::new("div").id("a").child(button));
        let div_b = builder.insert(NodeBuilder::new("div").id("b").index(1));
        let body = builder.insert(NodeBuilder::new("body").children([div_a, div_b]));
        let html = builder.insert(NodeBuilder::new("html").child(body));
        builder.finish(html)
    }

    #[test]
    fn test_leaf_paths_enumerates_every_leaf() {
        let tree = sample_tree();
        let leaves = leaf_paths(tree.root());
        assert_eq!(leaves.len(), 2);

        let mut tags: Vec<Vec<String>> = leaves
            .iter()
            .map(|path| path.iter().map(|n| n.data().tag().to_owned()).collect())
            .collect();
        tags.sort();
        assert_eq!(
            tags,
            [
                vec!["html", "body", "div"],
                vec!["html", "body", "div", "button"],
            ]
        );
    }

    #[test]
    fn test_comparison_depth_is_capped_by_reference_length() {
        let tree = sample_tree();
        let mut builder = TreeBuilder::new();
        let html = builder.insert(NodeBuilder::new("html"));
        let reference_tree = builder.finish(html);

        let reference = Path::new(reference_tree.root());
        let candidates = PathFinder::new().score_candidates(&reference, tree.root());
        // the best overlap is 1, and so is the reference length
        assert_eq!(candidates.comparison_depth(), 1);
    }

    #[test]
    fn test_zero_limit_returns_nothing() {
        let tree = sample_tree();
        let reference = Path::to(tree.root().children().next().unwrap());
        let finder = PathFinder::new();
        assert!(finder.find(&reference, tree.root(), 0).is_empty());
    }

    #[test]
    fn test_min_score_above_one_is_ignored() {
        let tree = sample_tree();
        let reference = Path::to(tree.root().children().next().unwrap());
        let finder = PathFinder::new();

        let candidates = finder.score_candidates(&reference, tree.root());
        let unfiltered = finder.sorted_nodes(&candidates, usize::MAX, DISABLED_MIN_SCORE);
        let normalized = finder.sorted_nodes(&candidates, usize::MAX, 2.0);
        assert_eq!(unfiltered.len(), normalized.len());
        assert!(!normalized.is_empty());
    }

    #[test]
    fn test_min_score_drops_low_groups() {
        let tree = sample_tree();
        let reference = Path::to(tree.root().children().next().unwrap());
        let finder = PathFinder::new();

        let candidates = finder.score_candidates(&reference, tree.root());
        for scored in finder.sorted_nodes(&candidates, usize::MAX, 0.9) {
            assert!(scored.score >= 0.9);
        }
    }

    #[test]
    fn test_groups_iterate_in_descending_order() {
        let tree = sample_tree();
        let reference = Path::to(tree.root().children().next().unwrap());
        let candidates = PathFinder::new().score_candidates(&reference, tree.root());

        let scores: Vec<f64> = candidates.groups().map(|(score, _)| score).collect();
        assert!(scores.windows(2).all(|pair| pair[0] > pair[1]));
        let grouped: usize = candidates.groups().map(|(_, group)| group.len()).sum();
        assert_eq!(candidates.len(), grouped);
    }
}
