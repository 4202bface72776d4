//! Strategy traits for comparing ancestor chains and individual nodes.
//!
//! Both strategies must be pure functions of their explicit inputs; the
//! finder relies on that to stay stateless and reentrant.

use crate::path::Path;
use crate::tree::NodeData;

/// Structural overlap between two root-to-node chains.
pub trait PathDistance {
    /// Number of structurally matching nodes shared by the two chains, in
    /// order: 0 means nothing matches, and the result can never exceed the
    /// shorter chain's length. The chains may come from different trees.
    fn distance(&self, path1: &Path<'_>, path2: &Path<'_>) -> usize;
}

/// Similarity between two nodes, as a value in `[0, 1]`:
/// 0 = strongly different, 1 = the same for matching purposes.
pub trait NodeDistance {
    /// Score `node2` against `node1` given how much structural context the
    /// candidate's chain shares with the reference chain: `lcs_overlap` is
    /// the candidate chain's overlap, `comparison_depth` the number of
    /// trailing ancestor levels the overlap is normalized against.
    fn distance(
        &self,
        node1: &NodeData,
        node2: &NodeData,
        lcs_overlap: usize,
        comparison_depth: usize,
    ) -> f64;
}
