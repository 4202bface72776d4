//! Longest-common-subsequence overlap between ancestor chains.

use crate::distance::PathDistance;
use crate::path::Path;
use crate::tree::NodeData;

/// [`PathDistance`] based on the longest common subsequence of the two
/// chains under structural (tag, id) equality.
///
/// See <https://en.wikipedia.org/wiki/Longest_common_subsequence_problem>.
#[derive(Debug, Clone, Copy, Default)]
pub struct LcsPathDistance;

impl PathDistance for LcsPathDistance {
    fn distance(&self, path1: &Path<'_>, path2: &Path<'_>) -> usize {
        let a: Vec<&NodeData> = path1.iter().map(|node| node.data()).collect();
        let b: Vec<&NodeData> = path2.iter().map(|node| node.data()).collect();
        lcs(&a, &b)
    }
}

/// Classic O(m*n) table; chain lengths are bounded by document depth.
fn lcs(a: &[&NodeData], b: &[&NodeData]) -> usize {
    let (m, n) = (a.len(), b.len());
    let cell = |i: usize, j: usize| i * (n + 1) + j;
    let mut table = vec![0usize; (m + 1) * (n + 1)];
    for i in 1..=m {
        for j in 1..=n {
            table[cell(i, j)] = if a[i - 1].structurally_eq(b[j - 1]) {
                table[cell(i - 1, j - 1)] + 1
            } else {
                table[cell(i - 1, j)].max(table[cell(i, j - 1)])
            };
        }
    }
    table[cell(m, n)]
}
