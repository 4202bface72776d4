//! Root-to-node ancestor chains.

use crate::tree::{NodeRef, Tree};
use indextree::NodeId;
use smallvec::SmallVec;

/// An ordered root-to-node chain of nodes within one [`Tree`]: the first node
/// is the document root, the last is the node of interest.
///
/// Paths are never empty (every constructor starts from an existing node)
/// and never change once built; [`extended`](Path::extended) yields a new one.
#[derive(Debug, Clone)]
pub struct Path<'t> {
    tree: &'t Tree,
    nodes: SmallVec<[NodeId; 12]>,
}

impl<'t> Path<'t> {
    /// A chain holding only `node`.
    pub fn new(node: NodeRef<'t>) -> Self {
        let mut nodes = SmallVec::new();
        nodes.push(node.node_id());
        Self {
            tree: node.tree(),
            nodes,
        }
    }

    /// The full chain from the tree root down to `node`.
    pub fn to(node: NodeRef<'t>) -> Self {
        let mut nodes: SmallVec<[NodeId; 12]> =
            node.ancestors().map(|ancestor| ancestor.node_id()).collect();
        nodes.reverse();
        Self {
            tree: node.tree(),
            nodes,
        }
    }

    /// A new chain with `child` appended.
    #[must_use]
    pub fn extended(&self, child: NodeRef<'t>) -> Self {
        debug_assert!(std::ptr::eq(self.tree, child.tree()));
        let mut nodes = self.nodes.clone();
        nodes.push(child.node_id());
        Self {
            tree: self.tree,
            nodes,
        }
    }

    /// Number of nodes in the chain, at least 1.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; kept for API completeness.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node at `index`, counting from the root.
    pub fn get(&self, index: usize) -> Option<NodeRef<'t>> {
        let tree = self.tree;
        self.nodes.get(index).map(|&id| NodeRef { tree, id })
    }

    /// The node of interest: the deepest node of the chain.
    pub fn last(&self) -> NodeRef<'t> {
        let id = *self.nodes.last().expect("paths are never empty");
        NodeRef {
            tree: self.tree,
            id,
        }
    }

    /// All nodes, root first.
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'t>> + '_ {
        let tree = self.tree;
        self.nodes.iter().map(move |&id| NodeRef { tree, id })
    }

    /// The nodes from `start` through the end of the chain.
    pub(crate) fn suffix(&self, start: usize) -> impl Iterator<Item = NodeRef<'t>> + '_ {
        let tree = self.tree;
        self.nodes[start..].iter().map(move |&id| NodeRef { tree, id })
    }
}
