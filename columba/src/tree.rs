//! Immutable element-tree snapshots.
//!
//! A [`Tree`] owns its nodes in an [`indextree::Arena`]; parent and child
//! links are arena handles, so upward traversal never creates an ownership
//! cycle. Trees are assembled bottom-up: children are finalized through a
//! [`TreeBuilder`] before the parent that adopts them, and each child's
//! parent handle is wired exactly once, when that parent is inserted.
//!
//! # Example
//!
//! ```rust
//! use columba::{NodeBuilder, TreeBuilder};
//!
//! let mut builder = TreeBuilder::new();
//! let button = builder.insert(
//!     NodeBuilder::new("button").attributes([("id", "login"), ("class", "btn primary")]),
//! );
//! let body = builder.insert(NodeBuilder::new("body").child(button));
//! let tree = builder.finish(body);
//!
//! let button = tree.get(button).unwrap();
//! assert_eq!(button.data().id(), Some("login"));
//! assert_eq!(button.parent().unwrap().data().tag(), "body");
//! ```

use indextree::{Arena, NodeId};
use rapidhash::{RapidHashMap as HashMap, RapidHashSet as HashSet};

/// Attribute names modeled as dedicated [`NodeData`] fields instead of
/// entries in the generic attribute map.
pub const PRIMARY_ATTRIBUTES: [&str; 2] = ["id", "class"];

/// Immutable snapshot of one element of a hierarchical document.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    tag: String,
    id: Option<String>,
    classes: HashSet<String>,
    index: usize,
    other_attributes: HashMap<String, String>,
    inner_text: String,
}

impl NodeData {
    /// The element's tag name, verbatim from the source document.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The `id` attribute. `None` means the attribute was never set;
    /// `Some("")` means it was present but empty.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The class tokens, unordered and deduplicated.
    pub fn classes(&self) -> &HashSet<String> {
        &self.classes
    }

    /// 0-based ordinal among the element siblings under the same parent.
    pub fn index(&self) -> usize {
        self.index
    }

    /// All attributes other than `id` and `class`.
    pub fn other_attributes(&self) -> &HashMap<String, String> {
        &self.other_attributes
    }

    /// Text content of the whole subtree: every descendant text fragment in
    /// document order, joined with a newline.
    pub fn inner_text(&self) -> &str {
        &self.inner_text
    }

    /// Structural equality: two nodes are interchangeable for overlap
    /// computation when their tag and id agree, whatever the rest says.
    pub fn structurally_eq(&self, other: &NodeData) -> bool {
        self.tag == other.tag && self.id == other.id
    }
}

/// An immutable tree of [`NodeData`] snapshots.
#[derive(Debug)]
pub struct Tree {
    arena: Arena<NodeData>,
    root: NodeId,
}

impl Tree {
    /// The root node.
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: self.root,
        }
    }

    /// Look a node up by its id, if it belongs to this tree.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.arena.get(id).map(|_| NodeRef { tree: self, id })
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.arena.count()
    }

    pub(crate) fn data(&self, id: NodeId) -> &NodeData {
        self.arena[id].get()
    }
}

/// A borrowed handle to one node of a [`Tree`].
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'t> {
    pub(crate) tree: &'t Tree,
    pub(crate) id: NodeId,
}

impl<'t> NodeRef<'t> {
    /// The arena id of this node.
    pub fn node_id(self) -> NodeId {
        self.id
    }

    /// The node's snapshot.
    pub fn data(self) -> &'t NodeData {
        self.tree.data(self.id)
    }

    /// The owning parent, `None` for the root.
    pub fn parent(self) -> Option<NodeRef<'t>> {
        let tree = self.tree;
        tree.arena[self.id].parent().map(|id| NodeRef { tree, id })
    }

    /// The element children, in document order.
    pub fn children(self) -> impl Iterator<Item = NodeRef<'t>> {
        let tree = self.tree;
        self.id.children(&tree.arena).map(move |id| NodeRef { tree, id })
    }

    /// Whether this node has no children.
    pub fn is_leaf(self) -> bool {
        self.id.children(&self.tree.arena).next().is_none()
    }

    /// This node and its ancestors, walking up to the root.
    pub fn ancestors(self) -> impl Iterator<Item = NodeRef<'t>> {
        let tree = self.tree;
        self.id.ancestors(&tree.arena).map(move |id| NodeRef { tree, id })
    }

    pub(crate) fn tree(self) -> &'t Tree {
        self.tree
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

/// Accumulates finalized nodes; [`finish`](TreeBuilder::finish) seals the tree.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    arena: Arena<NodeData>,
}

impl TreeBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finalize one node: allocate its snapshot and wire every listed child's
    /// parent handle to it. The children must have been inserted earlier into
    /// this same builder.
    pub fn insert(&mut self, node: NodeBuilder) -> NodeId {
        let NodeBuilder {
            tag,
            id,
            classes,
            index,
            other_attributes,
            content,
            children,
        } = node;
        let node_id = self.arena.new_node(NodeData {
            tag,
            id,
            classes,
            index,
            other_attributes,
            inner_text: content.join("\n"),
        });
        for child in children {
            node_id.append(child, &mut self.arena);
        }
        node_id
    }

    /// Seal the builder into an immutable [`Tree`] rooted at `root`.
    pub fn finish(self, root: NodeId) -> Tree {
        debug_assert!(
            self.arena[root].parent().is_none(),
            "tree root must not have a parent"
        );
        Tree {
            arena: self.arena,
            root,
        }
    }
}

/// A builder for a single node's snapshot.
///
/// Mirrors how documents are read: children are finalized first and listed on
/// their parent's builder, and text fragments accumulate in document order
/// while the element is still open.
#[derive(Debug, Clone, Default)]
pub struct NodeBuilder {
    tag: String,
    id: Option<String>,
    classes: HashSet<String>,
    index: usize,
    other_attributes: HashMap<String, String>,
    content: Vec<String>,
    children: Vec<NodeId>,
}

impl NodeBuilder {
    /// A builder for an element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// The 0-based ordinal among the element siblings under the same parent.
    pub fn index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// Route a raw attribute list into the snapshot: `id` becomes the id
    /// field (present even when empty), `class` is split on whitespace into
    /// the class set with empty tokens dropped, and everything else lands in
    /// the generic attribute map. Attributes with blank names are discarded.
    pub fn attributes<I, K, V>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let attributes: Vec<(String, String)> = attributes
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        self.id = Some(
            attributes
                .iter()
                .find(|(name, _)| name == "id")
                .map(|(_, value)| value.clone())
                .unwrap_or_default(),
        );
        self.classes = attributes
            .iter()
            .find(|(name, _)| name == "class")
            .map(|(_, value)| value.split_whitespace().map(str::to_owned).collect())
            .unwrap_or_default();
        self.other_attributes = attributes
            .into_iter()
            .filter(|(name, _)| {
                !PRIMARY_ATTRIBUTES.contains(&name.as_str()) && !name.trim().is_empty()
            })
            .collect();
        self
    }

    /// Set the id directly.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the class set directly.
    pub fn classes<I>(mut self, classes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.classes = classes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the generic attribute map directly.
    pub fn other_attributes<I, K, V>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.other_attributes = attributes
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        self
    }

    /// Append one text fragment.
    pub fn content(mut self, fragment: impl Into<String>) -> Self {
        self.push_content(fragment);
        self
    }

    /// Append one text fragment through a mutable reference.
    pub fn push_content(&mut self, fragment: impl Into<String>) {
        self.content.push(fragment.into());
    }

    /// Adopt one previously inserted child.
    pub fn child(mut self, child: NodeId) -> Self {
        self.push_child(child);
        self
    }

    /// Adopt previously inserted children, in document order.
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        self.children.extend(children);
        self
    }

    /// Adopt one previously inserted child through a mutable reference.
    pub fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }
}

// =============================================================================
// Tests
// =============================================================================
