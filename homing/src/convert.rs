//! Shared conversion from a parsed rcdom document into a [`columba::Tree`].

use crate::ParseError;
use crate::debug;
use columba::{NodeBuilder, NodeId, Tree, TreeBuilder};
use markup5ever_rcdom::{Handle, NodeData};
use std::collections::VecDeque;

/// Mode-specific knobs; HTML and XML conversion are otherwise identical.
pub(crate) struct ConvertOptions {
    /// Element name the logical document root is located by.
    pub root_name: &'static str,
    /// Drop text nodes that normalize to a single space. Accessibility dumps
    /// are full of indentation-only text that would drown the real content.
    pub skip_blank_text: bool,
}

pub(crate) fn document_to_tree(
    document: &Handle,
    options: &ConvertOptions,
) -> Result<Tree, ParseError> {
    let root =
        find_root(document, options.root_name).ok_or(ParseError::RootNotFound(options.root_name))?;
    let mut tree = TreeBuilder::new();
    let mut open = Vec::new();
    let root_id = convert_element(&mut tree, &root, 0, &mut open, options);
    let tree = tree.finish(root_id);
    debug!(
        nodes = tree.node_count(),
        root = options.root_name,
        "converted document"
    );
    Ok(tree)
}

/// Breadth-first search for the logical root element, starting at the
/// document node.
fn find_root(document: &Handle, name: &str) -> Option<Handle> {
    let mut queue = VecDeque::new();
    queue.push_back(document.clone());
    while let Some(node) = queue.pop_front() {
        if element_name(&node) == Some(name) {
            return Some(node);
        }
        queue.extend(node.children.borrow().iter().cloned());
    }
    None
}

fn element_name(node: &Handle) -> Option<&str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

/// Depth-first conversion. Children are finalized before their parent, and
/// every text fragment is pushed onto each open ancestor builder, so a node's
/// `inner_text` accumulates its whole subtree in document order.
fn convert_element(
    tree: &mut TreeBuilder,
    element: &Handle,
    index: usize,
    open: &mut Vec<NodeBuilder>,
    options: &ConvertOptions,
) -> NodeId {
    let attributes: Vec<(String, String)> = match &element.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
            .collect(),
        _ => Vec::new(),
    };
    let tag = element_name(element).unwrap_or_default();
    open.push(NodeBuilder::new(tag).index(index).attributes(attributes));

    let mut element_index = 0;
    for child in element.children.borrow().iter() {
        match &child.data {
            NodeData::Element { .. } => {
                let child_id = convert_element(tree, child, element_index, open, options);
                element_index += 1;
                if let Some(parent) = open.last_mut() {
                    parent.push_child(child_id);
                }
            }
            NodeData::Text { contents } => {
                let text = normalize_whitespace(&contents.borrow());
                if options.skip_blank_text && text == " " {
                    continue;
                }
                for ancestor in open.iter_mut() {
                    ancestor.push_content(text.clone());
                }
            }
            // comments, doctypes and processing instructions carry no
            // element structure
            _ => {}
        }
    }

    let node = open.pop().expect("builder stack is balanced");
    tree.insert(node)
}

/// Collapse every whitespace run into a single space, the way browsers
/// normalize rendered text; an indentation-only node becomes exactly `" "`.
fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_whitespace = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push(' ');
            }
            in_whitespace = true;
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }
    out
}
