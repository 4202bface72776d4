//! # Columba
//!
//! Self-healing element relocation: given the recorded root-to-element chain
//! of a DOM-like tree and a freshly parsed version of the same document, rank
//! the nodes of the new tree by likeness to the recorded element.
//!
//! Named after *Columba livia*, the homing pigeon.
//!
//! ## Algorithm overview
//!
//! 1. **Enumerate**: every root-to-leaf chain of the new tree
//! 2. **Filter**: keep chains that structurally overlap (longest common
//!    subsequence over tag + id) the recorded chain
//! 3. **Score**: every node of each surviving chain's overlapping suffix,
//!    with a weighted heuristic over tag, id, text, classes and attributes
//! 4. **Rank**: group by score, sort descending, truncate
//!
//! The search may legitimately return nothing (the element is gone) or
//! several tied candidates (the document no longer distinguishes them).
//!
//! ## Usage
//!
//! ```rust
//! use columba::{NodeBuilder, Path, PathFinder, TreeBuilder};
//!
//! // The chain recorded when the element was last seen.
//! let mut recorded = TreeBuilder::new();
//! let button = recorded.insert(
//!     NodeBuilder::new("button").attributes([("id", "login"), ("class", "btn primary")]),
//! );
//! let body = recorded.insert(NodeBuilder::new("body").child(button));
//! let html = recorded.insert(NodeBuilder::new("html").child(body));
//! let recorded = recorded.finish(html);
//! let reference = Path::to(recorded.get(button).unwrap());
//!
//! // The same page, changed: the id was renamed.
//! let mut changed = TreeBuilder::new();
//! let button = changed.insert(
//!     NodeBuilder::new("button").attributes([("id", "login2"), ("class", "btn primary")]),
//! );
//! let body = changed.insert(NodeBuilder::new("body").child(button));
//! let html = changed.insert(NodeBuilder::new("html").child(body));
//! let changed = changed.finish(html);
//!
//! let healed = PathFinder::new()
//!     .find_nearest(&reference, changed.root())
//!     .expect("the button is still there");
//! assert_eq!(healed.data().id(), Some("login2"));
//! ```

#![warn(missing_docs)]

mod tracing_macros;

mod distance;
mod finder;
mod heuristic;
mod lcs;
mod path;
mod similarity;
mod tree;

pub use distance::{NodeDistance, PathDistance};
pub use finder::{PathFinder, Scored, ScoredCandidates};
pub use heuristic::HeuristicNodeDistance;
pub use indextree::NodeId;
pub use lcs::LcsPathDistance;
pub use path::Path;
pub use tree::{NodeBuilder, NodeData, NodeRef, PRIMARY_ATTRIBUTES, Tree, TreeBuilder};
