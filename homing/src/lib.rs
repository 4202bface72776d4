//! Markup front end for [`columba`]: parse HTML or XML documents into the
//! immutable element trees the relocation engine searches.
//!
//! homing provides:
//! - **HTML parsing**: browser-compatible HTML5 tree construction via
//!   html5ever, rooted at the document's `<html>` element
//! - **XML parsing**: accessibility-tree dumps and other XML documents via
//!   xml5ever, rooted at the document's `<hierarchy>` element
//!
//! Both parsers produce a [`columba::Tree`] whose nodes carry everything the
//! heuristic scorer feeds on: tag, id, classes, sibling index, the remaining
//! attributes, and the accumulated text of the whole subtree.
//!
//! # Example
//!
//! ```rust
//! let tree = homing::parse_html(
//!     r#"<html><body><button id="login" class="btn">Sign in</button></body></html>"#,
//! )
//! .unwrap();
//!
//! assert_eq!(tree.root().data().tag(), "html");
//! assert_eq!(tree.root().data().inner_text(), "Sign in");
//! ```

mod tracing_macros;

mod convert;
mod html;
mod xml;

pub use columba::Tree;
pub use html::parse_html;
pub use xml::parse_xml;

/// Errors from turning a markup document into an element tree.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The document contains no element with the expected root name.
    #[error("no <{0}> element found in the document")]
    RootNotFound(&'static str),
}
