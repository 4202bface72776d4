//! HTML documents via html5ever.

use crate::ParseError;
use crate::convert::{ConvertOptions, document_to_tree};
use columba::Tree;
use markup5ever_rcdom::RcDom;
use tendril::TendrilSink;

const OPTIONS: ConvertOptions = ConvertOptions {
    root_name: "html",
    skip_blank_text: false,
};

/// Parse an HTML document into an element tree rooted at its `<html>`
/// element.
///
/// html5ever applies browser-grade error recovery, so any markup a browser
/// renders yields a tree (an `<html>` element is synthesized when missing).
/// Whitespace-only text nodes are kept: they are part of what the page
/// rendered.
pub fn parse_html(input: &str) -> Result<Tree, ParseError> {
    let dom: RcDom = html5ever::parse_document(RcDom::default(), Default::default()).one(input);
    document_to_tree(&dom.document, &OPTIONS)
}
