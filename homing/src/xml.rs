//! XML documents via xml5ever, tuned for accessibility-tree dumps.

use crate::ParseError;
use crate::convert::{ConvertOptions, document_to_tree};
use columba::Tree;
use markup5ever_rcdom::RcDom;
use tendril::TendrilSink;
use xml5ever::driver::{XmlParseOpts, parse_document};

const OPTIONS: ConvertOptions = ConvertOptions {
    root_name: "hierarchy",
    skip_blank_text: true,
};

/// Parse an XML document into an element tree rooted at its `<hierarchy>`
/// element.
///
/// Unlike [`parse_html`](crate::parse_html), text nodes that normalize to a
/// single space are dropped: in a pretty-printed dump they carry layout, not
/// content. Fails with [`ParseError::RootNotFound`] when the document has no
/// `<hierarchy>` element.
pub fn parse_xml(input: &str) -> Result<Tree, ParseError> {
    let dom: RcDom = parse_document(RcDom::default(), XmlParseOpts::default()).one(input);
    document_to_tree(&dom.document, &OPTIONS)
}
