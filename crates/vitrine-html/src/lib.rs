//! Vitrine HTML Parser
//!
//! Builds a [`vitrine_dom::Document`] from page markup using html5ever.

mod parser;

pub use parser::HtmlParser;

use vitrine_dom::Document;

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Document {
    HtmlParser::new().parse(html)
}
