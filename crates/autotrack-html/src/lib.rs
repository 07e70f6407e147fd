//! autotrack HTML loader
//!
//! Builds `autotrack_dom::DomTree` values from HTML source using html5ever.
//! Mostly used to build fixture documents for the resolvers.

mod parser;

pub use parser::HtmlParser;

use autotrack_dom::DomTree;

/// Parse an HTML string into a DOM tree
pub fn parse(html: &str) -> Result<DomTree, ParseError> {
    HtmlParser::new().parse(html)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to build DOM: {0}")]
    Dom(#[from] autotrack_dom::DomError),
}
