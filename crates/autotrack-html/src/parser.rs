//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it to the arena DOM. Inline
//! `on<event>` attributes become directly-assigned handlers, the same way a
//! browser fills the element's handler slot from markup.

use autotrack_dom::{DomTree, NodeId};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::ParseError;

/// HTML5 parser
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse an HTML string into a DOM tree
    pub fn parse(&self, html: &str) -> Result<DomTree, ParseError> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())?;

        let mut tree = DomTree::new();
        let root = tree.root();
        self.convert_node(&dom.document, &mut tree, root)?;

        tracing::debug!("Parsed {} nodes", tree.len());
        Ok(tree)
    }

    /// Convert an RcDom node to our DOM format
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) -> Result<(), ParseError> {
        match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, parent)?;
                }
            }
            RcNodeData::Text { contents } => {
                let text = contents.borrow().to_string();
                if !text.trim().is_empty() {
                    tree.append_text(parent, &text)?;
                }
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(contents);
                tree.append_child(parent, id)?;
            }
            RcNodeData::Element { name, attrs, .. } => {
                let id = tree.append_element(parent, &name.local)?;

                for attr in attrs.borrow().iter() {
                    let attr_name: &str = &attr.name.local;
                    tree.set_attr(id, attr_name, &attr.value)?;
                    if let Some(event) = attr_name.strip_prefix("on").filter(|e| !e.is_empty()) {
                        tree.set_handler(id, event)?;
                    }
                }

                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, id)?;
                }
            }
            RcNodeData::Doctype { .. } | RcNodeData::ProcessingInstruction { .. } => {}
        }
        Ok(())
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autotrack_dom::TreeAccess;

    #[test]
    fn test_parse_simple() {
        let tree = HtmlParser::new()
            .parse("<html><head><title>Test</title></head><body><p id=\"p\">Hello</p></body></html>")
            .unwrap();

        let p = tree.element_by_id("p").unwrap();
        assert_eq!(tree.tag_name(p), Some("p"));
        assert_eq!(tree.text_content(p), "Hello");
    }

    #[test]
    fn test_inline_handler_attribute() {
        let tree = HtmlParser::new()
            .parse("<div id=\"d\" onclick=\"go()\"><span id=\"s\" on=\"x\"></span></div>")
            .unwrap();

        let div = tree.element_by_id("d").unwrap();
        let span = tree.element_by_id("s").unwrap();
        assert!(tree.has_direct_handler(div, "click"));
        assert_eq!(tree.attribute(div, "onclick"), Some("go()"));
        assert!(!tree.has_direct_handler(span, ""));
    }
}
