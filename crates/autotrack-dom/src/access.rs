//! Tree Access
//!
//! The narrow read/write contract interaction resolvers need from a host
//! tree. Everything in `autotrack` is written against these traits, never
//! against `DomTree` directly.

use std::fmt::Debug;
use std::hash::Hash;

use crate::{DomTree, NodeId, query};

/// Read access to a rendered document tree
pub trait TreeAccess {
    /// Opaque node handle. Handles are borrowed references into the host
    /// tree; resolvers never own nodes.
    type Node: Copy + Eq + Hash + Debug;

    /// Attribute value, `None` if absent or the node is not an element
    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

    /// Parent node, `None` at the root
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Direct children in document order
    fn children(&self, node: Self::Node) -> impl Iterator<Item = Self::Node> + '_;

    /// Lowercase tag name, `None` for non-element nodes
    fn tag_name(&self, node: Self::Node) -> Option<&str>;

    /// Character data, `Some` only for text nodes
    fn text(&self, node: Self::Node) -> Option<&str>;

    /// Whether a handler is directly assigned for `event`. Listener
    /// registrations are not observed here.
    fn has_direct_handler(&self, node: Self::Node, event: &str) -> bool;

    /// Find the unique element whose id, once CSS-unescaped, equals the
    /// decoded `escaped_id`. Invalid identifiers match nothing.
    fn query_id(&self, escaped_id: &str) -> Option<Self::Node>;

    /// Check for an element node
    fn is_element(&self, node: Self::Node) -> bool {
        self.tag_name(node).is_some()
    }

    /// Check whether the tag name is one of `set`
    fn is_tag_in_set(&self, node: Self::Node, set: &[&str]) -> bool {
        self.tag_name(node).is_some_and(|tag| set.contains(&tag))
    }

    /// Walk from `node` (inclusive) up to the root
    fn ancestors(&self, node: Self::Node) -> Ancestors<'_, Self>
    where
        Self: Sized,
    {
        Ancestors { tree: self, next: Some(node) }
    }

    /// Topmost ancestor of `node`
    fn root_of(&self, node: Self::Node) -> Self::Node
    where
        Self: Sized,
    {
        self.ancestors(node).last().unwrap_or(node)
    }

    /// Descendants of `node` in document order, excluding `node`
    fn descendants(&self, node: Self::Node) -> Vec<Self::Node> {
        let mut out = Vec::new();
        let mut stack: Vec<Self::Node> = self.children(node).collect();
        stack.reverse();
        while let Some(current) = stack.pop() {
            out.push(current);
            let mark = stack.len();
            stack.extend(self.children(current));
            stack[mark..].reverse();
        }
        out
    }
}

/// Write access used by the marker protocol
pub trait TreeAccessMut: TreeAccess {
    /// Set an attribute. Returns false if `node` is not an element.
    fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str) -> bool;

    /// Remove an attribute. Returns false if `node` is not an element.
    fn remove_attribute(&mut self, node: Self::Node, name: &str) -> bool;
}

/// Parent-chain iterator, starting at the node itself
pub struct Ancestors<'a, T: TreeAccess> {
    tree: &'a T,
    next: Option<T::Node>,
}

impl<T: TreeAccess> Iterator for Ancestors<'_, T> {
    type Item = T::Node;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

impl TreeAccess for DomTree {
    type Node = NodeId;

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.get_attr(name)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.parent.to_option()
    }

    fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        DomTree::children(self, node).map(|(id, _)| id)
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|e| e.name.as_str())
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        self.get(node)?.as_text()
    }

    fn has_direct_handler(&self, node: NodeId, event: &str) -> bool {
        self.element(node).is_some_and(|e| e.has_handler(event))
    }

    fn query_id(&self, escaped_id: &str) -> Option<NodeId> {
        if !query::is_valid_ident(escaped_id) {
            tracing::trace!("Rejected invalid id selector: #{}", escaped_id);
            return None;
        }
        self.element_by_id(&query::unescape_ident(escaped_id))
    }

    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        DomTree::descendants(self, node)
    }
}

impl TreeAccessMut for DomTree {
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> bool {
        self.set_attr(node, name, value).is_ok()
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) -> bool {
        self.remove_attr(node, name).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (DomTree, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let form = tree.append_element(tree.root(), "form").unwrap();
        let button = tree.append_element(form, "button").unwrap();
        let text = tree.append_text(button, "Go").unwrap();
        tree.set_attr(button, "id", "3").unwrap();
        (tree, form, button, text)
    }

    #[test]
    fn test_ancestors_inclusive() {
        let (tree, form, button, text) = sample();
        let chain: Vec<NodeId> = tree.ancestors(text).collect();
        assert_eq!(chain, vec![text, button, form, NodeId::ROOT]);
        assert_eq!(tree.root_of(text), NodeId::ROOT);
    }

    #[test]
    fn test_node_classification() {
        let (tree, form, button, text) = sample();
        assert_eq!(tree.tag_name(button), Some("button"));
        assert_eq!(tree.tag_name(text), None);
        assert_eq!(TreeAccess::text(&tree, text), Some("Go"));
        assert!(tree.is_tag_in_set(form, &["input", "form"]));
        assert!(!tree.is_tag_in_set(text, &["input", "form"]));
    }

    #[test]
    fn test_query_id_requires_escaping() {
        let (tree, _, button, _) = sample();
        assert_eq!(tree.query_id("3"), None);
        assert_eq!(tree.query_id("\\33 "), Some(button));
    }

    #[test]
    fn test_direct_handler_ignores_listeners() {
        let (mut tree, form, _, _) = sample();
        tree.add_event_listener(form, "submit").unwrap();
        assert!(!tree.has_direct_handler(form, "submit"));
        tree.set_handler(form, "submit").unwrap();
        assert!(tree.has_direct_handler(form, "submit"));
    }
}
