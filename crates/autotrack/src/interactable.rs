//! Interactable resolution
//!
//! Finds the nearest ancestor (inclusive) that is the logical target of an
//! interaction event.

use autotrack_dom::TreeAccess;

use crate::marker;

/// Tags interactable by themselves. `a` is handled separately: it only
/// counts when it has an `href`.
pub const INTERACTABLE_TAGS: &[&str] = &[
    "input", "select", "option", "button", "details", "dialog", "summary",
];

/// Which rule made a node interactable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractableMatch {
    /// A handler is directly assigned for the event
    DirectHandler,
    /// The marker attribute carries the event token
    Marker,
    /// Built-in interactable tag
    Tag,
}

/// Built-in tag rule, including `a[href]`
pub fn is_interactable_tag<T: TreeAccess>(tree: &T, node: T::Node) -> bool {
    match tree.tag_name(node) {
        Some("a") => tree.attribute(node, "href").is_some(),
        Some(tag) => INTERACTABLE_TAGS.contains(&tag),
        None => false,
    }
}

/// Like [`get_interactable`], also reporting the rule that matched.
pub fn find_interactable<T: TreeAccess>(
    tree: &T,
    node: T::Node,
    event: &str,
    include_self: bool,
) -> Option<(T::Node, InteractableMatch)> {
    let skip = usize::from(!include_self);
    for candidate in tree.ancestors(node).skip(skip) {
        // A direct handler ends the search here, whatever lies further up
        let found = if tree.has_direct_handler(candidate, event) {
            Some(InteractableMatch::DirectHandler)
        } else if marker::is_marked(tree, candidate, event) {
            Some(InteractableMatch::Marker)
        } else if is_interactable_tag(tree, candidate) {
            Some(InteractableMatch::Tag)
        } else {
            None
        };

        if let Some(rule) = found {
            tracing::trace!("Interactable for {} on {:?}: {:?} ({:?})", event, node, candidate, rule);
            return Some((candidate, rule));
        }
    }
    None
}

/// Nearest ancestor of `node` (including `node` when `include_self`) that
/// handles `event`, or `None` up to and including the root.
pub fn get_interactable<T: TreeAccess>(
    tree: &T,
    node: T::Node,
    event: &str,
    include_self: bool,
) -> Option<T::Node> {
    find_interactable(tree, node, event, include_self).map(|(found, _)| found)
}
