//! Marker protocol
//!
//! Records on a node which event names it is known to respond to. The set
//! lives in a single attribute as delimiter-wrapped tokens, `|click||keydown|`,
//! so a whole-token search is a plain substring search for `|name|`.

use std::fmt;

use autotrack_dom::{TreeAccess, TreeAccessMut};

use crate::TrackError;

/// Attribute holding the marker tokens
pub const MARKER_ATTRIBUTE: &str = "data-autotrack-events";

/// Wraps each token on both sides
pub const TOKEN_DELIMITER: char = '|';

/// Reject names that cannot be stored as a single token
pub fn validate_event_name(event: &str) -> Result<(), TrackError> {
    if event.is_empty() {
        return Err(TrackError::EmptyEventName);
    }
    if event.contains(TOKEN_DELIMITER) || event.chars().any(char::is_whitespace) {
        return Err(TrackError::InvalidEventName(event.to_string()));
    }
    Ok(())
}

fn wrapped(event: &str) -> String {
    format!("{TOKEN_DELIMITER}{event}{TOKEN_DELIMITER}")
}

/// Whole-token membership test on a raw attribute value. Malformed values
/// simply don't contain the token.
pub fn value_has_token(value: &str, event: &str) -> bool {
    !event.is_empty() && value.contains(&wrapped(event))
}

/// Ordered, duplicate-free set of event-name tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerTokens {
    tokens: Vec<String>,
}

impl MarkerTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read tokens from an attribute value. Only text wrapped by a delimiter
    /// on both sides is a token, matching `value_has_token`; leading and
    /// trailing fragments are ignored. Duplicates keep their first position.
    pub fn parse(value: &str) -> Self {
        let mut set = Self::new();
        let pieces: Vec<&str> = value.split(TOKEN_DELIMITER).collect();
        if pieces.len() > 2 {
            for token in pieces[1..pieces.len() - 1].iter().filter(|t| !t.is_empty()) {
                set.insert(token);
            }
        }
        set
    }

    pub fn contains(&self, event: &str) -> bool {
        self.tokens.iter().any(|t| t == event)
    }

    /// Add a token. Returns false if it was already present.
    pub fn insert(&mut self, event: &str) -> bool {
        if self.contains(event) {
            return false;
        }
        self.tokens.push(event.to_string());
        true
    }

    /// Remove a token. Returns false if it was absent.
    pub fn remove(&mut self, event: &str) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|t| t != event);
        self.tokens.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for MarkerTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "{TOKEN_DELIMITER}{token}{TOKEN_DELIMITER}")?;
        }
        Ok(())
    }
}

/// Does `node` carry `event` in its marker attribute?
pub fn is_marked<T: TreeAccess>(tree: &T, node: T::Node, event: &str) -> bool {
    tree.attribute(node, MARKER_ATTRIBUTE)
        .is_some_and(|value| value_has_token(value, event))
}

/// Tokens currently on `node`
pub fn marker_tokens<T: TreeAccess>(tree: &T, node: T::Node) -> MarkerTokens {
    tree.attribute(node, MARKER_ATTRIBUTE)
        .map(MarkerTokens::parse)
        .unwrap_or_default()
}

/// Add `event` to `node`'s marker attribute (set union).
///
/// Creates the attribute when missing. An existing value is appended to, never
/// rewritten. Returns whether the token was newly added.
pub fn mark_interactable<T: TreeAccessMut>(
    tree: &mut T,
    node: T::Node,
    event: &str,
) -> Result<bool, TrackError> {
    validate_event_name(event)?;
    if !tree.is_element(node) {
        return Err(TrackError::NotAnElement(format!("{node:?}")));
    }

    let value = match tree.attribute(node, MARKER_ATTRIBUTE) {
        Some(existing) if value_has_token(existing, event) => return Ok(false),
        Some(existing) => format!("{existing}{}", wrapped(event)),
        None => wrapped(event),
    };

    tracing::debug!("Marking {:?} as interactable for {}", node, event);
    tree.set_attribute(node, MARKER_ATTRIBUTE, &value);
    Ok(true)
}

/// Remove `event` from `node`'s marker attribute, dropping the attribute
/// once its value is empty. Only the wrapped `|event|` text is cut; the rest
/// of the value is kept as written. Returns whether a token was removed.
pub fn unmark_interactable<T: TreeAccessMut>(
    tree: &mut T,
    node: T::Node,
    event: &str,
) -> Result<bool, TrackError> {
    validate_event_name(event)?;
    let value = match tree.attribute(node, MARKER_ATTRIBUTE) {
        Some(existing) if value_has_token(existing, event) => existing.replace(&wrapped(event), ""),
        _ => return Ok(false),
    };

    tracing::debug!("Unmarking {:?} for {}", node, event);
    if value.is_empty() {
        tree.remove_attribute(node, MARKER_ATTRIBUTE);
    } else {
        tree.set_attribute(node, MARKER_ATTRIBUTE, &value);
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autotrack_dom::DomTree;

    #[test]
    fn test_token_set() {
        let mut tokens = MarkerTokens::parse("|click||keydown||click|");
        assert_eq!(tokens.iter().collect::<Vec<_>>(), vec!["click", "keydown"]);
        assert!(!tokens.insert("keydown"));
        assert!(tokens.insert("Click"));
        assert_eq!(tokens.to_string(), "|click||keydown||Click|");
        assert!(tokens.remove("click"));
        assert!(!tokens.remove("click"));
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_parse_ignores_unwrapped_fragments() {
        let tokens = MarkerTokens::parse("foo|click||keydown|bar");
        assert_eq!(tokens.iter().collect::<Vec<_>>(), vec!["click", "keydown"]);
        assert!(MarkerTokens::parse("click").is_empty());
        assert!(MarkerTokens::parse("click|").is_empty());
    }

    #[test]
    fn test_whole_token_match() {
        assert!(value_has_token("|mousedown|", "mousedown"));
        assert!(!value_has_token("|mousedown|", "down"));
        assert!(!value_has_token("|dblclick|", "click"));
        assert!(!value_has_token("click", "click"));
        assert!(!value_has_token("||", ""));
    }

    #[test]
    fn test_mark_creates_and_appends() {
        let mut tree = DomTree::new();
        let div = tree.append_element(tree.root(), "div").unwrap();

        assert_eq!(mark_interactable(&mut tree, div, "click"), Ok(true));
        assert_eq!(tree.attribute(div, MARKER_ATTRIBUTE), Some("|click|"));

        assert_eq!(mark_interactable(&mut tree, div, "click"), Ok(false));
        assert_eq!(mark_interactable(&mut tree, div, "change"), Ok(true));
        assert_eq!(tree.attribute(div, MARKER_ATTRIBUTE), Some("|click||change|"));
        assert!(is_marked(&tree, div, "change"));
        assert!(!is_marked(&tree, div, "input"));
    }

    #[test]
    fn test_mark_preserves_malformed_value() {
        let mut tree = DomTree::new();
        let div = tree.append_element(tree.root(), "div").unwrap();
        tree.set_attr(div, MARKER_ATTRIBUTE, "click").unwrap();

        assert!(!is_marked(&tree, div, "click"));
        mark_interactable(&mut tree, div, "click").unwrap();
        assert_eq!(tree.attribute(div, MARKER_ATTRIBUTE), Some("click|click|"));
        assert!(is_marked(&tree, div, "click"));
    }

    #[test]
    fn test_mark_rejects_bad_input() {
        let mut tree = DomTree::new();
        let div = tree.append_element(tree.root(), "div").unwrap();
        let text = tree.append_text(div, "x").unwrap();

        assert_eq!(mark_interactable(&mut tree, div, ""), Err(TrackError::EmptyEventName));
        assert!(matches!(
            mark_interactable(&mut tree, div, "a|b"),
            Err(TrackError::InvalidEventName(_))
        ));
        assert!(matches!(
            mark_interactable(&mut tree, text, "click"),
            Err(TrackError::NotAnElement(_))
        ));
    }

    #[test]
    fn test_unmark() {
        let mut tree = DomTree::new();
        let div = tree.append_element(tree.root(), "div").unwrap();
        mark_interactable(&mut tree, div, "click").unwrap();
        mark_interactable(&mut tree, div, "input").unwrap();

        assert_eq!(unmark_interactable(&mut tree, div, "click"), Ok(true));
        assert_eq!(tree.attribute(div, MARKER_ATTRIBUTE), Some("|input|"));
        assert_eq!(unmark_interactable(&mut tree, div, "click"), Ok(false));
        assert_eq!(unmark_interactable(&mut tree, div, "input"), Ok(true));
        assert_eq!(tree.attribute(div, MARKER_ATTRIBUTE), None);
    }

    #[test]
    fn test_unmark_leaves_malformed_text_alone() {
        let mut tree = DomTree::new();
        let div = tree.append_element(tree.root(), "div").unwrap();
        tree.set_attr(div, MARKER_ATTRIBUTE, "foo|click|").unwrap();

        assert_eq!(unmark_interactable(&mut tree, div, "click"), Ok(true));
        assert_eq!(tree.attribute(div, MARKER_ATTRIBUTE), Some("foo"));
        assert!(!is_marked(&tree, div, "foo"));
        assert!(marker_tokens(&tree, div).is_empty());

        tree.set_attr(div, MARKER_ATTRIBUTE, "click").unwrap();
        assert_eq!(unmark_interactable(&mut tree, div, "click"), Ok(false));
        assert_eq!(tree.attribute(div, MARKER_ATTRIBUTE), Some("click"));
    }
}
