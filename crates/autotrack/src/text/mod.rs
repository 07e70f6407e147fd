//! Accessible text resolution
//!
//! Computes the human-readable name logged for a node. Sources, first match
//! wins:
//! 1. `aria-label`
//! 2. `aria-labelledby` ids (deduplicated, joined with a space)
//! 3. `aria-describedby` ids
//! 4. The node's own text (text-only content, `img[alt]`, button-like `input[value]`)
//! 5. The `<label>` of a labelable form control
//! 6. Composite walk over descendant text leaves, merged
//! 7. With a parent event, the text of the enclosing interactable

mod hooks;
mod record;

pub use hooks::{GetTextFn, Hooks, TextExtension, UpdateTextFn};
pub use record::{ElementText, MERGE_PADDING, TextSource, extract_clean_text, merge_texts};

use std::fmt::Debug;

use autotrack_dom::TreeAccess;

use crate::config::TextConfig;
use crate::escape::css_escape;
use crate::interactable::get_interactable;

pub const LABEL_ATTRIBUTE: &str = "aria-label";
pub const LABELLEDBY_ATTRIBUTE: &str = "aria-labelledby";
pub const DESCRIBEDBY_ATTRIBUTE: &str = "aria-describedby";

/// Elements that can be named by a `<label>`
const LABELABLE_TAGS: &[&str] = &[
    "input", "select", "textarea", "button", "meter", "output", "progress",
];

/// Never rendered, so never part of a name
const NON_RENDERED_TAGS: &[&str] = &["script", "style", "template", "noscript"];

/// `input` types whose `value` is their visible caption
const BUTTON_INPUT_TYPES: &[&str] = &["button", "submit", "reset"];

/// Result of a text resolution call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementTextEvent<N> {
    /// Trimmed name; `None` only when no node was given
    pub element_name: Option<String>,
    pub element_text: Option<ElementText<N>>,
}

impl<N> ElementTextEvent<N> {
    /// Contributing nodes, empty when nothing contributed
    pub fn elements(&self) -> &[N] {
        self.element_text.as_ref().map(|t| t.elements.as_slice()).unwrap_or(&[])
    }
}

/// Accessible text resolver
///
/// Owns the hook table and configuration. `init` swaps the hook table
/// wholesale; nothing from a previous table survives.
pub struct ElementTextResolver<N: PartialEq> {
    config: TextConfig,
    extension: Box<dyn TextExtension<N>>,
}

impl<N: Copy + PartialEq + Debug + 'static> ElementTextResolver<N> {
    pub fn new() -> Self {
        Self::with_config(TextConfig::default())
    }

    pub fn with_config(config: TextConfig) -> Self {
        Self {
            config,
            extension: Box::new(Hooks::new()),
        }
    }

    /// Replace the hook table. `init(Hooks::default())` restores defaults.
    pub fn init(&mut self, extension: impl TextExtension<N> + 'static) {
        tracing::debug!("Text extension hooks replaced");
        self.extension = Box::new(extension);
    }

    pub fn config(&self) -> &TextConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TextConfig) {
        self.config = config;
    }

    /// Resolve the name for `node`.
    ///
    /// `dom_source` is handed to `update_text` untouched. When the node
    /// yields no text and `parent_event` is given, the enclosing interactable
    /// for that event is resolved instead.
    pub fn get_element_text_event<T: TreeAccess<Node = N>>(
        &self,
        tree: &T,
        node: Option<N>,
        dom_source: &str,
        parent_event: Option<&str>,
    ) -> ElementTextEvent<N> {
        let Some(node) = node else {
            return ElementTextEvent {
                element_name: None,
                element_text: None,
            };
        };

        let record = self.resolve(tree, node, dom_source, parent_event);
        let name = self.config.truncate(extract_clean_text(&record.text).to_string());
        tracing::debug!("Resolved name {:?} for {:?} ({:?})", name, node, record.source);

        ElementTextEvent {
            element_name: Some(name),
            element_text: Some(record),
        }
    }

    fn resolve<T: TreeAccess<Node = N>>(
        &self,
        tree: &T,
        node: N,
        dom_source: &str,
        parent_event: Option<&str>,
    ) -> ElementText<N> {
        let mut records = self.collect(tree, node);
        for record in &mut records {
            self.extension.update_text(record, dom_source);
        }

        let resolved = if records.len() > 1 {
            Some(self.extension.get_text(records))
        } else {
            records.pop()
        };

        match resolved {
            Some(record) if !extract_clean_text(&record.text).is_empty() => record,
            resolved => {
                // The boundary is a strict ancestor, so this recursion climbs
                if let Some(event) = parent_event {
                    if let Some(boundary) = get_interactable(tree, node, event, false) {
                        tracing::debug!("No text on {:?}, using {} target {:?}", node, event, boundary);
                        return self.resolve(tree, boundary, dom_source, parent_event);
                    }
                }
                resolved.unwrap_or_else(ElementText::empty)
            }
        }
    }

    /// Leaf records for `node`, before hooks
    fn collect<T: TreeAccess<Node = N>>(&self, tree: &T, node: N) -> Vec<ElementText<N>> {
        let single = self
            .label_attribute(tree, node)
            .or_else(|| self.referenced_text(tree, node, LABELLEDBY_ATTRIBUTE, TextSource::ReferencedIds))
            .or_else(|| self.referenced_text(tree, node, DESCRIBEDBY_ATTRIBUTE, TextSource::AttributeDescription))
            .or_else(|| self.self_text(tree, node))
            .or_else(|| self.intrinsic_text(tree, node))
            .or_else(|| self.form_control_label(tree, node));
        if let Some(record) = single {
            tracing::trace!("Text for {:?} from {:?}", node, record.source);
            return vec![record];
        }

        let mut records = Vec::new();
        self.collect_subtree(tree, node, None, &mut records);
        tracing::trace!("Composite text for {:?}: {} leaves", node, records.len());
        records
    }

    fn label_attribute<T: TreeAccess<Node = N>>(&self, tree: &T, node: N) -> Option<ElementText<N>> {
        let label = tree.attribute(node, LABEL_ATTRIBUTE)?;
        if extract_clean_text(label).is_empty() {
            return None;
        }
        Some(ElementText::new(label, TextSource::AttributeLabel, node))
    }

    /// Text of the elements named by an id-list attribute. Each distinct id
    /// counts once, in order of first occurrence; unknown ids are skipped.
    fn referenced_text<T: TreeAccess<Node = N>>(
        &self,
        tree: &T,
        node: N,
        attribute: &str,
        source: TextSource,
    ) -> Option<ElementText<N>> {
        let ids = tree.attribute(node, attribute)?;

        let mut seen: Vec<&str> = Vec::new();
        let mut texts: Vec<String> = Vec::new();
        let mut elements: Vec<N> = Vec::new();
        for id in ids.split_ascii_whitespace() {
            if seen.contains(&id) {
                continue;
            }
            seen.push(id);

            let Some(target) = tree.query_id(&css_escape(id)) else {
                tracing::debug!("Skipping unresolvable {} reference {:?}", attribute, id);
                continue;
            };
            let text = self.rendered_text(tree, target);
            let clean = extract_clean_text(&text);
            if !clean.is_empty() {
                texts.push(clean.to_string());
            }
            if !elements.contains(&target) {
                elements.push(target);
            }
        }

        if texts.is_empty() {
            return None;
        }
        Some(ElementText {
            text: texts.join(" "),
            source,
            elements,
        })
    }

    /// A text node, or an element whose children are all text
    fn self_text<T: TreeAccess<Node = N>>(&self, tree: &T, node: N) -> Option<ElementText<N>> {
        if let Some(text) = tree.text(node) {
            if extract_clean_text(text).is_empty() {
                return None;
            }
            let owner = tree.parent(node).unwrap_or(node);
            return Some(ElementText::new(text, TextSource::RenderedText, owner));
        }
        if !tree.is_element(node) {
            return None;
        }

        let mut text = String::new();
        for child in tree.children(node) {
            match tree.text(child) {
                Some(t) => text.push_str(t),
                None if tree.is_element(child) => return None,
                None => {}
            }
        }
        if extract_clean_text(&text).is_empty() {
            return None;
        }
        Some(ElementText::new(text, TextSource::RenderedText, node))
    }

    /// Text carried by attributes on replaced or value-captioned elements
    fn intrinsic_text<T: TreeAccess<Node = N>>(&self, tree: &T, node: N) -> Option<ElementText<N>> {
        let (value, source) = match tree.tag_name(node)? {
            "img" => (tree.attribute(node, "alt")?, TextSource::AttributeLabel),
            "input" if is_button_input(tree, node) => (tree.attribute(node, "value")?, TextSource::RenderedText),
            _ => return None,
        };
        if extract_clean_text(value).is_empty() {
            return None;
        }
        Some(ElementText::new(value, source, node))
    }

    /// Label of a labelable control: `label[for=id]` first, then a wrapping
    /// `<label>`. The control's own subtree never contributes.
    fn form_control_label<T: TreeAccess<Node = N>>(&self, tree: &T, node: N) -> Option<ElementText<N>> {
        if !is_labelable(tree, node) {
            return None;
        }

        let label = self
            .explicit_label(tree, node)
            .or_else(|| tree.ancestors(node).skip(1).find(|&a| tree.tag_name(a) == Some("label")))?;

        let mut records = Vec::new();
        self.collect_subtree(tree, label, Some(node), &mut records);
        let texts: Vec<&str> = records
            .iter()
            .map(|r| extract_clean_text(&r.text))
            .filter(|t| !t.is_empty())
            .collect();
        if texts.is_empty() {
            return None;
        }

        Some(ElementText::new(texts.join(" "), TextSource::LabelledFormControl, label))
    }

    fn explicit_label<T: TreeAccess<Node = N>>(&self, tree: &T, node: N) -> Option<N> {
        let id = tree.attribute(node, "id").filter(|id| !id.is_empty())?;
        tree.descendants(tree.root_of(node))
            .into_iter()
            .find(|&n| tree.tag_name(n) == Some("label") && tree.attribute(n, "for") == Some(id))
    }

    /// Depth-first, left-to-right walk collecting one record per text leaf.
    /// Loose text is credited to the element holding it; an element with its
    /// own label, description or intrinsic text is a single leaf and is not descended into.
    fn collect_subtree<T: TreeAccess<Node = N>>(
        &self,
        tree: &T,
        container: N,
        exclude: Option<N>,
        out: &mut Vec<ElementText<N>>,
    ) {
        for child in tree.children(container) {
            if Some(child) == exclude {
                continue;
            }
            if let Some(text) = tree.text(child) {
                if !extract_clean_text(text).is_empty() {
                    out.push(ElementText::new(text, TextSource::RenderedText, container));
                }
                continue;
            }
            if !tree.is_element(child) || self.is_hidden(tree, child) {
                continue;
            }

            let leaf = self
                .label_attribute(tree, child)
                .or_else(|| self.referenced_text(tree, child, LABELLEDBY_ATTRIBUTE, TextSource::ReferencedIds))
                .or_else(|| self.referenced_text(tree, child, DESCRIBEDBY_ATTRIBUTE, TextSource::AttributeDescription))
                .or_else(|| self.intrinsic_text(tree, child));
            match leaf {
                Some(record) => out.push(record),
                None => self.collect_subtree(tree, child, exclude, out),
            }
        }
    }

    /// Concatenated text content, skipping hidden subtrees
    fn rendered_text<T: TreeAccess<Node = N>>(&self, tree: &T, node: N) -> String {
        let mut out = String::new();
        match tree.text(node) {
            Some(text) => out.push_str(text),
            None => self.push_rendered_text(tree, node, &mut out),
        }
        out
    }

    fn push_rendered_text<T: TreeAccess<Node = N>>(&self, tree: &T, node: N, out: &mut String) {
        for child in tree.children(node) {
            if let Some(text) = tree.text(child) {
                out.push_str(text);
            } else if tree.is_element(child) && !self.is_hidden(tree, child) {
                self.push_rendered_text(tree, child, out);
            }
        }
    }

    fn is_hidden<T: TreeAccess<Node = N>>(&self, tree: &T, node: N) -> bool {
        self.config.skip_hidden
            && (tree.attribute(node, "aria-hidden") == Some("true")
                || tree.is_tag_in_set(node, NON_RENDERED_TAGS))
    }
}

impl<N: Copy + PartialEq + Debug + 'static> Default for ElementTextResolver<N> {
    fn default() -> Self {
        Self::new()
    }
}

fn is_button_input<T: TreeAccess>(tree: &T, node: T::Node) -> bool {
    tree.attribute(node, "type")
        .is_some_and(|ty| BUTTON_INPUT_TYPES.iter().any(|b| ty.eq_ignore_ascii_case(b)))
}

fn is_labelable<T: TreeAccess>(tree: &T, node: T::Node) -> bool {
    match tree.tag_name(node) {
        Some("input") => !tree
            .attribute(node, "type")
            .is_some_and(|ty| ty.eq_ignore_ascii_case("hidden")),
        Some(tag) => LABELABLE_TAGS.contains(&tag),
        None => false,
    }
}
