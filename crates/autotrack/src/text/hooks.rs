//! Extension points for text resolution

use std::fmt;

use super::record::{ElementText, merge_texts};

/// Customizes per-leaf text extraction and cross-leaf merging.
///
/// Both methods default to identity behavior.
pub trait TextExtension<N: PartialEq> {
    /// Adjust one leaf record before aggregation. `dom_source` is the
    /// caller-supplied context of the resolution call, passed through as is.
    fn update_text(&self, record: &mut ElementText<N>, dom_source: &str) {
        let _ = (record, dom_source);
    }

    /// Merge two or more leaf records into one
    fn get_text(&self, records: Vec<ElementText<N>>) -> ElementText<N> {
        merge_texts(records)
    }
}

pub type UpdateTextFn<N> = Box<dyn Fn(&mut ElementText<N>, &str)>;
pub type GetTextFn<N> = Box<dyn Fn(Vec<ElementText<N>>) -> ElementText<N>>;

/// Closure-backed hook table. `Hooks::default()` has no hooks set.
pub struct Hooks<N> {
    pub update_text: Option<UpdateTextFn<N>>,
    pub get_text: Option<GetTextFn<N>>,
}

impl<N> Hooks<N> {
    pub fn new() -> Self {
        Self {
            update_text: None,
            get_text: None,
        }
    }

    pub fn with_update_text(mut self, hook: impl Fn(&mut ElementText<N>, &str) + 'static) -> Self {
        self.update_text = Some(Box::new(hook));
        self
    }

    pub fn with_get_text(mut self, hook: impl Fn(Vec<ElementText<N>>) -> ElementText<N> + 'static) -> Self {
        self.get_text = Some(Box::new(hook));
        self
    }
}

impl<N> Default for Hooks<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> fmt::Debug for Hooks<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("update_text", &self.update_text.is_some())
            .field("get_text", &self.get_text.is_some())
            .finish()
    }
}

impl<N: PartialEq> TextExtension<N> for Hooks<N> {
    fn update_text(&self, record: &mut ElementText<N>, dom_source: &str) {
        if let Some(hook) = &self.update_text {
            hook(record, dom_source);
        }
    }

    fn get_text(&self, records: Vec<ElementText<N>>) -> ElementText<N> {
        match &self.get_text {
            Some(hook) => hook(records),
            None => merge_texts(records),
        }
    }
}
