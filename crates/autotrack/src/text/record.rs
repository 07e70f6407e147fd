//! Text records and default aggregation

use serde::Serialize;

/// Padding placed on both sides of each text when merging records
pub const MERGE_PADDING: char = ' ';

/// How a piece of text was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextSource {
    /// `aria-label` (or `alt` on images)
    AttributeLabel,
    /// Ids listed in `aria-describedby`
    AttributeDescription,
    /// Ids listed in `aria-labelledby`
    ReferencedIds,
    /// `<label>` associated with a form control
    LabelledFormControl,
    /// Text content
    RenderedText,
}

/// One elementary piece of text and the nodes it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementText<N> {
    pub text: String,
    pub source: TextSource,
    /// Contributing nodes, document order, no duplicates
    pub elements: Vec<N>,
}

impl<N: PartialEq> ElementText<N> {
    pub fn new(text: impl Into<String>, source: TextSource, element: N) -> Self {
        Self {
            text: text.into(),
            source,
            elements: vec![element],
        }
    }

    /// No text, no contributors
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            source: TextSource::RenderedText,
            elements: Vec::new(),
        }
    }

    /// Append a contributor unless already listed
    pub fn add_element(&mut self, element: N) {
        if !self.elements.contains(&element) {
            self.elements.push(element);
        }
    }
}

/// Trim a text fragment
pub fn extract_clean_text(text: &str) -> &str {
    text.trim()
}

/// Default aggregation: each text padded by one space on both sides and
/// concatenated (two spaces between neighbours), contributors concatenated
/// in order without duplicates. The source is taken from the first record.
pub fn merge_texts<N: PartialEq>(records: Vec<ElementText<N>>) -> ElementText<N> {
    let mut records = records.into_iter();
    let Some(first) = records.next() else {
        return ElementText::empty();
    };

    let mut merged = ElementText {
        text: String::new(),
        source: first.source,
        elements: Vec::new(),
    };
    for record in std::iter::once(first).chain(records) {
        merged.text.push(MERGE_PADDING);
        merged.text.push_str(&record.text);
        merged.text.push(MERGE_PADDING);
        for element in record.elements {
            merged.add_element(element);
        }
    }
    merged
}
