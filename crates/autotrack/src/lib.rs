//! autotrack
//!
//! Resolution core for UI auto-instrumentation:
//! - Interactable resolution: which ancestor is the logical target of an event
//! - Accessible text resolution: what name to log for a node
//! - Marker protocol: declarative per-node record of handled event names
//! - Id escaping for structural id lookup
//!
//! All algorithms are generic over `autotrack_dom::TreeAccess`.

pub mod config;
pub mod escape;
pub mod interactable;
pub mod marker;
pub mod text;
pub mod tracker;

pub use autotrack_dom::{TreeAccess, TreeAccessMut};
pub use config::TextConfig;
pub use escape::css_escape;
pub use interactable::{
    INTERACTABLE_TAGS, InteractableMatch, find_interactable, get_interactable, is_interactable_tag,
};
pub use marker::{
    MARKER_ATTRIBUTE, MarkerTokens, TOKEN_DELIMITER, is_marked, mark_interactable,
    unmark_interactable,
};
pub use text::{
    ElementText, ElementTextEvent, ElementTextResolver, Hooks, TextExtension, TextSource,
    extract_clean_text, merge_texts,
};
pub use tracker::{EventPhase, EventTracker, TrackedEvent, UiEventHandler, UiEventHandlers};

/// Event tracking error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackError {
    #[error("Event name is empty")]
    EmptyEventName,

    #[error("Invalid event name: {0:?}")]
    InvalidEventName(String),

    #[error("Cannot mark non-element node {0}")]
    NotAnElement(String),
}
