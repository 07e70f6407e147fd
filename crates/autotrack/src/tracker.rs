//! Event tracking
//!
//! The set of event names auto-instrumentation cares about, with the
//! capture/bubble handler pair registered for each. The instrumentation
//! layer reports listener registrations through `listener_added`, which
//! marks the node for tracked names only.

use std::fmt;

use autotrack_dom::{TreeAccess, TreeAccessMut};

use crate::TrackError;
use crate::interactable::get_interactable;
use crate::marker::{mark_interactable, validate_event_name};

/// Dispatch phase a handler runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPhase {
    Capture,
    Bubble,
}

/// What a tracked event handler receives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedEvent<N> {
    pub event_name: String,
    /// Node the event fired on
    pub target: N,
    /// Interactable boundary of `target` for this event
    pub interactable: Option<N>,
    pub phase: EventPhase,
}

pub type UiEventHandler<N> = Box<dyn Fn(&TrackedEvent<N>)>;

/// Capture and bubble handlers for one event name
pub struct UiEventHandlers<N> {
    pub capture: Option<UiEventHandler<N>>,
    pub bubble: Option<UiEventHandler<N>>,
}

impl<N> UiEventHandlers<N> {
    pub fn new() -> Self {
        Self { capture: None, bubble: None }
    }

    pub fn with_capture(mut self, handler: impl Fn(&TrackedEvent<N>) + 'static) -> Self {
        self.capture = Some(Box::new(handler));
        self
    }

    pub fn with_bubble(mut self, handler: impl Fn(&TrackedEvent<N>) + 'static) -> Self {
        self.bubble = Some(Box::new(handler));
        self
    }
}

impl<N> Default for UiEventHandlers<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> fmt::Debug for UiEventHandlers<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiEventHandlers")
            .field("capture", &self.capture.is_some())
            .field("bubble", &self.bubble.is_some())
            .finish()
    }
}

/// Tracked event names and their handlers, in registration order
#[derive(Debug)]
pub struct EventTracker<N> {
    events: Vec<(String, UiEventHandlers<N>)>,
}

impl<N: Copy + Eq + fmt::Debug> EventTracker<N> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Start tracking `event`. Tracking a name again only replaces its
    /// handler pair.
    pub fn track(&mut self, event: &str, handlers: UiEventHandlers<N>) -> Result<(), TrackError> {
        validate_event_name(event)?;
        match self.events.iter_mut().find(|(name, _)| name == event) {
            Some((_, existing)) => {
                tracing::debug!("Replacing handlers for tracked event {}", event);
                *existing = handlers;
            }
            None => {
                tracing::debug!("Tracking UI event {}", event);
                self.events.push((event.to_string(), handlers));
            }
        }
        Ok(())
    }

    pub fn is_tracked(&self, event: &str) -> bool {
        self.events.iter().any(|(name, _)| name == event)
    }

    /// Tracked names in registration order
    pub fn tracked_events(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(|(name, _)| name.as_str())
    }

    fn handlers(&self, event: &str) -> Option<&UiEventHandlers<N>> {
        self.events.iter().find(|(name, _)| name == event).map(|(_, h)| h)
    }

    /// Called when a listener for `event` is attached to `node`. Marks the
    /// node when `event` is tracked; returns whether a token was added.
    pub fn listener_added<T>(&self, tree: &mut T, node: N, event: &str) -> Result<bool, TrackError>
    where
        T: TreeAccessMut<Node = N>,
    {
        if !self.is_tracked(event) {
            return Ok(false);
        }
        mark_interactable(tree, node, event)
    }

    /// Run the handlers tracked for `event`, capture first. Returns the
    /// event passed to them, or `None` for untracked names.
    pub fn dispatch<T>(&self, tree: &T, target: N, event: &str) -> Option<TrackedEvent<N>>
    where
        T: TreeAccess<Node = N>,
    {
        let handlers = self.handlers(event)?;
        let mut tracked = TrackedEvent {
            event_name: event.to_string(),
            target,
            interactable: get_interactable(tree, target, event, true),
            phase: EventPhase::Capture,
        };

        if let Some(capture) = &handlers.capture {
            capture(&tracked);
        }
        tracked.phase = EventPhase::Bubble;
        if let Some(bubble) = &handlers.bubble {
            bubble(&tracked);
        }
        Some(tracked)
    }
}

impl<N: Copy + Eq + fmt::Debug> Default for EventTracker<N> {
    fn default() -> Self {
        Self::new()
    }
}
