//! DOM Events
//!
//! User-input and lifecycle events the page host dispatches.

use crate::NodeId;

/// Event type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    KeyDown,
    MouseEnter,
    MouseLeave,
    FocusIn,
    FocusOut,
    Submit,
    DomContentLoaded,
}

impl EventType {
    /// Check if this event type can bubble
    pub fn bubbles(self) -> bool {
        !matches!(self, EventType::MouseEnter | EventType::MouseLeave)
    }

    /// Check if `prevent_default` has any effect for this type
    pub fn cancelable(self) -> bool {
        matches!(self, EventType::Click | EventType::KeyDown | EventType::Submit)
    }

    /// DOM event name
    pub fn name(self) -> &'static str {
        match self {
            EventType::Click => "click",
            EventType::KeyDown => "keydown",
            EventType::MouseEnter => "mouseenter",
            EventType::MouseLeave => "mouseleave",
            EventType::FocusIn => "focusin",
            EventType::FocusOut => "focusout",
            EventType::Submit => "submit",
            EventType::DomContentLoaded => "DOMContentLoaded",
        }
    }
}

/// DOM event
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: EventType,
    pub target: NodeId,
    pub current_target: Option<NodeId>,
    /// `KeyboardEvent.key` for key events
    pub key: Option<String>,
    default_prevented: bool,
}

impl Event {
    /// Create an event aimed at `target`
    pub fn new(event_type: EventType, target: NodeId) -> Self {
        Self {
            event_type,
            target,
            current_target: None,
            key: None,
            default_prevented: false,
        }
    }

    /// Create a keydown event
    pub fn key_down(target: NodeId, key: &str) -> Self {
        Self {
            key: Some(key.to_string()),
            ..Self::new(EventType::KeyDown, target)
        }
    }

    /// Whether the event travels up the ancestor chain
    pub fn bubbles(&self) -> bool {
        self.event_type.bubbles()
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.event_type.cancelable() {
            self.default_prevented = true;
        }
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bubbling_types() {
        assert!(EventType::FocusIn.bubbles());
        assert!(EventType::Submit.bubbles());
        assert!(!EventType::MouseEnter.bubbles());
        assert!(!EventType::MouseLeave.bubbles());
    }

    #[test]
    fn test_prevent_default_only_when_cancelable() {
        let mut submit = Event::new(EventType::Submit, NodeId(3));
        submit.prevent_default();
        assert!(submit.is_default_prevented());

        let mut focus = Event::new(EventType::FocusIn, NodeId(3));
        focus.prevent_default();
        assert!(!focus.is_default_prevented());
    }

    #[test]
    fn test_key_down() {
        let event = Event::key_down(NodeId::ROOT, "ArrowLeft");
        assert_eq!(event.event_type, EventType::KeyDown);
        assert_eq!(event.key.as_deref(), Some("ArrowLeft"));
    }
}
