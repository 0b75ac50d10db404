//! Event listener registry
//!
//! Listeners carry a handler *value* (usually a command enum) instead of a
//! closure. The host routes an event to the values and interprets them in
//! one place.

use crate::{DomTree, Event, EventType, NodeId};

/// Listener handle, used for removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Clone)]
struct Listener<H> {
    id: ListenerId,
    target: NodeId,
    event_type: EventType,
    handler: H,
}

/// Registered listeners in registration order
#[derive(Debug, Clone)]
pub struct ListenerRegistry<H> {
    listeners: Vec<Listener<H>>,
    next_id: u64,
}

impl<H> Default for ListenerRegistry<H> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 1,
        }
    }
}

impl<H: Clone + PartialEq> ListenerRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener. Registering an identical (target, type, handler)
    /// triple again returns the existing handle.
    pub fn add(&mut self, target: NodeId, event_type: EventType, handler: H) -> ListenerId {
        if let Some(existing) = self
            .listeners
            .iter()
            .find(|l| l.target == target && l.event_type == event_type && l.handler == handler)
        {
            return existing.id;
        }

        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener {
            id,
            target,
            event_type,
            handler,
        });
        tracing::trace!("Added {} listener on {:?}", event_type.name(), target);
        id
    }

    /// Remove a listener
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    /// Number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Handlers registered directly on `target` for `event_type`
    pub fn handlers_on(&self, target: NodeId, event_type: EventType) -> impl Iterator<Item = &H> {
        self.listeners
            .iter()
            .filter(move |l| l.target == target && l.event_type == event_type)
            .map(|l| &l.handler)
    }

    /// Nodes the event visits: the target, then its ancestors when it bubbles
    pub fn propagation_path(tree: &DomTree, event: &Event) -> Vec<NodeId> {
        let mut path = vec![event.target];
        if event.bubbles() {
            path.extend(tree.ancestors(event.target));
        }
        path
    }

    /// Snapshot of `(current_target, handler)` pairs in dispatch order
    pub fn route(&self, tree: &DomTree, event: &Event) -> Vec<(NodeId, H)> {
        Self::propagation_path(tree, event)
            .into_iter()
            .flat_map(|node| {
                self.handlers_on(node, event.event_type)
                    .cloned()
                    .map(move |h| (node, h))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Cmd {
        Outer,
        Inner,
    }

    fn nested() -> (DomTree, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let outer = tree.create_element("section");
        let inner = tree.create_element("button");
        tree.append_child(NodeId::ROOT, outer).unwrap();
        tree.append_child(outer, inner).unwrap();
        (tree, outer, inner)
    }

    #[test]
    fn test_duplicate_listener_ignored() {
        let mut reg = ListenerRegistry::new();
        let a = reg.add(NodeId(1), EventType::Click, Cmd::Inner);
        let b = reg.add(NodeId(1), EventType::Click, Cmd::Inner);
        assert_eq!(a, b);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_bubbling_route() {
        let (tree, outer, inner) = nested();
        let mut reg = ListenerRegistry::new();
        reg.add(outer, EventType::FocusIn, Cmd::Outer);
        reg.add(inner, EventType::FocusIn, Cmd::Inner);

        let route = reg.route(&tree, &Event::new(EventType::FocusIn, inner));
        assert_eq!(route, vec![(inner, Cmd::Inner), (outer, Cmd::Outer)]);
    }

    #[test]
    fn test_non_bubbling_route() {
        let (tree, outer, inner) = nested();
        let mut reg = ListenerRegistry::new();
        reg.add(outer, EventType::MouseEnter, Cmd::Outer);

        assert!(reg.route(&tree, &Event::new(EventType::MouseEnter, inner)).is_empty());
        assert_eq!(reg.route(&tree, &Event::new(EventType::MouseEnter, outer)).len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut reg = ListenerRegistry::new();
        let id = reg.add(NodeId::ROOT, EventType::KeyDown, Cmd::Outer);
        assert!(reg.remove(id));
        assert!(!reg.remove(id));
        assert!(reg.is_empty());
    }
}
