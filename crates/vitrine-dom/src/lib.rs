//! Vitrine DOM - Document Object Model
//!
//! Arena-based DOM tree used to host page scripts outside a browser.
//! Nodes are addressed by [`NodeId`]; every mutation goes through [`DomTree`]
//! so that callers can observe whether a script touched the page at all.

mod node;
mod tree;
mod document;
mod selector;
mod classlist;
mod dataset;
mod events;
mod listeners;
pub mod forms;
pub mod serialize;

pub use node::{Attribute, ElementData, Node, NodeData};
pub use tree::{Ancestors, Children, DomTree};
pub use document::Document;
pub use selector::Selector;
pub use classlist::TokenList;
pub use dataset::{attribute_name as dataset_attribute_name, key_from_attribute as dataset_key};
pub use events::{Event, EventType};
pub use listeners::{ListenerId, ListenerRegistry};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Document node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Invalid/null node
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check whether this ID points at a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// DOM operation error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node {0:?} does not exist")]
    NotFound(NodeId),

    #[error("Node {0:?} is not an element")]
    NotAnElement(NodeId),

    #[error("Cannot insert {child:?} into {parent:?}: hierarchy request error")]
    HierarchyRequest { parent: NodeId, child: NodeId },
}

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;
