//! autotrack DOM - Document Object Model
//!
//! Memory-efficient arena DOM tree, plus the access contract the
//! interaction resolvers are written against.

mod access;
mod node;
mod query;
mod tree;

pub use access::{Ancestors, TreeAccess, TreeAccessMut};
pub use node::{Attribute, ElementData, Node, NodeData};
pub use query::{is_valid_ident, unescape_ident};
pub use tree::{Children, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this ID points at a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    /// `None` for the sentinel, `Some(self)` otherwise
    #[inline]
    pub fn to_option(self) -> Option<NodeId> {
        if self.is_valid() { Some(self) } else { None }
    }
}

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node not found: {0:?}")]
    NotFound(NodeId),

    #[error("Node is not an element: {0:?}")]
    NotAnElement(NodeId),

    #[error("Hierarchy request error: cannot append {child:?} to {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
}
