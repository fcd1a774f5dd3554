//! Shared identifiers and the host-document capability set.
//!
//! The templating engine never touches a concrete tree. Everything it needs
//! from a live document (node creation, attributes, listeners, child
//! mutation, inspection for reverse parsing) goes through [`Document`].

mod document;
mod event;

pub use document::{Document, DocumentError};
pub use event::{Event, Handler, Phase, SelectorMatcher};

/// Opaque key for a node inside one document.
///
/// Keys are never reused within a document, so a stale key fails lookups
/// instead of aliasing a newer node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(pub u32);

impl NodeKey {
    /// Reserved sentinel for "unassigned/invalid" identity.
    pub const INVALID: NodeKey = NodeKey(0);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeType {
    Document,
    Fragment,
    Element,
    Text,
    CData,
    Comment,
}

impl NodeType {
    pub fn allows_children(self) -> bool {
        matches!(
            self,
            NodeType::Document | NodeType::Fragment | NodeType::Element
        )
    }
}
