//! Capability set of a live document tree.
//!
//! Implementations own the nodes; callers only hold [`NodeKey`]s. The trait
//! is object-safe so the materializer can thread `&mut dyn Document` through
//! user callables.

use crate::{Handler, NodeKey, NodeType};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("unknown node {0:?}")]
    MissingNode(NodeKey),
    #[error("node {0:?} cannot have children")]
    InvalidParent(NodeKey),
    #[error("node {0:?} already has a parent")]
    AlreadyAttached(NodeKey),
    #[error("operation not valid for node {0:?}")]
    WrongNodeKind(NodeKey),
    #[error("{child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeKey, child: NodeKey },
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle { parent: NodeKey, child: NodeKey },
    #[error("invalid name {0:?}")]
    InvalidName(String),
}

pub trait Document {
    // =========================================================================
    // Creation
    // =========================================================================

    fn create_element(&mut self, name: &str) -> Result<NodeKey, DocumentError>;

    fn create_fragment(&mut self) -> Result<NodeKey, DocumentError>;

    fn create_text(&mut self, text: &str) -> Result<NodeKey, DocumentError>;

    fn create_comment(&mut self, text: &str) -> Result<NodeKey, DocumentError>;

    /// Copy `node` (and its descendants when `deep`) into a new detached node.
    fn clone_node(&mut self, node: NodeKey, deep: bool) -> Result<NodeKey, DocumentError>;

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Sets or overwrites one attribute on an element.
    fn set_attribute(&mut self, node: NodeKey, name: &str, value: &str)
    -> Result<(), DocumentError>;

    /// Registers a listener; listeners on the same event name accumulate.
    fn add_listener(
        &mut self,
        node: NodeKey,
        event: &str,
        handler: Handler,
    ) -> Result<(), DocumentError>;

    /// Appends `child` to `parent`. Appending a fragment moves the
    /// fragment's children instead and leaves the fragment empty.
    fn append_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<(), DocumentError>;

    /// Puts `new_child` where `old_child` was and detaches `old_child`.
    fn replace_child(
        &mut self,
        parent: NodeKey,
        new_child: NodeKey,
        old_child: NodeKey,
    ) -> Result<(), DocumentError>;

    /// Detaches `node` and discards it with its descendants; their keys
    /// stop resolving.
    fn remove_node(&mut self, node: NodeKey) -> Result<(), DocumentError>;

    // =========================================================================
    // Inspection
    // =========================================================================

    fn node_type(&self, node: NodeKey) -> Option<NodeType>;

    fn parent(&self, node: NodeKey) -> Option<NodeKey>;

    /// Element name as stored by the document, `None` for other node types.
    fn node_name(&self, node: NodeKey) -> Option<&str>;

    /// Attributes in document order; value-less attributes carry `None`.
    fn attributes(&self, node: NodeKey) -> Vec<(&str, Option<&str>)>;

    /// Character data of text, CDATA and comment nodes.
    fn character_data(&self, node: NodeKey) -> Option<&str>;

    fn child_nodes(&self, node: NodeKey) -> Vec<NodeKey>;
}
