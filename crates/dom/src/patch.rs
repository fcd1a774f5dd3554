//! Mutation protocol of the in-memory document.
//!
//! Every change [`Dom`](crate::Dom) makes to its arena is one of these
//! operations. A journaled document records every applied operation, and
//! replaying that journal into a fresh document reproduces the same tree and
//! keys.
//!
//! Invariants:
//! - Patches are applied in order.
//! - References must point to live keys at the time they are used (except
//!   the `key` in create operations, which must be fresh).
//! - `NodeKey::INVALID` is never valid in a patch stream.
//! - A node has at most one parent; `AppendChild`/`InsertBefore` require a
//!   detached child, moves are expressed as `Detach` followed by an insert.
//! - Operations must not create cycles.
//! - Attribute order is preserved; `SetAttribute` overwrites in place.

use core_types::NodeKey;
use std::sync::Arc;

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomPatch {
    /// Create the document root. Must be the first patch of a stream.
    CreateDocument { key: NodeKey },
    CreateFragment { key: NodeKey },
    /// Create an element node with initial attributes.
    CreateElement {
        key: NodeKey,
        name: Arc<str>,
        attributes: Vec<(Arc<str>, Option<String>)>,
    },
    CreateText { key: NodeKey, text: String },
    CreateCData { key: NodeKey, text: String },
    CreateComment { key: NodeKey, text: String },
    /// Append a detached child to the end of a parent's children list.
    AppendChild { parent: NodeKey, child: NodeKey },
    /// Insert a detached child before an existing child of `parent`.
    InsertBefore {
        parent: NodeKey,
        child: NodeKey,
        before: NodeKey,
    },
    /// Unlink a node from its parent. The node and its subtree stay live.
    Detach { key: NodeKey },
    /// Unlink a node and drop its entire subtree.
    ///
    /// After removal, keys in the subtree are invalid for the remainder of
    /// the stream.
    RemoveNode { key: NodeKey },
    /// Set one attribute on an element, overwriting an existing value.
    SetAttribute {
        key: NodeKey,
        name: Arc<str>,
        value: Option<String>,
    },
}
