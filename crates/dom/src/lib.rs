//! In-memory document tree.
//!
//! [`Dom`] implements the [`core_types::Document`] capability set over a
//! key-addressed arena. Mutations are expressed as [`DomPatch`] operations
//! that can optionally be journaled, listeners are dispatched with capture and bubble phases,
//! and documents can be loaded from and written back to markup text.

mod builder;
mod document;
mod events;
mod patch;
mod selector;
mod serialize;

pub use crate::document::{Dom, DomPatchError};
pub use crate::events::bubbles;
pub use crate::patch::DomPatch;
