//! Declarative markup trees.
//!
//! A [`Markup`] describes an element or fragment as a tag, an ordered
//! attribute mapping and a list of children. Children and attribute values
//! may be literals, nested markup, or callables ([`Func`], [`Accessor`],
//! [`Handler`](core_types::Handler)) that are resolved against data when the
//! markup is built into a [`Document`](core_types::Document).
//!
//! ```
//! use dao::{Markup, get, map};
//!
//! let mut list = Markup::element("ul")
//!     .with_attr("class", "names")
//!     .with_child(map("people", Markup::element("li").with_child(get("name"))));
//! assert_eq!(list.tagname(None), Some("ul"));
//! ```
//!
//! Going the other way, [`Parser::create_from_dom`] reads a live subtree
//! back into markup so it can be re-rendered with new data.

mod accessor;
mod attributes;
mod build;
mod error;
mod flags;
mod func;
mod json;
mod macros;
mod markup;
mod normalize;
mod parse;
mod registry;
mod value;

pub use accessor::{Path, get, map, map_all};
pub use attributes::{AttrArgs, AttrValue, Attributes};
pub use error::BuildError;
pub use flags::{FlagOptions, Flags};
pub use func::{Accessor, Foreign, ForeignRef, Func, Scope};
pub use markup::{Child, Markup};
pub use normalize::{Slot, normalize};
pub use parse::{ForeignAdapter, LiveSubtree, Parser, RetainLive, create_from_dom};
pub use registry::{FUNC_COMMENT_PREFIX, FuncRegistry, UntrustedTemplateError, encode_func_comment};
pub use value::{Literal, is_truthy};

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}
