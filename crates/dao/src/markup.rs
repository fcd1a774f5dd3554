//! The markup node: tag, attributes and children, plus the mutators that
//! edit them.

use crate::attributes::{AttrArgs, AttrValue, Attributes};
use crate::func::{Accessor, Foreign, ForeignRef, Func};
use crate::normalize::{Slot, normalize};
use crate::value::{Literal, literal_from_data};
use core_types::{Handler, NodeKey};
use serde_json::Value;
use std::mem;

/// One child slot of a markup node.
#[derive(Clone, Debug, PartialEq)]
pub enum Child {
    Node(Markup),
    /// Positional slots not yet promoted to a [`Markup`]; promoted on the
    /// next normalization.
    Raw(Vec<Slot>),
    Func(Func),
    Accessor(Accessor),
    Literal(Literal),
    /// `null`/undefined content. Skipped at build time.
    Empty,
    Foreign(ForeignRef),
    /// Nodes that already exist in the target document.
    Built(Vec<NodeKey>),
}

impl Child {
    /// Data in child position: scalars become text, arrays become nested
    /// markup, objects render as their JSON text.
    pub fn from_data(value: Value) -> Self {
        match value {
            Value::Null => Child::Empty,
            Value::Array(items) => Child::Raw(items.iter().map(Slot::from_json).collect()),
            Value::Object(_) => Child::Literal(Literal::String(value.to_string())),
            scalar => literal_from_data(&scalar).map_or(Child::Empty, Child::Literal),
        }
    }

    pub fn foreign(foreign: impl Foreign + 'static) -> Self {
        Child::Foreign(ForeignRef::new(foreign))
    }

    pub fn as_node(&self) -> Option<&Markup> {
        match self {
            Child::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Child::Literal(Literal::String(s)) => Some(s),
            _ => None,
        }
    }
}

macro_rules! literal_child {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Child {
                fn from(value: $ty) -> Self {
                    Child::Literal(value.into())
                }
            }
        )*
    };
}

literal_child!(&str, String, f64, i32, i64, bool);

impl From<Literal> for Child {
    fn from(value: Literal) -> Self {
        Child::Literal(value)
    }
}

impl From<Markup> for Child {
    fn from(value: Markup) -> Self {
        Child::Node(value)
    }
}

impl From<Func> for Child {
    fn from(value: Func) -> Self {
        Child::Func(value)
    }
}

impl From<Accessor> for Child {
    fn from(value: Accessor) -> Self {
        Child::Accessor(value)
    }
}

/// A declarative description of an element (or, without a tag, a fragment)
/// and its subtree.
///
/// `attached` remembers the document node produced by the last successful
/// [`render`](Markup::render), or the node this markup was parsed from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Markup {
    pub(crate) tag: Option<String>,
    pub(crate) attributes: Attributes,
    pub(crate) children: Vec<Child>,
    pub(crate) attached: Option<NodeKey>,
}

impl Markup {
    pub fn element(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            tag: (!tag.is_empty()).then_some(tag),
            ..Self::default()
        }
    }

    pub fn fragment() -> Self {
        Self::default()
    }

    /// Construct from the positional form, normalizing it first.
    pub fn from_slots(mut slots: Vec<Slot>) -> Self {
        normalize(&mut slots);
        let mut slots = slots.into_iter();
        let tag = match slots.next() {
            Some(Slot::Child(Child::Literal(Literal::String(tag)))) => Some(tag),
            _ => None,
        };
        let attributes = match slots.next() {
            Some(Slot::Attrs(attributes)) => attributes,
            _ => Attributes::new(),
        };
        let children = slots
            .filter_map(|slot| match slot {
                Slot::Child(child) => Some(child),
                // An object past the attribute slot is content, rendered as
                // its JSON text like an object produced from data.
                Slot::Attrs(attributes) => Some(Child::Literal(Literal::String(
                    attributes.to_json().to_string(),
                ))),
            })
            .collect();
        Self {
            tag,
            attributes,
            children,
            attached: None,
        }
    }

    /// Positional form: `[tag-or-false, attributes, children...]`.
    pub fn to_slots(&self) -> Vec<Slot> {
        let tag = match &self.tag {
            Some(tag) => Literal::String(tag.clone()),
            None => Literal::Bool(false),
        };
        let mut slots = Vec::with_capacity(self.children.len() + 2);
        slots.push(Slot::Child(Child::Literal(tag)));
        slots.push(Slot::Attrs(self.attributes.clone()));
        slots.extend(self.children.iter().cloned().map(Slot::Child));
        slots
    }

    /// Promote raw positional children to nodes. Idempotent.
    pub fn normalize(&mut self) {
        for child in &mut self.children {
            if let Child::Raw(slots) = child {
                *child = Child::Node(Markup::from_slots(mem::take(slots)));
            }
        }
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Read the tag, replacing it first when `tag` is a non-empty name.
    pub fn tagname(&mut self, tag: Option<&str>) -> Option<&str> {
        self.normalize();
        if let Some(tag) = tag.filter(|t| !t.is_empty()) {
            self.tag = Some(tag.to_string());
        }
        self.tag.as_deref()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Merge attributes into this node and return the resulting mapping.
    ///
    /// Per key: an absent key is set; an existing list gets the value
    /// appended; an existing single value becomes a two-entry list when the
    /// new value is callable and is overwritten otherwise.
    pub fn attr(&mut self, args: impl Into<AttrArgs>) -> &Attributes {
        self.normalize();
        let Some(incoming) = args.into().into_attributes() else {
            return &self.attributes;
        };
        for (key, value) in incoming {
            match self.attributes.get_mut(&key) {
                None => self.attributes.insert(key, value),
                Some(AttrValue::List(list)) => list.push(value),
                Some(existing) if value.is_callable() => {
                    let previous = mem::replace(existing, AttrValue::List(Vec::new()));
                    *existing = AttrValue::List(vec![previous, value]);
                }
                Some(existing) => *existing = value,
            }
        }
        &self.attributes
    }

    /// Register `handler` for `event` on the built element.
    pub fn on(&mut self, event: &str, handler: Handler) -> &Attributes {
        self.attr((event, handler))
    }

    /// Register a delegated listener: `handler` runs only when the event's
    /// originating node matches `selector`. Delivered during capture so that
    /// events which do not bubble still reach it.
    pub fn on_delegated(&mut self, event: &str, selector: &str, handler: Handler) -> &Attributes {
        let selector = selector.to_string();
        let delegate = Handler::new(move |ev| {
            if ev.target_matches(&selector) {
                handler.call(ev);
            }
        })
        .capturing();
        self.attr((event, delegate))
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    pub fn push(&mut self, child: impl Into<Child>) {
        self.children.push(child.into());
    }

    pub fn with_child(mut self, child: impl Into<Child>) -> Self {
        self.push(child);
        self
    }

    pub fn with_attr(mut self, key: &str, value: impl Into<AttrValue>) -> Self {
        self.attr((key, value.into()));
        self
    }

    pub fn attached(&self) -> Option<NodeKey> {
        self.attached
    }

    pub fn attach(&mut self, node: NodeKey) {
        self.attached = Some(node);
    }

    pub fn detach(&mut self) -> Option<NodeKey> {
        self.attached.take()
    }
}

impl From<&str> for Markup {
    fn from(tag: &str) -> Self {
        Markup::element(tag)
    }
}
