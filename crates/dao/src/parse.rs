//! Reading a live document subtree back into markup.

use crate::attributes::{AttrValue, Attributes};
use crate::flags::Flags;
use crate::func::{Foreign, ForeignRef};
use crate::markup::{Child, Markup};
use crate::registry::FuncRegistry;
use core_types::{Document, DocumentError, NodeKey, NodeType};
use std::cell::Cell;
use std::rc::Rc;

/// Decides which elements are kept as foreign content when
/// [`Flags::retain_live`] is set.
pub trait ForeignAdapter {
    /// Claim `node`, or return `None` to parse it as ordinary markup.
    fn retain(&self, doc: &dyn Document, node: NodeKey) -> Option<Rc<dyn Foreign>>;
}

/// A subtree of the source document inserted by deep copy.
///
/// The first materialization snapshots `node` into a detached template, so
/// later builds still work after a render has removed the source tree.
#[derive(Debug, Clone)]
pub struct LiveSubtree {
    pub node: NodeKey,
    template: Cell<Option<NodeKey>>,
}

impl LiveSubtree {
    pub fn new(node: NodeKey) -> Self {
        Self {
            node,
            template: Cell::new(None),
        }
    }
}

impl Foreign for LiveSubtree {
    fn materialize(&self, doc: &mut dyn Document) -> Result<Vec<NodeKey>, DocumentError> {
        let template = match self.template.get() {
            Some(template) => template,
            None => {
                let template = doc.clone_node(self.node, true)?;
                self.template.set(Some(template));
                template
            }
        };
        Ok(vec![doc.clone_node(template, true)?])
    }
}

/// Retains elements by tag name, or every element.
#[derive(Debug, Clone, Default)]
pub struct RetainLive {
    tags: Option<Vec<String>>,
}

impl RetainLive {
    pub fn all() -> Self {
        Self { tags: None }
    }

    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: Some(tags.into_iter().map(|t| t.into().to_ascii_lowercase()).collect()),
        }
    }
}

impl ForeignAdapter for RetainLive {
    fn retain(&self, doc: &dyn Document, node: NodeKey) -> Option<Rc<dyn Foreign>> {
        if doc.node_type(node) != Some(NodeType::Element) {
            return None;
        }
        let claimed = match &self.tags {
            None => true,
            Some(tags) => {
                let name = doc.node_name(node)?;
                tags.iter().any(|t| name.eq_ignore_ascii_case(t))
            }
        };
        claimed.then(|| Rc::new(LiveSubtree::new(node)) as Rc<dyn Foreign>)
    }
}

/// Reverse parser configured with flags, a function registry and an
/// optional foreign adapter.
pub struct Parser {
    flags: Flags,
    registry: FuncRegistry,
    adapter: Option<Box<dyn ForeignAdapter>>,
}

impl Parser {
    pub fn new(flags: impl Into<Flags>) -> Self {
        Self {
            flags: flags.into(),
            registry: FuncRegistry::new(),
            adapter: None,
        }
    }

    pub fn with_registry(mut self, registry: FuncRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_adapter(mut self, adapter: impl ForeignAdapter + 'static) -> Self {
        self.adapter = Some(Box::new(adapter));
        self
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Markup equivalent of the subtree at `element`, or `None` when it is
    /// not an element.
    ///
    /// Every produced node remembers the element it was read from.
    pub fn create_from_dom(&self, doc: &dyn Document, element: NodeKey) -> Option<Markup> {
        if doc.node_type(element) != Some(NodeType::Element) {
            log::debug!(target: "dao.parse", "create_from_dom: {element:?} is not an element");
            return None;
        }
        let tag = doc.node_name(element)?.to_ascii_lowercase();
        let mut markup = Markup::element(tag);
        markup.attributes = read_attributes(doc, element);
        markup.attached = Some(element);

        for child in doc.child_nodes(element) {
            if let Some(parsed) = self.read_child(doc, child) {
                markup.children.push(parsed);
            }
        }
        Some(markup)
    }

    fn read_child(&self, doc: &dyn Document, node: NodeKey) -> Option<Child> {
        match doc.node_type(node)? {
            NodeType::Element => {
                if self.flags.retain_live {
                    if let Some(adapter) = &self.adapter {
                        if let Some(foreign) = adapter.retain(doc, node) {
                            return Some(Child::Foreign(ForeignRef(foreign)));
                        }
                    }
                }
                self.create_from_dom(doc, node).map(Child::Node)
            }
            NodeType::Text | NodeType::CData => {
                let text = doc.character_data(node)?;
                if self.flags.strip_whitespace && text.trim().is_empty() {
                    return None;
                }
                let text = if self.flags.trim { text.trim() } else { text };
                Some(Child::from(text))
            }
            NodeType::Comment => {
                let comment = doc.character_data(node)?;
                match self.registry.compile_comment(comment)? {
                    Ok(child) => Some(child),
                    Err(err) => {
                        log::warn!(target: "dao.parse", "skipping embedded function in {node:?}: {err}");
                        None
                    }
                }
            }
            NodeType::Document | NodeType::Fragment => None,
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(Flags::default())
    }
}

/// [`Parser::create_from_dom`] with the built-in registry and no adapter.
pub fn create_from_dom(doc: &dyn Document, element: NodeKey, flags: impl Into<Flags>) -> Option<Markup> {
    Parser::new(flags).create_from_dom(doc, element)
}

fn read_attributes(doc: &dyn Document, element: NodeKey) -> Attributes {
    doc.attributes(element)
        .into_iter()
        .map(|(name, value)| (name.to_string(), AttrValue::from(value.unwrap_or(""))))
        .collect()
}
