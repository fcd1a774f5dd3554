use crate::patch::DomPatch;
use core_types::{Document, DocumentError, Handler, NodeKey, NodeType};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomPatchError {
    #[error("patch key must be non-zero")]
    InvalidKey(NodeKey),
    #[error("node key {0:?} is not fresh")]
    DuplicateKey(NodeKey),
    #[error("node key {0:?} is not live")]
    MissingKey(NodeKey),
    #[error("operation not valid for node kind of {0:?}")]
    WrongNodeKind(NodeKey),
    #[error("node {0:?} cannot have children")]
    InvalidParent(NodeKey),
    #[error("node {0:?} already has a parent")]
    Attached(NodeKey),
    #[error("{before:?} is not a child of {parent:?}")]
    InvalidSibling { parent: NodeKey, before: NodeKey },
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    CycleDetected { parent: NodeKey, child: NodeKey },
    #[error("invalid name {0:?}")]
    InvalidName(String),
    #[error("a patch stream must begin with CreateDocument")]
    MissingRoot,
}

impl From<DomPatchError> for DocumentError {
    fn from(err: DomPatchError) -> Self {
        match err {
            DomPatchError::InvalidKey(key) | DomPatchError::MissingKey(key) => {
                DocumentError::MissingNode(key)
            }
            DomPatchError::DuplicateKey(key) | DomPatchError::WrongNodeKind(key) => {
                DocumentError::WrongNodeKind(key)
            }
            DomPatchError::InvalidParent(key) => DocumentError::InvalidParent(key),
            DomPatchError::Attached(key) => DocumentError::AlreadyAttached(key),
            DomPatchError::InvalidSibling { parent, before } => DocumentError::NotAChild {
                parent,
                child: before,
            },
            DomPatchError::CycleDetected { parent, child } => {
                DocumentError::Cycle { parent, child }
            }
            DomPatchError::InvalidName(name) => DocumentError::InvalidName(name),
            DomPatchError::MissingRoot => DocumentError::MissingNode(NodeKey::INVALID),
        }
    }
}

pub(crate) enum NodeKind {
    Document,
    Fragment,
    Element {
        name: Arc<str>,
        attributes: Vec<(Arc<str>, Option<String>)>,
    },
    Text {
        text: String,
    },
    CData {
        text: String,
    },
    Comment {
        text: String,
    },
}

impl NodeKind {
    fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Document => NodeType::Document,
            NodeKind::Fragment => NodeType::Fragment,
            NodeKind::Element { .. } => NodeType::Element,
            NodeKind::Text { .. } => NodeType::Text,
            NodeKind::CData { .. } => NodeType::CData,
            NodeKind::Comment { .. } => NodeType::Comment,
        }
    }
}

pub(crate) struct NodeRecord {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) children: Vec<NodeKey>,
    pub(crate) listeners: Vec<(Arc<str>, Handler)>,
}

impl NodeRecord {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            listeners: Vec::new(),
        }
    }

    fn allows_children(&self) -> bool {
        self.kind.node_type().allows_children()
    }
}

/// Element and attribute names accepted by the document.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '/' | '"' | '\'' | '=' | '\0'))
}

/// In-memory arena document.
///
/// Nodes are addressed by [`NodeKey`]; keys are allocated monotonically and
/// never reused, while arena slots of removed nodes are recycled. Every
/// mutation goes through [`Dom::apply`]. A document made with
/// [`Dom::journaled`] also records each applied patch; drain the record
/// with [`Dom::take_patches`].
pub struct Dom {
    nodes: Vec<NodeRecord>,
    live: HashMap<NodeKey, usize>,
    free: Vec<usize>,
    root: NodeKey,
    next_key: u32,
    journal: Option<Vec<DomPatch>>,
}

impl Dom {
    pub fn new() -> Self {
        let mut dom = Self::empty();
        let root = dom.fresh_key();
        dom.root = root;
        dom.nodes.push(NodeRecord::new(NodeKind::Document));
        dom.live.insert(root, 0);
        dom.next_key = root.0 + 1;
        dom
    }

    /// A new document that journals every applied patch.
    pub fn journaled() -> Self {
        let mut dom = Self::new();
        dom.journal = Some(vec![DomPatch::CreateDocument { key: dom.root }]);
        dom
    }

    fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            live: HashMap::new(),
            free: Vec::new(),
            root: NodeKey::INVALID,
            next_key: 1,
            journal: None,
        }
    }

    /// Rebuild a document from a self-contained patch stream.
    pub fn from_patches(patches: &[DomPatch]) -> Result<Self, DomPatchError> {
        if !matches!(patches.first(), Some(DomPatch::CreateDocument { .. })) {
            return Err(DomPatchError::MissingRoot);
        }
        let mut dom = Self::empty();
        for patch in patches {
            dom.apply(patch.clone())?;
        }
        Ok(dom)
    }

    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Number of live nodes, the document node included.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.len() <= 1
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.live.contains_key(&key)
    }

    /// Patches recorded since the last drain; empty unless journaled.
    pub fn journal(&self) -> &[DomPatch] {
        self.journal.as_deref().unwrap_or_default()
    }

    pub fn take_patches(&mut self) -> Vec<DomPatch> {
        self.journal.as_mut().map(std::mem::take).unwrap_or_default()
    }

    pub fn get_attribute(&self, key: NodeKey, name: &str) -> Option<&str> {
        match &self.record(key)?.kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_deref().unwrap_or("")),
            _ => None,
        }
    }

    pub(crate) fn record(&self, key: NodeKey) -> Option<&NodeRecord> {
        self.live.get(&key).map(|&index| &self.nodes[index])
    }

    fn record_mut(&mut self, key: NodeKey) -> Result<&mut NodeRecord, DomPatchError> {
        let index = *self.live.get(&key).ok_or(DomPatchError::MissingKey(key))?;
        Ok(&mut self.nodes[index])
    }

    fn fresh_key(&self) -> NodeKey {
        NodeKey(self.next_key)
    }

    /// Apply one patch, journaling it when enabled.
    pub fn apply(&mut self, patch: DomPatch) -> Result<(), DomPatchError> {
        self.apply_one(&patch)?;
        log::trace!(target: "dom.patch", "applied {patch:?}");
        if let Some(journal) = &mut self.journal {
            journal.push(patch);
        }
        Ok(())
    }

    fn apply_one(&mut self, patch: &DomPatch) -> Result<(), DomPatchError> {
        match patch {
            DomPatch::CreateDocument { key } => {
                if self.root != NodeKey::INVALID {
                    return Err(DomPatchError::DuplicateKey(*key));
                }
                self.insert_node(*key, NodeKind::Document)?;
                self.root = *key;
            }
            DomPatch::CreateFragment { key } => {
                self.insert_node(*key, NodeKind::Fragment)?;
            }
            DomPatch::CreateElement {
                key,
                name,
                attributes,
            } => {
                if !is_valid_name(name) {
                    return Err(DomPatchError::InvalidName(name.to_string()));
                }
                self.insert_node(
                    *key,
                    NodeKind::Element {
                        name: Arc::clone(name),
                        attributes: attributes.clone(),
                    },
                )?;
            }
            DomPatch::CreateText { key, text } => {
                self.insert_node(*key, NodeKind::Text { text: text.clone() })?;
            }
            DomPatch::CreateCData { key, text } => {
                self.insert_node(*key, NodeKind::CData { text: text.clone() })?;
            }
            DomPatch::CreateComment { key, text } => {
                self.insert_node(*key, NodeKind::Comment { text: text.clone() })?;
            }
            DomPatch::AppendChild { parent, child } => {
                self.check_insert(*parent, *child)?;
                self.record_mut(*parent)?.children.push(*child);
                self.record_mut(*child)?.parent = Some(*parent);
            }
            DomPatch::InsertBefore {
                parent,
                child,
                before,
            } => {
                self.check_insert(*parent, *child)?;
                let siblings = &self.record_mut(*parent)?.children;
                let pos = siblings
                    .iter()
                    .position(|k| k == before)
                    .ok_or(DomPatchError::InvalidSibling {
                        parent: *parent,
                        before: *before,
                    })?;
                self.record_mut(*parent)?.children.insert(pos, *child);
                self.record_mut(*child)?.parent = Some(*parent);
            }
            DomPatch::Detach { key } => {
                self.detach(*key)?;
            }
            DomPatch::RemoveNode { key } => {
                if *key == self.root {
                    return Err(DomPatchError::WrongNodeKind(*key));
                }
                self.detach(*key)?;
                self.remove_subtree(*key);
            }
            DomPatch::SetAttribute { key, name, value } => {
                if !is_valid_name(name) {
                    return Err(DomPatchError::InvalidName(name.to_string()));
                }
                match &mut self.record_mut(*key)?.kind {
                    NodeKind::Element { attributes, .. } => {
                        match attributes.iter_mut().find(|(k, _)| k == name) {
                            Some((_, existing)) => *existing = value.clone(),
                            None => attributes.push((Arc::clone(name), value.clone())),
                        }
                    }
                    _ => return Err(DomPatchError::WrongNodeKind(*key)),
                }
            }
        }
        Ok(())
    }

    fn insert_node(&mut self, key: NodeKey, kind: NodeKind) -> Result<(), DomPatchError> {
        if key == NodeKey::INVALID {
            return Err(DomPatchError::InvalidKey(key));
        }
        // Keys only ever grow, so anything below `next_key` was handed out.
        if key.0 < self.next_key {
            return Err(DomPatchError::DuplicateKey(key));
        }
        let record = NodeRecord::new(kind);
        let index = match self.free.pop() {
            Some(index) => {
                self.nodes[index] = record;
                index
            }
            None => {
                self.nodes.push(record);
                self.nodes.len() - 1
            }
        };
        self.live.insert(key, index);
        self.next_key = key.0.wrapping_add(1);
        Ok(())
    }

    fn check_insert(&self, parent: NodeKey, child: NodeKey) -> Result<(), DomPatchError> {
        let parent_record = self.record(parent).ok_or(DomPatchError::MissingKey(parent))?;
        let child_record = self.record(child).ok_or(DomPatchError::MissingKey(child))?;
        if parent == child || self.is_descendant(child, parent) {
            return Err(DomPatchError::CycleDetected { parent, child });
        }
        if !parent_record.allows_children() {
            return Err(DomPatchError::InvalidParent(parent));
        }
        if matches!(child_record.kind, NodeKind::Document) {
            return Err(DomPatchError::WrongNodeKind(child));
        }
        if child_record.parent.is_some() {
            return Err(DomPatchError::Attached(child));
        }
        Ok(())
    }

    fn detach(&mut self, key: NodeKey) -> Result<(), DomPatchError> {
        let Some(parent) = self.record_mut(key)?.parent.take() else {
            return Ok(());
        };
        if let Ok(parent_record) = self.record_mut(parent) {
            parent_record.children.retain(|k| *k != key);
        }
        Ok(())
    }

    fn remove_subtree(&mut self, key: NodeKey) {
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            if let Some(index) = self.live.remove(&current) {
                let record = std::mem::replace(
                    &mut self.nodes[index],
                    NodeRecord::new(NodeKind::Fragment),
                );
                stack.extend(record.children);
                self.free.push(index);
            }
        }
    }

    pub(crate) fn is_descendant(&self, ancestor: NodeKey, maybe_descendant: NodeKey) -> bool {
        let Some(record) = self.record(ancestor) else {
            return false;
        };
        let mut stack = record.children.clone();
        while let Some(current) = stack.pop() {
            if current == maybe_descendant {
                return true;
            }
            if let Some(record) = self.record(current) {
                stack.extend(record.children.iter().copied());
            }
        }
        false
    }

    fn create(&mut self, make: impl FnOnce(NodeKey) -> DomPatch) -> Result<NodeKey, DomPatchError> {
        let key = self.fresh_key();
        self.apply(make(key))?;
        Ok(key)
    }

    /// Move `child` (or a fragment's children) to the end of `parent`.
    fn move_into(
        &mut self,
        parent: NodeKey,
        child: NodeKey,
        before: Option<NodeKey>,
    ) -> Result<(), DomPatchError> {
        let child_record = self.record(child).ok_or(DomPatchError::MissingKey(child))?;
        let moving = if matches!(child_record.kind, NodeKind::Fragment) {
            child_record.children.clone()
        } else {
            vec![child]
        };
        if parent == child || self.is_descendant(child, parent) {
            return Err(DomPatchError::CycleDetected { parent, child });
        }
        for node in moving {
            if self.record(node).is_some_and(|r| r.parent.is_some()) {
                self.apply(DomPatch::Detach { key: node })?;
            }
            match before {
                Some(before) => self.apply(DomPatch::InsertBefore {
                    parent,
                    child: node,
                    before,
                })?,
                None => self.apply(DomPatch::AppendChild {
                    parent,
                    child: node,
                })?,
            }
        }
        Ok(())
    }

    fn clone_subtree(&mut self, node: NodeKey, deep: bool) -> Result<NodeKey, DomPatchError> {
        let record = self.record(node).ok_or(DomPatchError::MissingKey(node))?;
        let children = if deep { record.children.clone() } else { Vec::new() };
        let copy = match &record.kind {
            NodeKind::Document | NodeKind::Fragment => {
                self.create(|key| DomPatch::CreateFragment { key })?
            }
            NodeKind::Element { name, attributes } => {
                let name = Arc::clone(name);
                let attributes = attributes.clone();
                self.create(|key| DomPatch::CreateElement {
                    key,
                    name,
                    attributes,
                })?
            }
            NodeKind::Text { text } => {
                let text = text.clone();
                self.create(|key| DomPatch::CreateText { key, text })?
            }
            NodeKind::CData { text } => {
                let text = text.clone();
                self.create(|key| DomPatch::CreateCData { key, text })?
            }
            NodeKind::Comment { text } => {
                let text = text.clone();
                self.create(|key| DomPatch::CreateComment { key, text })?
            }
        };
        for child in children {
            let child_copy = self.clone_subtree(child, true)?;
            self.apply(DomPatch::AppendChild {
                parent: copy,
                child: child_copy,
            })?;
        }
        Ok(copy)
    }

    pub(crate) fn create_fragment_node(&mut self) -> Result<NodeKey, DomPatchError> {
        self.create(|key| DomPatch::CreateFragment { key })
    }

    pub(crate) fn create_text_node(&mut self, text: &str) -> Result<NodeKey, DomPatchError> {
        let text = text.to_string();
        self.create(|key| DomPatch::CreateText { key, text })
    }

    pub(crate) fn create_cdata_node(&mut self, text: &str) -> Result<NodeKey, DomPatchError> {
        let text = text.to_string();
        self.create(|key| DomPatch::CreateCData { key, text })
    }

    pub(crate) fn create_comment_node(&mut self, text: &str) -> Result<NodeKey, DomPatchError> {
        let text = text.to_string();
        self.create(|key| DomPatch::CreateComment { key, text })
    }

    pub(crate) fn create_element_with(
        &mut self,
        name: &str,
        attributes: Vec<(String, Option<String>)>,
    ) -> Result<NodeKey, DomPatchError> {
        let name: Arc<str> = Arc::from(name.to_ascii_lowercase());
        let attributes = attributes
            .into_iter()
            .map(|(k, v)| (Arc::from(k), v))
            .collect();
        self.create(|key| DomPatch::CreateElement {
            key,
            name,
            attributes,
        })
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for Dom {
    fn create_element(&mut self, name: &str) -> Result<NodeKey, DocumentError> {
        Ok(self.create_element_with(name, Vec::new())?)
    }

    fn create_fragment(&mut self) -> Result<NodeKey, DocumentError> {
        Ok(self.create_fragment_node()?)
    }

    fn create_text(&mut self, text: &str) -> Result<NodeKey, DocumentError> {
        Ok(self.create_text_node(text)?)
    }

    fn create_comment(&mut self, text: &str) -> Result<NodeKey, DocumentError> {
        Ok(self.create_comment_node(text)?)
    }

    fn clone_node(&mut self, node: NodeKey, deep: bool) -> Result<NodeKey, DocumentError> {
        Ok(self.clone_subtree(node, deep)?)
    }

    fn set_attribute(
        &mut self,
        node: NodeKey,
        name: &str,
        value: &str,
    ) -> Result<(), DocumentError> {
        Ok(self.apply(DomPatch::SetAttribute {
            key: node,
            name: Arc::from(name.to_ascii_lowercase()),
            value: Some(value.to_string()),
        })?)
    }

    fn add_listener(
        &mut self,
        node: NodeKey,
        event: &str,
        handler: Handler,
    ) -> Result<(), DocumentError> {
        let record = self.record_mut(node)?;
        record.listeners.push((Arc::from(event), handler));
        Ok(())
    }

    fn append_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<(), DocumentError> {
        Ok(self.move_into(parent, child, None)?)
    }

    fn replace_child(
        &mut self,
        parent: NodeKey,
        new_child: NodeKey,
        old_child: NodeKey,
    ) -> Result<(), DocumentError> {
        if self.parent(old_child) != Some(parent) {
            return Err(DocumentError::NotAChild {
                parent,
                child: old_child,
            });
        }
        if new_child == old_child {
            return Ok(());
        }
        self.move_into(parent, new_child, Some(old_child))?;
        Ok(self.apply(DomPatch::Detach { key: old_child })?)
    }

    fn remove_node(&mut self, node: NodeKey) -> Result<(), DocumentError> {
        Ok(self.apply(DomPatch::RemoveNode { key: node })?)
    }

    fn node_type(&self, node: NodeKey) -> Option<NodeType> {
        self.record(node).map(|r| r.kind.node_type())
    }

    fn parent(&self, node: NodeKey) -> Option<NodeKey> {
        self.record(node).and_then(|r| r.parent)
    }

    fn node_name(&self, node: NodeKey) -> Option<&str> {
        match &self.record(node)?.kind {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    fn attributes(&self, node: NodeKey) -> Vec<(&str, Option<&str>)> {
        match self.record(node).map(|r| &r.kind) {
            Some(NodeKind::Element { attributes, .. }) => attributes
                .iter()
                .map(|(k, v)| (k.as_ref(), v.as_deref()))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn character_data(&self, node: NodeKey) -> Option<&str> {
        match &self.record(node)?.kind {
            NodeKind::Text { text } | NodeKind::CData { text } | NodeKind::Comment { text } => {
                Some(text)
            }
            _ => None,
        }
    }

    fn child_nodes(&self, node: NodeKey) -> Vec<NodeKey> {
        self.record(node)
            .map(|r| r.children.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn append_fragment_moves_its_children() {
        let mut dom = Dom::new();
        let div = dom.create_element("div").unwrap();
        let frag = dom.create_fragment().unwrap();
        let a = dom.create_text("a").unwrap();
        let b = dom.create_text("b").unwrap();
        dom.append_child(frag, a).unwrap();
        dom.append_child(frag, b).unwrap();

        dom.append_child(div, frag).unwrap();

        assert_eq!(dom.child_nodes(div), vec![a, b]);
        assert!(dom.child_nodes(frag).is_empty());
        assert_eq!(dom.parent(a), Some(div));
    }

    #[test]
    fn append_rejects_cycles() {
        let mut dom = Dom::new();
        let outer = dom.create_element("div").unwrap();
        let inner = dom.create_element("span").unwrap();
        dom.append_child(outer, inner).unwrap();

        let err = dom.append_child(inner, outer).unwrap_err();
        assert_eq!(
            err,
            DocumentError::Cycle {
                parent: inner,
                child: outer
            }
        );
        assert_eq!(dom.parent(inner), Some(outer));
    }

    #[test]
    fn append_moves_an_attached_node() {
        let mut dom = Dom::new();
        let first = dom.create_element("ul").unwrap();
        let second = dom.create_element("ol").unwrap();
        let item = dom.create_element("li").unwrap();
        dom.append_child(first, item).unwrap();

        dom.append_child(second, item).unwrap();

        assert!(dom.child_nodes(first).is_empty());
        assert_eq!(dom.child_nodes(second), vec![item]);
    }

    #[test]
    fn replace_child_keeps_position_and_detaches_old() {
        let mut dom = Dom::new();
        let list = dom.create_element("ul").unwrap();
        let items: Vec<_> = (0..3).map(|_| dom.create_element("li").unwrap()).collect();
        for item in &items {
            dom.append_child(list, *item).unwrap();
        }
        let replacement = dom.create_element("p").unwrap();

        dom.replace_child(list, replacement, items[1]).unwrap();

        assert_eq!(dom.child_nodes(list), vec![items[0], replacement, items[2]]);
        assert_eq!(dom.parent(items[1]), None);
        assert!(dom.contains(items[1]));
    }

    #[test]
    fn replace_child_requires_the_old_node_under_parent() {
        let mut dom = Dom::new();
        let list = dom.create_element("ul").unwrap();
        let stray = dom.create_element("li").unwrap();
        let replacement = dom.create_element("li").unwrap();

        assert_eq!(
            dom.replace_child(list, replacement, stray),
            Err(DocumentError::NotAChild {
                parent: list,
                child: stray
            })
        );
    }

    #[test]
    fn set_attribute_overwrites_in_place() {
        let mut dom = Dom::new();
        let div = dom.create_element("DIV").unwrap();
        dom.set_attribute(div, "id", "a").unwrap();
        dom.set_attribute(div, "class", "x").unwrap();
        dom.set_attribute(div, "id", "b").unwrap();

        assert_eq!(dom.node_name(div), Some("div"));
        assert_eq!(
            dom.attributes(div),
            vec![("id", Some("b")), ("class", Some("x"))]
        );
    }

    #[test]
    fn set_attribute_on_text_is_rejected() {
        let mut dom = Dom::new();
        let text = dom.create_text("hi").unwrap();
        assert_eq!(
            dom.set_attribute(text, "id", "x"),
            Err(DocumentError::WrongNodeKind(text))
        );
    }

    #[test]
    fn invalid_element_names_are_rejected() {
        let mut dom = Dom::new();
        assert!(matches!(
            dom.create_element("not valid"),
            Err(DocumentError::InvalidName(_))
        ));
        assert!(matches!(
            dom.create_element(""),
            Err(DocumentError::InvalidName(_))
        ));
    }

    #[test]
    fn removed_keys_are_never_reused() {
        let mut dom = Dom::new();
        let div = dom.create_element("div").unwrap();
        let span = dom.create_element("span").unwrap();
        dom.append_child(div, span).unwrap();
        dom.remove_node(div).unwrap();

        assert!(!dom.contains(div));
        assert!(!dom.contains(span));
        let next = dom.create_element("p").unwrap();
        assert!(next > span);
    }

    #[test]
    fn deep_clone_copies_structure_but_not_parent() {
        let mut dom = Dom::new();
        let div = dom.create_element("div").unwrap();
        dom.set_attribute(div, "class", "card").unwrap();
        let text = dom.create_text("hello").unwrap();
        dom.append_child(div, text).unwrap();
        dom.append_child(dom.root(), div).unwrap();

        let copy = dom.clone_node(div, true).unwrap();

        assert_ne!(copy, div);
        assert_eq!(dom.parent(copy), None);
        assert_eq!(dom.get_attribute(copy, "class"), Some("card"));
        let copied_children = dom.child_nodes(copy);
        assert_eq!(copied_children.len(), 1);
        assert_eq!(dom.character_data(copied_children[0]), Some("hello"));
    }

    #[test]
    fn removed_slots_are_recycled() {
        let mut dom = Dom::new();
        for _ in 0..100 {
            let div = dom.create_element("div").unwrap();
            let text = dom.create_text("x").unwrap();
            dom.append_child(div, text).unwrap();
            dom.append_child(dom.root(), div).unwrap();
            dom.remove_node(div).unwrap();
        }
        assert_eq!(dom.len(), 1);
        assert!(dom.nodes.len() <= 3, "arena grew to {}", dom.nodes.len());
    }

    #[test]
    fn replayed_keys_must_be_fresh() {
        let patches = [
            DomPatch::CreateDocument { key: NodeKey(1) },
            DomPatch::CreateFragment { key: NodeKey(3) },
            DomPatch::CreateFragment { key: NodeKey(2) },
        ];
        assert_eq!(
            Dom::from_patches(&patches).err(),
            Some(DomPatchError::DuplicateKey(NodeKey(2)))
        );
    }

    #[test]
    fn plain_documents_do_not_journal() {
        let mut dom = Dom::new();
        let div = dom.create_element("div").unwrap();
        dom.append_child(dom.root(), div).unwrap();
        assert!(dom.journal().is_empty());
        assert!(dom.take_patches().is_empty());
    }

    #[test]
    fn take_patches_drains_the_journal() {
        let mut dom = Dom::journaled();
        dom.create_element("div").unwrap();
        assert_eq!(dom.take_patches().len(), 2);
        assert!(dom.journal().is_empty());
        dom.create_text("x").unwrap();
        assert_eq!(dom.journal().len(), 1);
    }

    #[test]
    fn journal_replays_into_an_identical_document() {
        let mut dom = Dom::journaled();
        let div = dom.create_element("div").unwrap();
        dom.set_attribute(div, "id", "main").unwrap();
        let text = dom.create_text("x").unwrap();
        dom.append_child(div, text).unwrap();
        dom.append_child(dom.root(), div).unwrap();

        let replayed = Dom::from_patches(dom.journal()).unwrap();

        assert_eq!(replayed.root(), dom.root());
        assert_eq!(replayed.child_nodes(replayed.root()), vec![div]);
        assert_eq!(replayed.get_attribute(div, "id"), Some("main"));
        assert_eq!(replayed.character_data(text), Some("x"));
    }

    #[test]
    fn replay_requires_a_document_first() {
        let patches = [DomPatch::CreateFragment { key: NodeKey(1) }];
        assert_eq!(
            Dom::from_patches(&patches).err(),
            Some(DomPatchError::MissingRoot)
        );
    }
}
