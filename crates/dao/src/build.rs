//! Materializing markup into a host document.

use crate::attributes::AttrValue;
use crate::error::BuildError;
use crate::func::Scope;
use crate::markup::{Child, Markup};
use crate::value::Literal;
use core_types::{Document, NodeKey};
use serde_json::Value;

impl Markup {
    /// Build a detached document subtree for `data`.
    ///
    /// Attributes are applied in insertion order before any child is built;
    /// children are appended in slot order. The node is only normalized, not
    /// otherwise changed, so it can be built again with other data.
    pub fn build(&mut self, data: &Value, doc: &mut dyn Document) -> Result<NodeKey, BuildError> {
        self.normalize();
        let node = match &self.tag {
            Some(tag) => doc.create_element(tag)?,
            None => doc.create_fragment()?,
        };
        log::trace!(target: "dao.build", "build <{}> as {node:?}", self.tag.as_deref().unwrap_or("#fragment"));
        if self.tag.is_some() {
            for (key, value) in self.attributes.iter() {
                apply_attribute(key, value, data, node, doc)?;
            }
        }
        for child in &mut self.children {
            for built in resolve_child(child, data, node, doc)? {
                doc.append_child(node, built)?;
            }
        }
        Ok(node)
    }

    /// Rebuild and swap the result in for the previously attached node,
    /// which is then removed from the document.
    ///
    /// Returns `Ok(None)` (and logs a warning) when there is no attached
    /// node or it has no parent to be replaced in.
    pub fn render(&mut self, data: &Value, doc: &mut dyn Document) -> Result<Option<NodeKey>, BuildError> {
        let Some(attached) = self.attached else {
            log::warn!(target: "dao.render", "render: markup has no attached node");
            return Ok(None);
        };
        let Some(parent) = doc.parent(attached) else {
            log::warn!(target: "dao.render", "render: attached node {attached:?} has no parent");
            return Ok(None);
        };
        let fresh = self.build(data, doc)?;
        doc.replace_child(parent, fresh, attached)?;
        doc.remove_node(attached)?;
        self.attached = Some(fresh);
        Ok(Some(fresh))
    }

    /// Build and append the result as the last child of `parent`.
    ///
    /// Does not touch the attached node. Returns `Ok(None)` (and logs a
    /// warning) when `parent` cannot hold children.
    pub fn append_to(
        &mut self,
        parent: NodeKey,
        data: &Value,
        doc: &mut dyn Document,
    ) -> Result<Option<NodeKey>, BuildError> {
        if !doc.node_type(parent).is_some_and(|kind| kind.allows_children()) {
            log::warn!(target: "dao.append", "append_to: {parent:?} is not a valid container");
            return Ok(None);
        }
        let built = self.build(data, doc)?;
        doc.append_child(parent, built)?;
        Ok(Some(built))
    }
}

fn apply_attribute(
    key: &str,
    value: &AttrValue,
    data: &Value,
    element: NodeKey,
    doc: &mut dyn Document,
) -> Result<(), BuildError> {
    match value {
        AttrValue::List(items) => {
            for item in items {
                apply_attribute(key, item, data, element, doc)?;
            }
        }
        AttrValue::Accessor(accessor) => {
            let computed = accessor.call(data, &mut Scope { element, document: &mut *doc })?;
            apply_attribute(key, &AttrValue::from_data(&computed), data, element, doc)?;
        }
        AttrValue::Handler(handler) => doc.add_listener(element, key, handler.clone())?,
        AttrValue::Literal(Literal::Bool(false)) => {
            log::trace!(target: "dao.build", "omit attribute {key:?}");
        }
        AttrValue::Literal(literal) => doc.set_attribute(element, key, &literal.to_string())?,
    }
    Ok(())
}

/// Document nodes for one child slot, in insertion order.
fn resolve_child(
    child: &mut Child,
    data: &Value,
    parent: NodeKey,
    doc: &mut dyn Document,
) -> Result<Vec<NodeKey>, BuildError> {
    Ok(match child {
        Child::Node(node) => vec![node.build(data, doc)?],
        Child::Raw(slots) => {
            let mut node = Markup::from_slots(slots.clone());
            vec![node.build(data, doc)?]
        }
        Child::Func(func) => {
            let mut produced = func.call(data, &mut Scope { element: parent, document: &mut *doc })?;
            resolve_child(&mut produced, data, parent, doc)?
        }
        Child::Accessor(accessor) => {
            let computed = accessor.call(data, &mut Scope { element: parent, document: &mut *doc })?;
            resolve_child(&mut Child::from_data(computed), data, parent, doc)?
        }
        Child::Literal(literal) if literal.is_skipped() => Vec::new(),
        Child::Literal(literal) => vec![doc.create_text(&literal.to_string())?],
        Child::Empty => Vec::new(),
        Child::Foreign(foreign) => foreign.0.materialize(doc)?,
        Child::Built(nodes) => nodes.clone(),
    })
}
