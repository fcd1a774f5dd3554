//! Serializable form of markup: `[tag-or-false, {attributes}, children...]`.
//!
//! Export keeps only literal content. Functions, accessors, handlers,
//! foreign content and already-built nodes have no JSON form and are left
//! out; an attribute list that ends up empty is dropped.

use crate::markup::{Child, Markup};
use crate::normalize::Slot;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

impl Markup {
    pub fn to_json(&self) -> Value {
        let mut out = Vec::with_capacity(self.children.len() + 2);
        out.push(match &self.tag {
            Some(tag) => Value::String(tag.clone()),
            None => Value::Bool(false),
        });
        out.push(self.attributes.to_json());
        out.extend(self.children.iter().filter_map(child_to_json));
        Value::Array(out)
    }

    /// Inverse of [`Markup::to_json`]. A bare string is a tag name; any other
    /// non-array value yields an empty fragment.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Array(items) => {
                let attrs_at = usize::from(items.first().is_some_and(is_tag));
                let slots = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| match item {
                        Value::Object(_) if i != attrs_at => {
                            Slot::Child(Child::from_data(item.clone()))
                        }
                        _ => Slot::from_json(item),
                    })
                    .collect();
                Markup::from_slots(slots)
            }
            Value::String(tag) => Markup::element(tag.as_str()),
            other => {
                log::debug!(target: "dao.normalize", "from_json: {other} is not markup");
                Markup::fragment()
            }
        }
    }
}

fn is_tag(value: &Value) -> bool {
    match value {
        Value::String(tag) => !tag.is_empty(),
        Value::Bool(b) => !b,
        _ => false,
    }
}

fn child_to_json(child: &Child) -> Option<Value> {
    match child {
        Child::Node(node) => Some(node.to_json()),
        Child::Raw(slots) => Some(Markup::from_slots(slots.clone()).to_json()),
        Child::Literal(literal) => Some(literal.to_json()),
        Child::Func(_) | Child::Accessor(_) | Child::Empty | Child::Foreign(_) | Child::Built(_) => None,
    }
}

impl Serialize for Markup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Markup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(|value| Markup::from_json(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::get;
    use crate::attributes::AttrValue;
    use core_types::Handler;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn nested_arrays_become_nodes() {
        let node = Markup::from_json(&json!(["ul", {"class": "list"}, ["li", "one"], ["li", "two"]]));
        assert_eq!(node.tag(), Some("ul"));
        assert_eq!(node.attributes().get("class"), Some(&AttrValue::from("list")));
        let tags: Vec<_> = node.children().iter().filter_map(|c| c.as_node()?.tag()).collect();
        assert_eq!(tags, ["li", "li"]);
    }

    #[test]
    fn export_is_normalized_and_strips_callables() {
        let mut node = Markup::from_json(&json!(["button", "Go"]));
        node.on("onClick", Handler::new(|_| {}));
        node.attr(("title", "t"));
        node.push(get("label"));
        assert_eq!(node.to_json(), json!(["button", {"title": "t"}, "Go"]));
    }

    #[test]
    fn fragments_export_with_false_tag() {
        let node = Markup::from_json(&json!([["b", "x"], "y"]));
        assert_eq!(node.to_json(), json!([false, {}, ["b", {}, "x"], "y"]));
    }

    #[test]
    fn export_reimports_to_the_same_tree() {
        let source = json!(["div", {"id": "a", "n": 2}, "text", ["span", {}, true]]);
        let node = Markup::from_json(&source);
        assert_eq!(Markup::from_json(&node.to_json()), node);
    }

    #[test]
    fn integers_serialize_as_integers() {
        let node = Markup::from_json(&json!(["td", {"colspan": 2, "w": 0.5}, 3]));
        assert_eq!(
            serde_json::to_string(&node).unwrap(),
            r#"["td",{"colspan":2,"w":0.5},3]"#
        );
    }

    #[test]
    fn objects_past_the_attribute_slot_are_text() {
        let node = Markup::from_json(&json!(["p", {}, "x", {"k": 1}, "y"]));
        assert_eq!(node.children()[1].as_text(), Some(r#"{"k":1}"#));
        let fragment = Markup::from_json(&json!([{"id": "a"}, {"k": null}]));
        assert_eq!(fragment.attributes().get("id"), Some(&AttrValue::from("a")));
        assert_eq!(fragment.children()[0].as_text(), Some(r#"{"k":null}"#));
    }

    #[test]
    fn serde_uses_the_json_form() {
        let node: Markup = serde_json::from_str(r#"["p", "hi"]"#).unwrap();
        assert_eq!(serde_json::to_value(&node).unwrap(), json!(["p", {}, "hi"]));
        let tag_only: Markup = serde_json::from_str(r#""hr""#).unwrap();
        assert_eq!(tag_only.to_json(), json!(["hr", {}]));
    }
}
