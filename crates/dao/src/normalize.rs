//! The positional form `[tag-or-false, attributes, children...]` and its
//! canonicalization.

use crate::attributes::Attributes;
use crate::markup::{Child, Markup};
use crate::value::Literal;
use serde_json::Value;

/// One position of the loose, positional node form.
#[derive(Clone, Debug, PartialEq)]
pub enum Slot {
    Attrs(Attributes),
    Child(Child),
}

impl Slot {
    /// JSON in positional form: objects are attribute mappings, arrays are
    /// nested nodes, everything else is content.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(object) => Slot::Attrs(Attributes::from_json_object(object)),
            Value::Array(_) => Slot::Child(Child::Node(Markup::from_json(value))),
            other => Slot::Child(Child::from_data(other.clone())),
        }
    }

    fn is_tag(&self) -> bool {
        match self {
            Slot::Child(Child::Literal(Literal::String(tag))) => !tag.is_empty(),
            Slot::Child(Child::Literal(Literal::Bool(false))) => true,
            _ => false,
        }
    }
}

macro_rules! child_slot {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Slot {
                fn from(value: $ty) -> Self {
                    Slot::Child(value.into())
                }
            }
        )*
    };
}

child_slot!(&str, String, f64, i32, i64, bool, Literal, Markup, Child);

impl From<Attributes> for Slot {
    fn from(value: Attributes) -> Self {
        Slot::Attrs(value)
    }
}

/// Bring `slots` into canonical shape, in place.
///
/// Afterwards slot 0 is a non-empty tag name or `false` (fragment), slot 1
/// is an attribute mapping, and the original positional content follows.
/// Applying it twice changes nothing.
pub fn normalize(slots: &mut Vec<Slot>) {
    if !slots.first().is_some_and(Slot::is_tag) {
        slots.insert(0, Slot::Child(Child::Literal(Literal::Bool(false))));
    }
    match slots.get(1) {
        Some(Slot::Attrs(_)) => {}
        Some(_) => slots.insert(1, Slot::Attrs(Attributes::new())),
        None => slots.push(Slot::Attrs(Attributes::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn normalized(mut slots: Vec<Slot>) -> Vec<Slot> {
        normalize(&mut slots);
        slots
    }

    fn fragment_head() -> [Slot; 2] {
        [Slot::from(false), Slot::Attrs(Attributes::new())]
    }

    #[test]
    fn empty_becomes_empty_fragment() {
        assert_eq!(normalized(vec![]), fragment_head().to_vec());
    }

    #[test]
    fn tag_only_gains_attributes() {
        assert_eq!(
            normalized(vec![Slot::from("div")]),
            vec![Slot::from("div"), Slot::Attrs(Attributes::new())]
        );
    }

    #[test]
    fn tag_followed_by_content_gets_attributes_inserted() {
        assert_eq!(
            normalized(vec![Slot::from("p"), Slot::from(" hi ")]),
            vec![Slot::from("p"), Slot::Attrs(Attributes::new()), Slot::from(" hi ")]
        );
    }

    #[test]
    fn leading_non_tag_becomes_fragment_content() {
        let nested = Markup::element("b");
        let mut expected = fragment_head().to_vec();
        expected.push(Slot::from(nested.clone()));
        assert_eq!(normalized(vec![Slot::from(nested)]), expected);

        let mut expected = fragment_head().to_vec();
        expected.push(Slot::from(""));
        assert_eq!(normalized(vec![Slot::from("")]), expected);
    }

    #[test]
    fn leading_attributes_are_kept_after_fragment_tag() {
        let attrs = Attributes::from([("id", "x")]);
        assert_eq!(
            normalized(vec![Slot::from(attrs.clone()), Slot::from("text")]),
            vec![Slot::from(false), Slot::from(attrs), Slot::from("text")]
        );
    }

    #[test]
    fn normalization_is_idempotent() {
        let cases = vec![
            vec![],
            vec![Slot::from("div")],
            vec![Slot::from(false)],
            vec![Slot::from(1)],
            vec![Slot::from("ul"), Slot::from("a"), Slot::from("b")],
            vec![Slot::from(Attributes::from([("k", "v")]))],
            vec![Slot::from(Child::Empty), Slot::from("x")],
        ];
        for case in cases {
            let once = normalized(case);
            assert_eq!(normalized(once.clone()), once);
            assert!(once[0].is_tag());
            assert!(matches!(once[1], Slot::Attrs(_)));
        }
    }
}
