//! Attribute mappings and the values they may hold.

use crate::func::Accessor;
use crate::value::{Literal, literal_from_data};
use core_types::Handler;
use serde_json::Value;

/// A single attribute value.
///
/// Lists fan out at build time: every entry is applied to the same key in
/// order, which is how several handlers share one event name.
#[derive(Clone, Debug)]
pub enum AttrValue {
    Literal(Literal),
    List(Vec<AttrValue>),
    Handler(Handler),
    Accessor(Accessor),
}

impl AttrValue {
    pub fn is_callable(&self) -> bool {
        matches!(self, AttrValue::Handler(_) | AttrValue::Accessor(_))
    }

    /// Accessor output in attribute position. `null` becomes `false`, which
    /// is omitted at build time.
    pub fn from_data(value: &Value) -> Self {
        match value {
            Value::Array(items) => AttrValue::List(items.iter().map(AttrValue::from_data).collect()),
            Value::Object(_) => AttrValue::Literal(Literal::String(value.to_string())),
            other => AttrValue::Literal(literal_from_data(other).unwrap_or(Literal::Bool(false))),
        }
    }

    /// Serializable form; callables have none.
    pub(crate) fn to_json(&self) -> Option<Value> {
        match self {
            AttrValue::Literal(literal) => Some(literal.to_json()),
            AttrValue::List(items) => {
                let kept: Vec<Value> = items.iter().filter_map(AttrValue::to_json).collect();
                (!kept.is_empty()).then_some(Value::Array(kept))
            }
            AttrValue::Handler(_) | AttrValue::Accessor(_) => None,
        }
    }
}

impl PartialEq for AttrValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AttrValue::Literal(a), AttrValue::Literal(b)) => a == b,
            (AttrValue::List(a), AttrValue::List(b)) => a == b,
            (AttrValue::Handler(a), AttrValue::Handler(b)) => a.ptr_eq(b),
            (AttrValue::Accessor(a), AttrValue::Accessor(b)) => a == b,
            _ => false,
        }
    }
}

macro_rules! literal_attr_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for AttrValue {
                fn from(value: $ty) -> Self {
                    AttrValue::Literal(value.into())
                }
            }
        )*
    };
}

literal_attr_value!(&str, String, f64, i32, i64, bool);

impl From<Literal> for AttrValue {
    fn from(value: Literal) -> Self {
        AttrValue::Literal(value)
    }
}

impl From<Handler> for AttrValue {
    fn from(value: Handler) -> Self {
        AttrValue::Handler(value)
    }
}

impl From<Accessor> for AttrValue {
    fn from(value: Accessor) -> Self {
        AttrValue::Accessor(value)
    }
}

impl From<Vec<AttrValue>> for AttrValue {
    fn from(value: Vec<AttrValue>) -> Self {
        AttrValue::List(value)
    }
}

/// Ordered attribute mapping. Keys are unique; insertion order is kept so
/// attributes are applied in the order they were written.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attributes(Vec<(String, AttrValue)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut AttrValue> {
        self.0.iter_mut().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Set `key`, replacing an existing value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        let key = key.into();
        let value = value.into();
        match self.get_mut(&key) {
            Some(existing) => *existing = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        let index = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub(crate) fn from_json_object(object: &serde_json::Map<String, Value>) -> Self {
        object
            .iter()
            .map(|(k, v)| (k.clone(), AttrValue::from_data(v)))
            .collect()
    }

    pub(crate) fn to_json(&self) -> Value {
        let object = self
            .0
            .iter()
            .filter_map(|(k, v)| v.to_json().map(|v| (k.clone(), v)))
            .collect();
        Value::Object(object)
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (k, v) in iter {
            attributes.insert(k, v);
        }
        attributes
    }
}

impl<K: Into<String>, V: Into<AttrValue>, const N: usize> From<[(K, V); N]> for Attributes {
    fn from(value: [(K, V); N]) -> Self {
        value.into_iter().collect()
    }
}

impl IntoIterator for Attributes {
    type Item = (String, AttrValue);
    type IntoIter = std::vec::IntoIter<(String, AttrValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Arguments accepted by [`Markup::attr`](crate::Markup::attr): either a
/// whole mapping or a single key/value pair.
#[derive(Clone, Debug)]
pub enum AttrArgs {
    Map(Attributes),
    Pair(String, AttrValue),
}

impl AttrArgs {
    /// Unified mapping form. An empty key yields nothing.
    pub fn into_attributes(self) -> Option<Attributes> {
        match self {
            AttrArgs::Map(map) => Some(map),
            AttrArgs::Pair(key, _) if key.is_empty() => None,
            AttrArgs::Pair(key, value) => Some(Attributes(vec![(key, value)])),
        }
    }
}

impl From<Attributes> for AttrArgs {
    fn from(value: Attributes) -> Self {
        AttrArgs::Map(value)
    }
}

impl<K: Into<String>, V: Into<AttrValue>> From<(K, V)> for AttrArgs {
    fn from((key, value): (K, V)) -> Self {
        AttrArgs::Pair(key.into(), value.into())
    }
}
