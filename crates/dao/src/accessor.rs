//! Data accessors: path lookup (`get`) and list mapping (`map`).

use crate::func::{Accessor, Func};
use crate::markup::{Child, Markup};
use crate::value::is_truthy;
use serde_json::Value;

/// A property path into build data.
///
/// The string form is dot-separated (`"user.name"`); numeric segments index
/// into arrays. The empty string addresses the data itself; empty segments
/// inside a longer path are kept and match only an empty key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path(Vec<String>);

impl Path {
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Walk the path. `None` when a segment is missing or an intermediate
    /// value is falsy.
    pub fn resolve<'a>(&self, data: &'a Value) -> Option<&'a Value> {
        let mut current = data;
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 && !is_truthy(current) {
                return None;
            }
            current = match current {
                Value::Object(object) => object.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Owned lookup; unresolvable paths yield `false`.
    pub fn lookup(&self, data: &Value) -> Value {
        self.resolve(data).cloned().unwrap_or(Value::Bool(false))
    }
}

impl From<&str> for Path {
    fn from(path: &str) -> Self {
        if path.is_empty() {
            return Path::default();
        }
        Path(path.split('.').map(str::to_string).collect())
    }
}

impl From<String> for Path {
    fn from(path: String) -> Self {
        Path::from(path.as_str())
    }
}

impl From<Vec<String>> for Path {
    fn from(segments: Vec<String>) -> Self {
        Path(segments)
    }
}

impl From<&[&str]> for Path {
    fn from(segments: &[&str]) -> Self {
        Path(segments.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Path {
    fn from(segments: [&str; N]) -> Self {
        Path::from(&segments[..])
    }
}

/// Accessor returning the value at `path`, or `false` when it cannot be
/// resolved.
pub fn get(path: impl Into<Path>) -> Accessor {
    let path = path.into();
    Accessor::from_data(move |data| path.lookup(data))
}

/// Child function that builds a fresh copy of `template` for every item of
/// the list at `path`. Anything other than a list yields no children.
pub fn map(path: impl Into<Path>, template: Markup) -> Func {
    let path = path.into();
    Func::new(move |data, scope| {
        let Some(Value::Array(items)) = path.resolve(data) else {
            log::trace!(target: "dao.build", "map: {:?} is not a list", path.segments());
            return Ok(Child::Built(Vec::new()));
        };
        let mut built = Vec::with_capacity(items.len());
        for item in items {
            let mut instance = template.clone();
            built.push(instance.build(item, &mut *scope.document)?);
        }
        Ok(Child::Built(built))
    })
}

/// [`map`] over the data itself.
pub fn map_all(template: Markup) -> Func {
    map(Path::default(), template)
}
