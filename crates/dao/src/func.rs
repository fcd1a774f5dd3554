//! Callables that participate in building: child-producing functions,
//! data accessors, and foreign content.

use crate::error::BuildError;
use crate::markup::Child;
use core_types::{Document, DocumentError, NodeKey};
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

/// Build-time context handed to functions and accessors.
pub struct Scope<'a> {
    /// The element (or fragment) currently being populated.
    pub element: NodeKey,
    pub document: &'a mut dyn Document,
}

type FuncFn = dyn Fn(&Value, &mut Scope<'_>) -> Result<Child, BuildError>;
type AccessorFn = dyn Fn(&Value, &mut Scope<'_>) -> Result<Value, BuildError>;

/// A child slot computed from the data at build time.
#[derive(Clone)]
pub struct Func(Rc<FuncFn>);

impl Func {
    pub fn new(
        f: impl Fn(&Value, &mut Scope<'_>) -> Result<Child, BuildError> + 'static,
    ) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, data: &Value, scope: &mut Scope<'_>) -> Result<Child, BuildError> {
        (self.0)(data, scope)
    }

    pub fn ptr_eq(&self, other: &Func) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Func {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Func(..)")
    }
}

/// A value derived from the data at build time.
///
/// In attribute position the result becomes the attribute value; in child
/// position it becomes content.
#[derive(Clone)]
pub struct Accessor(Rc<AccessorFn>);

impl Accessor {
    pub fn new(
        f: impl Fn(&Value, &mut Scope<'_>) -> Result<Value, BuildError> + 'static,
    ) -> Self {
        Self(Rc::new(f))
    }

    /// Accessor that ignores the build context.
    pub fn from_data(f: impl Fn(&Value) -> Value + 'static) -> Self {
        Self::new(move |data, _| Ok(f(data)))
    }

    pub fn call(&self, data: &Value, scope: &mut Scope<'_>) -> Result<Value, BuildError> {
        (self.0)(data, scope)
    }
}

impl PartialEq for Accessor {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Accessor(..)")
    }
}

/// Content captured from a live document that is inserted as-is instead of
/// being rebuilt from markup.
pub trait Foreign: fmt::Debug {
    fn materialize(&self, doc: &mut dyn Document) -> Result<Vec<NodeKey>, DocumentError>;
}

#[derive(Clone, Debug)]
pub struct ForeignRef(pub Rc<dyn Foreign>);

impl ForeignRef {
    pub fn new(foreign: impl Foreign + 'static) -> Self {
        Self(Rc::new(foreign))
    }
}

impl PartialEq for ForeignRef {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}
