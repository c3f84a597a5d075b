//! Runtime values.
//!
//! Heap payloads are created through the factory methods on [`Value`] so the
//! sharing strategy stays an implementation detail of this module.

use std::fmt;
use std::rc::Rc;

use cinder_ir::Name;

use crate::{ModuleId, ObjectId};

/// Runtime value.
///
/// Equality follows the guest language for data variants (two strings with
/// the same contents are equal) and identity for `Object` and `Module`.
#[derive(Clone, Default)]
pub enum Value {
    /// The nil value.
    #[default]
    Nil,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Immutable string contents.
    Str(Rc<str>),
    /// Interned symbol.
    Symbol(Name),
    /// Ordered list of values.
    List(Rc<Vec<Value>>),
    /// Reference to an arena-allocated object.
    Object(ObjectId),
    /// Reference to a class or module.
    Module(ModuleId),
}

impl Value {
    /// Integer factory.
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    /// String factory.
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::Str(s.into())
    }

    /// List factory.
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::new(items))
    }

    /// Returns `true` for `nil`.
    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Borrow the contents of a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the items of a list value.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// The arena handle of an object value.
    ///
    /// Only objects have identity; every other variant returns `None`.
    pub fn identity(&self) -> Option<ObjectId> {
        match self {
            Value::Object(id) => Some(*id),
            _ => None,
        }
    }

    /// Guest-facing type name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "NilClass",
            Value::Bool(true) => "TrueClass",
            Value::Bool(false) => "FalseClass",
            Value::Int(_) => "Integer",
            Value::Float(_) => "Float",
            Value::Str(_) => "String",
            Value::Symbol(_) => "Symbol",
            Value::List(_) => "Array",
            Value::Object(_) => "Object",
            Value::Module(_) => "Module",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b) || a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Module(a), Value::Module(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "Nil"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Symbol(name) => write!(f, "Symbol({name:?})"),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Object(id) => write!(f, "Object({})", id.index()),
            Value::Module(id) => write!(f, "Module({})", id.index()),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}
