//! Boxed binding locations.
//!
//! A [`Cell`] is a value slot whose identity outlives changes to its
//! contents. A [`VirtualCell`] computes its value through a getter and
//! optionally accepts writes through a setter. Both are cheap to clone;
//! clones refer to the same location.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use cinder_ir::Name;
use cinder_value::Value;

use crate::errors::{StoreError, StoreResult};

/// Mutable box holding one value.
#[derive(Clone)]
pub struct Cell(Rc<RefCell<Value>>);

impl Cell {
    pub fn new(value: Value) -> Self {
        Cell(Rc::new(RefCell::new(value)))
    }

    /// Current contents.
    #[inline]
    pub fn get(&self) -> Value {
        self.0.borrow().clone()
    }

    /// Replace the contents. The cell's identity is unchanged.
    #[inline]
    pub fn set(&self, value: Value) {
        *self.0.borrow_mut() = value;
    }

    /// Returns `true` if both handles refer to the same box.
    #[inline]
    pub fn ptr_eq(a: &Cell, b: &Cell) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cell").field(&*self.0.borrow()).finish()
    }
}

/// Computes the value of a virtual binding from the runtime context.
pub type Getter<Cx> = Box<dyn Fn(&Cx) -> Value>;

/// Accepts a write to a virtual binding. Receives the binding name the
/// write went through, which differs between aliases sharing one cell.
pub type Setter<Cx> = Box<dyn Fn(&Cx, Name, Value) -> StoreResult>;

struct VirtualInner<Cx> {
    getter: Getter<Cx>,
    setter: Option<Setter<Cx>>,
}

/// Binding backed by a getter and an optional setter instead of stored data.
pub struct VirtualCell<Cx>(Rc<VirtualInner<Cx>>);

impl<Cx> VirtualCell<Cx> {
    /// A binding that rejects every write.
    pub fn read_only(getter: impl Fn(&Cx) -> Value + 'static) -> Self {
        VirtualCell(Rc::new(VirtualInner {
            getter: Box::new(getter),
            setter: None,
        }))
    }

    /// A binding whose writes are routed to `setter`.
    pub fn read_write(
        getter: impl Fn(&Cx) -> Value + 'static,
        setter: impl Fn(&Cx, Name, Value) -> StoreResult + 'static,
    ) -> Self {
        VirtualCell(Rc::new(VirtualInner {
            getter: Box::new(getter),
            setter: Some(Box::new(setter)),
        }))
    }

    #[inline]
    pub fn get(&self, cx: &Cx) -> Value {
        (self.0.getter)(cx)
    }

    /// Write through the setter.
    ///
    /// Fails with [`StoreError::ReadOnlyBinding`] naming `name` when there
    /// is no setter.
    pub fn set(&self, cx: &Cx, name: Name, value: Value) -> StoreResult {
        match &self.0.setter {
            Some(setter) => setter(cx, name, value),
            None => Err(StoreError::ReadOnlyBinding { name }),
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.0.setter.is_none()
    }

    /// Returns `true` if both handles refer to the same binding.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl<Cx> Clone for VirtualCell<Cx> {
    fn clone(&self) -> Self {
        VirtualCell(Rc::clone(&self.0))
    }
}

impl<Cx> fmt::Debug for VirtualCell<Cx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualCell")
            .field("read_only", &self.is_read_only())
            .finish_non_exhaustive()
    }
}
