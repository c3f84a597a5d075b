//! Arena handles.
//!
//! Objects and modules are addressed by their index in the owning arena.
//! Two handles are the same object exactly when their indices are equal,
//! which is what identity-keyed tables hash on.

use std::fmt;

use crate::Value;

/// Handle to an object in an [`ObjectArena`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ObjectId(u32);

impl ObjectId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        ObjectId(raw)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

/// Handle to a class or module.
///
/// Allocated by whatever owns the class hierarchy.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ModuleId(u32);

impl ModuleId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        ModuleId(raw)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModuleId({})", self.0)
    }
}

/// Append-only arena of guest objects.
///
/// Each object carries a single payload value. Slots are never reused, so a
/// handle cannot come to mean a different object.
#[derive(Debug, Default)]
pub struct ObjectArena {
    objects: Vec<Value>,
}

impl ObjectArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new object holding `payload`.
    ///
    /// # Panics
    /// Panics if the arena exceeds `u32::MAX` objects.
    pub fn alloc(&mut self, payload: Value) -> ObjectId {
        let index = u32::try_from(self.objects.len())
            .unwrap_or_else(|_| panic!("object arena exceeded {} objects", u32::MAX));
        self.objects.push(payload);
        ObjectId(index)
    }

    /// The payload of `id`, if it was allocated here.
    pub fn payload(&self, id: ObjectId) -> Option<&Value> {
        self.objects.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
