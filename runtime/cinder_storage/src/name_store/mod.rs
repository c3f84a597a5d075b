//! Name-keyed binding tables with shape versioning.
//!
//! A [`NameStore`] maps names to [`Slot`]s and carries a [`VersionTag`]
//! describing its shape. The tag is replaced exactly when a name is added,
//! a name is removed, or a raw value is promoted into a [`Cell`]. Writes
//! that land in an existing `Cell` or `VirtualCell` leave the tag alone.
//!
//! # Cache Protocol
//!
//! [`NameStore::raw_slot_with_version`] hands out the slot for a name
//! together with the tag observed at that moment. A caller that keeps the
//! result must:
//! - revalidate a raw (unboxed) result, or an absent result, by comparing the
//!   captured tag with [`NameStore::current_version`];
//! - reuse a `Cell` or `VirtualCell` result without revalidation. Promotion
//!   is one-way, so a boxed binding never goes back to being raw.
//!
//! [`InlineCache`](crate::InlineCache) implements this protocol.
//!
//! # Interior Mutability
//!
//! All operations take `&self`. Getters and setters of virtual bindings may
//! re-enter the store that holds them, so no borrow of the table is held
//! while user code runs.

use std::cell::RefCell;
use std::fmt;

use rustc_hash::FxHashMap;
use tracing::trace;

use cinder_ir::Name;
use cinder_value::Value;

use crate::cell::{Cell, VirtualCell};
use crate::errors::StoreResult;
use crate::version::{StoreId, VersionTag};

/// What a name is bound to.
pub enum Slot<Cx> {
    /// Value stored inline in the table.
    Value(Value),
    /// Value stored in an independently addressable box.
    Cell(Cell),
    /// Value computed by a getter.
    Virtual(VirtualCell<Cx>),
}

impl<Cx> Slot<Cx> {
    /// Dereference the slot.
    pub fn read(&self, cx: &Cx) -> Value {
        match self {
            Slot::Value(value) => value.clone(),
            Slot::Cell(cell) => cell.get(),
            Slot::Virtual(virt) => virt.get(cx),
        }
    }

    /// Returns `true` for `Cell` and `Virtual` slots, whose identity stays
    /// valid across shape changes.
    pub fn is_boxed(&self) -> bool {
        !matches!(self, Slot::Value(_))
    }

    /// Returns `true` if both slots are the same box.
    ///
    /// Raw values have no location and never compare as the same slot.
    pub fn same_location(&self, other: &Self) -> bool {
        match (self, other) {
            (Slot::Cell(a), Slot::Cell(b)) => Cell::ptr_eq(a, b),
            (Slot::Virtual(a), Slot::Virtual(b)) => VirtualCell::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<Cx> Clone for Slot<Cx> {
    fn clone(&self) -> Self {
        match self {
            Slot::Value(value) => Slot::Value(value.clone()),
            Slot::Cell(cell) => Slot::Cell(cell.clone()),
            Slot::Virtual(virt) => Slot::Virtual(virt.clone()),
        }
    }
}

impl<Cx> fmt::Debug for Slot<Cx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Slot::Cell(cell) => fmt::Debug::fmt(cell, f),
            Slot::Virtual(virt) => fmt::Debug::fmt(virt, f),
        }
    }
}

struct Table<Cx> {
    values: FxHashMap<Name, Slot<Cx>>,
    version: VersionTag,
}

impl<Cx> Table<Cx> {
    fn mutated(&mut self) {
        self.version = VersionTag::fresh();
    }
}

/// Where a write to an existing name has to go.
enum WriteTarget<Cx> {
    Cell(Cell),
    Virtual(VirtualCell<Cx>),
    Promote,
    Insert,
}

/// General-purpose binding table.
///
/// `Cx` is the context virtual getters and setters receive. Stores without
/// virtual bindings (scopes, instance tables) use the default `()`.
pub struct NameStore<Cx = ()> {
    id: StoreId,
    table: RefCell<Table<Cx>>,
}

impl<Cx> NameStore<Cx> {
    pub fn new() -> Self {
        NameStore {
            id: StoreId::fresh(),
            table: RefCell::new(Table {
                values: FxHashMap::default(),
                version: VersionTag::fresh(),
            }),
        }
    }

    /// Identity of this store. Never changes, unlike the version tag.
    #[inline]
    pub fn id(&self) -> StoreId {
        self.id
    }

    /// The tag describing the current shape.
    #[inline]
    pub fn current_version(&self) -> VersionTag {
        self.table.borrow().version
    }

    /// The slot bound to `name` (if any) and the tag at call time.
    pub fn raw_slot_with_version(&self, name: Name) -> (Option<Slot<Cx>>, VersionTag) {
        let table = self.table.borrow();
        (table.values.get(&name).cloned(), table.version)
    }

    /// Look up `name`. `None` means the name is unbound.
    pub fn get(&self, cx: &Cx, name: Name) -> Option<Value> {
        let slot = self.table.borrow().values.get(&name).cloned()?;
        Some(slot.read(cx))
    }

    /// Bind `name` to `value`.
    ///
    /// - boxed slot: write through it, shape unchanged;
    /// - raw slot: promote to a new `Cell` holding `value`, shape changes;
    /// - unbound: store `value` raw, shape changes.
    pub fn set(&self, cx: &Cx, name: Name, value: Value) -> StoreResult {
        let target = match self.table.borrow().values.get(&name) {
            Some(Slot::Cell(cell)) => WriteTarget::Cell(cell.clone()),
            Some(Slot::Virtual(virt)) => WriteTarget::Virtual(virt.clone()),
            Some(Slot::Value(_)) => WriteTarget::Promote,
            None => WriteTarget::Insert,
        };

        match target {
            WriteTarget::Cell(cell) => {
                cell.set(value);
                Ok(())
            }
            WriteTarget::Virtual(virt) => virt.set(cx, name, value),
            WriteTarget::Promote => {
                let mut table = self.table.borrow_mut();
                table.values.insert(name, Slot::Cell(Cell::new(value)));
                table.mutated();
                trace!(?name, version = ?table.version, "promoted binding to cell");
                Ok(())
            }
            WriteTarget::Insert => {
                let mut table = self.table.borrow_mut();
                table.values.insert(name, Slot::Value(value));
                table.mutated();
                trace!(?name, version = ?table.version, "added binding");
                Ok(())
            }
        }
    }

    /// Remove `name`. Returns `true` (and changes shape) only if it was bound.
    pub fn delete(&self, name: Name) -> bool {
        let mut table = self.table.borrow_mut();
        if table.values.remove(&name).is_none() {
            return false;
        }
        table.mutated();
        trace!(?name, version = ?table.version, "removed binding");
        true
    }

    pub fn contains(&self, name: Name) -> bool {
        self.table.borrow().values.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.table.borrow().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.borrow().values.is_empty()
    }

    /// Bound names, in interning order.
    pub fn names(&self) -> Vec<Name> {
        let mut names: Vec<Name> = self.table.borrow().values.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// An independent copy of this store.
    ///
    /// Cells are duplicated so writes to the copy never reach the original.
    /// Virtual bindings are shared; their getters and setters are immutable.
    /// The copy starts with its own version tag.
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        let table = self.table.borrow();
        let values = table
            .values
            .iter()
            .map(|(name, slot)| {
                let slot = match slot {
                    Slot::Cell(cell) => Slot::Cell(Cell::new(cell.get())),
                    other => other.clone(),
                };
                (*name, slot)
            })
            .collect();
        NameStore {
            id: StoreId::fresh(),
            table: RefCell::new(Table {
                values,
                version: VersionTag::fresh(),
            }),
        }
    }

    /// Bind `name` to a virtual cell, replacing whatever was there.
    fn install_virtual(&self, name: Name, cell: VirtualCell<Cx>) {
        let mut table = self.table.borrow_mut();
        table.values.insert(name, Slot::Virtual(cell));
        table.mutated();
        trace!(?name, version = ?table.version, "defined virtual binding");
    }
}

impl<Cx> Default for NameStore<Cx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Cx> fmt::Debug for NameStore<Cx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table.borrow();
        f.debug_struct("NameStore")
            .field("id", &self.id)
            .field("len", &table.values.len())
            .field("version", &table.version)
            .finish()
    }
}

/// The process-wide table of `$globals`.
///
/// Behaves like a [`NameStore`] and additionally accepts virtual bindings
/// for built-in pseudo-globals.
pub struct GlobalNameStore<Cx> {
    store: NameStore<Cx>,
}

impl<Cx> GlobalNameStore<Cx> {
    pub fn new() -> Self {
        GlobalNameStore {
            store: NameStore::new(),
        }
    }

    /// Bind `name` to a getter/setter pair. Always changes shape.
    pub fn define_virtual(&self, name: Name, cell: VirtualCell<Cx>) {
        self.store.install_virtual(name, cell);
    }
}

impl<Cx> std::ops::Deref for GlobalNameStore<Cx> {
    type Target = NameStore<Cx>;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

impl<Cx> Default for GlobalNameStore<Cx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Cx> fmt::Debug for GlobalNameStore<Cx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GlobalNameStore").field(&self.store).finish()
    }
}
