//! Per-access-site binding cache.
//!
//! An [`InlineCache`] remembers where one name lived the last time an access
//! site resolved it, following the protocol described on
//! [`NameStore`](crate::NameStore). Nothing cached is reused against a store
//! other than the one it was resolved in. Against that store:
//!
//! - a cached `Cell` or `VirtualCell` is trusted without looking at the
//!   store again;
//! - a cached raw value, or a cached absence, is trusted only while the
//!   store's version tag still equals the one captured with it.
//!
//! Deleting a boxed binding does not reach caches that already hold its
//! cell. Access sites that can observe a deletion call
//! [`InlineCache::invalidate`].

use std::fmt;

use cinder_ir::Name;
use cinder_value::Value;

use crate::errors::StoreResult;
use crate::name_store::{NameStore, Slot};
use crate::version::{StoreId, VersionTag};

struct CachedSlot<Cx> {
    store: StoreId,
    slot: Option<Slot<Cx>>,
    version: VersionTag,
}

impl<Cx> CachedSlot<Cx> {
    fn is_valid(&self, store: StoreId, current: VersionTag) -> bool {
        if self.store != store {
            return false;
        }
        match &self.slot {
            Some(slot) if slot.is_boxed() => true,
            _ => self.version == current,
        }
    }
}

/// Cached resolution of one name.
///
/// One cache may serve many stores, such as a site inside a method body
/// running against a fresh frame on each call; switching stores misses.
pub struct InlineCache<Cx = ()> {
    name: Name,
    cached: Option<CachedSlot<Cx>>,
    hits: u64,
    misses: u64,
}

impl<Cx> InlineCache<Cx> {
    /// An empty cache for `name`. The first access always misses.
    pub fn new(name: Name) -> Self {
        InlineCache {
            name,
            cached: None,
            hits: 0,
            misses: 0,
        }
    }

    pub fn name(&self) -> Name {
        self.name
    }

    /// Read the cached name, resolving against `store` when the guard fails.
    pub fn read(&mut self, store: &NameStore<Cx>, cx: &Cx) -> Option<Value> {
        self.resolve(store).map(|slot| slot.read(cx))
    }

    /// Write the cached name.
    ///
    /// Boxed slots are written directly. Anything else goes through
    /// [`NameStore::set`], whose shape change the next access will notice.
    pub fn write(&mut self, store: &NameStore<Cx>, cx: &Cx, value: Value) -> StoreResult {
        match self.resolve(store) {
            Some(Slot::Cell(cell)) => {
                cell.set(value);
                Ok(())
            }
            Some(Slot::Virtual(virt)) => virt.set(cx, self.name, value),
            Some(Slot::Value(_)) | None => store.set(cx, self.name, value),
        }
    }

    /// Drop the cached slot so the next access resolves again.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Returns `true` if the cache holds a boxed slot.
    pub fn is_boxed(&self) -> bool {
        matches!(&self.cached, Some(CachedSlot { slot: Some(slot), .. }) if slot.is_boxed())
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    fn resolve(&mut self, store: &NameStore<Cx>) -> Option<Slot<Cx>> {
        if let Some(cached) = &self.cached {
            if cached.is_valid(store.id(), store.current_version()) {
                self.hits += 1;
                return cached.slot.clone();
            }
        }

        self.misses += 1;
        let (slot, version) = store.raw_slot_with_version(self.name);
        self.cached = Some(CachedSlot {
            store: store.id(),
            slot: slot.clone(),
            version,
        });
        slot
    }
}

impl<Cx> fmt::Debug for InlineCache<Cx> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineCache")
            .field("name", &self.name)
            .field("boxed", &self.is_boxed())
            .field("hits", &self.hits)
            .field("misses", &self.misses)
            .finish()
    }
}
