//! Out-of-band attributes for objects that cannot hold them.
//!
//! Two levels, both created lazily: a domain (an attribute such as
//! `frozen` or `tainted`) maps object identities to boxes. The inner key is
//! the object's arena index, never its guest-level equality, so two objects
//! that compare equal still get separate boxes.
//!
//! Entries live until the collector reports the object gone through
//! [`SidecarStore::forget`].

use rustc_hash::FxHashMap;
use tracing::debug;

use cinder_ir::Name;
use cinder_value::{ObjectId, Value};

use crate::cell::Cell;

/// Identity-keyed attribute boxes, grouped by domain.
#[derive(Debug, Default)]
pub struct SidecarStore {
    domains: FxHashMap<Name, FxHashMap<ObjectId, Cell>>,
}

impl SidecarStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The box for `(domain, object)`, created holding `default` on first
    /// touch. Every later call returns the same box.
    pub fn entry(&mut self, domain: Name, object: ObjectId, default: Value) -> Cell {
        self.domain_mut(domain)
            .entry(object)
            .or_insert_with(|| Cell::new(default))
            .clone()
    }

    /// Current value for `(domain, object)`, initialising it to `default`
    /// on first touch.
    pub fn get(&mut self, domain: Name, object: ObjectId, default: Value) -> Value {
        self.entry(domain, object, default).get()
    }

    /// Write `(domain, object)`. A missing box is created first.
    pub fn set(&mut self, domain: Name, object: ObjectId, value: Value) {
        self.entry(domain, object, Value::Nil).set(value);
    }

    /// Returns `true` if `(domain, object)` has been touched.
    pub fn contains(&self, domain: Name, object: ObjectId) -> bool {
        self.domains
            .get(&domain)
            .is_some_and(|values| values.contains_key(&object))
    }

    /// Drop every entry of a reclaimed object. Returns how many were dropped.
    pub fn forget(&mut self, object: ObjectId) -> usize {
        let dropped = self
            .domains
            .values_mut()
            .filter_map(|values| values.remove(&object))
            .count();
        if dropped > 0 {
            debug!(?object, dropped, "dropped sidecar entries");
        }
        dropped
    }

    /// Total number of entries across all domains.
    pub fn len(&self) -> usize {
        self.domains.values().map(|values| values.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn domain_mut(&mut self, domain: Name) -> &mut FxHashMap<ObjectId, Cell> {
        self.domains.entry(domain).or_insert_with(|| {
            debug!(?domain, "created sidecar domain");
            FxHashMap::default()
        })
    }
}
