//! Class variables shared across a class hierarchy.
//!
//! One [`ClassVariableTable`] per runtime, keyed by variable name only.
//! Hierarchies are never given separate namespaces: every access filters the
//! record for a name through the requesting module's ancestor chain, so two
//! unrelated hierarchies can use the same name without seeing each other.
//!
//! A record holds at most one entry per owning module. A write that finds a
//! visible entry updates it in place, which is what makes the variable one
//! shared slot for the whole hierarchy. A write that finds none first purges
//! entries owned by descendants of the writer; those would otherwise shadow
//! the new, more basal definition.
//!
//! There is no version tag here. Every access walks the current chain.

use rustc_hash::FxHashMap;
use tracing::debug;

use cinder_ir::Name;
use cinder_value::{ModuleId, Value};

use crate::hierarchy::Ancestry;

#[derive(Clone, Debug)]
struct ClassVarEntry {
    owner: ModuleId,
    value: Value,
}

/// Entries for one name, in order of first write.
#[derive(Clone, Debug, Default)]
struct ClassVarRecord {
    entries: Vec<ClassVarEntry>,
}

impl ClassVarRecord {
    /// Index of the entry visible from a chain, most specific ancestor first.
    fn visible_index(&self, ancestors: &[ModuleId]) -> Option<usize> {
        ancestors
            .iter()
            .find_map(|module| self.entries.iter().position(|e| e.owner == *module))
    }
}

/// Outcome of resolving a class variable from a module.
#[derive(Clone, Debug, PartialEq)]
pub enum ClassVarLookup {
    /// No module anywhere has written this name.
    Unused,
    /// Some hierarchy holds the name, but not one the module belongs to.
    NotVisible,
    /// The entry owned by `owner`, the most specific ancestor holding one.
    Visible { owner: ModuleId, value: Value },
}

impl ClassVarLookup {
    /// The value, when visible.
    pub fn into_value(self) -> Option<Value> {
        match self {
            ClassVarLookup::Visible { value, .. } => Some(value),
            ClassVarLookup::Unused | ClassVarLookup::NotVisible => None,
        }
    }
}

/// Name-keyed class variable storage.
#[derive(Clone, Debug, Default)]
pub struct ClassVariableTable {
    records: FxHashMap<Name, ClassVarRecord>,
}

impl ClassVariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `name` as seen from `module`.
    pub fn resolve<A: Ancestry + ?Sized>(
        &self,
        ancestry: &A,
        module: ModuleId,
        name: Name,
    ) -> ClassVarLookup {
        let Some(record) = self.records.get(&name) else {
            return ClassVarLookup::Unused;
        };
        let ancestors = ancestry.ancestors(module);
        match record.visible_index(&ancestors) {
            Some(index) => {
                let entry = &record.entries[index];
                ClassVarLookup::Visible {
                    owner: entry.owner,
                    value: entry.value.clone(),
                }
            }
            None => ClassVarLookup::NotVisible,
        }
    }

    /// Read `name` from `module`. `None` when unused or not visible.
    pub fn get<A: Ancestry + ?Sized>(
        &self,
        ancestry: &A,
        module: ModuleId,
        name: Name,
    ) -> Option<Value> {
        self.resolve(ancestry, module, name).into_value()
    }

    /// Write `name` from `module`.
    #[tracing::instrument(level = "trace", skip(self, ancestry, value))]
    pub fn set<A: Ancestry + ?Sized>(
        &mut self,
        ancestry: &A,
        module: ModuleId,
        name: Name,
        value: Value,
    ) {
        let record = self.records.entry(name).or_default();
        let ancestors = ancestry.ancestors(module);

        if let Some(index) = record.visible_index(&ancestors) {
            record.entries[index].value = value;
            return;
        }

        let before = record.entries.len();
        record
            .entries
            .retain(|entry| !ancestry.is_ancestor_of(module, entry.owner));
        let purged = before - record.entries.len();
        if purged > 0 {
            debug!(?name, ?module, purged, "removed shadowing class variable entries");
        }
        record.entries.push(ClassVarEntry {
            owner: module,
            value,
        });
    }

    /// Returns `true` if `name` is visible from `module`.
    pub fn is_defined<A: Ancestry + ?Sized>(
        &self,
        ancestry: &A,
        module: ModuleId,
        name: Name,
    ) -> bool {
        matches!(
            self.resolve(ancestry, module, name),
            ClassVarLookup::Visible { .. }
        )
    }

    /// Remove the entry `module` itself owns and return its value.
    ///
    /// Entries owned by ancestors are untouched, so the name may still be
    /// visible from `module` afterwards.
    pub fn remove(&mut self, module: ModuleId, name: Name) -> Option<Value> {
        let record = self.records.get_mut(&name)?;
        let index = record.entries.iter().position(|e| e.owner == module)?;
        let entry = record.entries.remove(index);
        if record.entries.is_empty() {
            self.records.remove(&name);
        }
        Some(entry.value)
    }

    /// Names visible from `module`, in interning order.
    pub fn visible_names<A: Ancestry + ?Sized>(&self, ancestry: &A, module: ModuleId) -> Vec<Name> {
        let ancestors = ancestry.ancestors(module);
        let mut names: Vec<Name> = self
            .records
            .iter()
            .filter(|(_, record)| record.visible_index(&ancestors).is_some())
            .map(|(name, _)| *name)
            .collect();
        names.sort_unstable();
        names
    }

    /// Number of names with at least one entry.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests;
