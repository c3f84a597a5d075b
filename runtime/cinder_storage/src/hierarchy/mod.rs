//! Class and module hierarchy.
//!
//! Class-variable resolution only needs one question answered: what is the
//! ancestor chain of a module, most specific first. [`Ancestry`] is that
//! question; [`ModuleGraph`] is the runtime's answer to it.

use smallvec::SmallVec;

use cinder_ir::Name;
use cinder_value::ModuleId;

/// Ancestor chain, most specific first. Starts with the module itself.
pub type Ancestors = SmallVec<[ModuleId; 8]>;

/// Source of ancestor chains.
pub trait Ancestry {
    /// The chain of `module`, beginning with `module` itself.
    fn ancestors(&self, module: ModuleId) -> Ancestors;

    /// Returns `true` if `ancestor` appears in the chain of `module`.
    /// Every module is its own ancestor.
    fn is_ancestor_of(&self, ancestor: ModuleId, module: ModuleId) -> bool {
        self.ancestors(module).contains(&ancestor)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ModuleKind {
    /// Has at most one superclass.
    Class,
    /// Mixed into classes and other modules.
    Module,
}

#[derive(Clone, Debug)]
struct ModuleData {
    name: Name,
    kind: ModuleKind,
    superclass: Option<ModuleId>,
    /// Directly included modules, most recently included first.
    included: Vec<ModuleId>,
    /// Direct subclasses and includers.
    descendants: Vec<ModuleId>,
}

/// Arena of classes and modules.
#[derive(Clone, Debug, Default)]
pub struct ModuleGraph {
    modules: Vec<ModuleData>,
}

impl ModuleGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a class inheriting from `superclass`.
    pub fn define_class(&mut self, name: Name, superclass: Option<ModuleId>) -> ModuleId {
        let superclass = superclass.filter(|s| s.index() < self.modules.len());
        let id = self.push(name, ModuleKind::Class, superclass);
        if let Some(data) = superclass.and_then(|s| self.modules.get_mut(s.index())) {
            data.descendants.push(id);
        }
        id
    }

    /// Define a module.
    pub fn define_module(&mut self, name: Name) -> ModuleId {
        self.push(name, ModuleKind::Module, None)
    }

    /// Include `module` into `target`.
    ///
    /// Returns `false` and changes nothing when `module` is a class, is
    /// already an ancestor of `target`, would form a cycle, or when either
    /// handle is unknown.
    pub fn include(&mut self, target: ModuleId, module: ModuleId) -> bool {
        if self.kind(module) != Some(ModuleKind::Module)
            || self.is_ancestor_of(module, target)
            || self.is_ancestor_of(target, module)
        {
            return false;
        }
        let Some(data) = self.modules.get_mut(target.index()) else {
            return false;
        };
        data.included.insert(0, module);
        if let Some(included) = self.modules.get_mut(module.index()) {
            included.descendants.push(target);
        }
        true
    }

    pub fn name(&self, module: ModuleId) -> Option<Name> {
        self.modules.get(module.index()).map(|m| m.name)
    }

    pub fn kind(&self, module: ModuleId) -> Option<ModuleKind> {
        self.modules.get(module.index()).map(|m| m.kind)
    }

    pub fn superclass(&self, module: ModuleId) -> Option<ModuleId> {
        self.modules.get(module.index()).and_then(|m| m.superclass)
    }

    /// Direct subclasses and includers of `module`.
    pub fn descendants(&self, module: ModuleId) -> &[ModuleId] {
        self.modules
            .get(module.index())
            .map(|m| m.descendants.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    fn push(&mut self, name: Name, kind: ModuleKind, superclass: Option<ModuleId>) -> ModuleId {
        let index = u32::try_from(self.modules.len())
            .unwrap_or_else(|_| panic!("module graph exceeded {} modules", u32::MAX));
        self.modules.push(ModuleData {
            name,
            kind,
            superclass,
            included: Vec::new(),
            descendants: Vec::new(),
        });
        ModuleId::from_raw(index)
    }

    /// Push `module` and, depth first, everything it includes.
    fn push_with_includes(&self, module: ModuleId, chain: &mut Ancestors) {
        let mut pending: SmallVec<[ModuleId; 8]> = SmallVec::new();
        pending.push(module);
        while let Some(current) = pending.pop() {
            if chain.contains(&current) {
                continue;
            }
            chain.push(current);
            if let Some(data) = self.modules.get(current.index()) {
                // Reverse so the most recent include is popped first.
                pending.extend(data.included.iter().rev().copied());
            }
        }
    }
}

impl Ancestry for ModuleGraph {
    /// The class, its includes, then the same for each superclass.
    fn ancestors(&self, module: ModuleId) -> Ancestors {
        let mut chain = Ancestors::new();
        let mut current = Some(module);
        while let Some(class) = current {
            self.push_with_includes(class, &mut chain);
            current = self.superclass(class);
        }
        chain
    }
}
