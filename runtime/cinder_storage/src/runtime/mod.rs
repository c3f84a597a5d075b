//! The runtime instance that owns every storage table.
//!
//! [`Runtime`] is the context virtual globals are evaluated against, and the
//! one place the class-variable table meets the module graph it filters by.
//! Nothing here is process-global: two runtimes share nothing except, if
//! the embedder chooses, an interner.

use std::cell::RefCell;
use std::fmt;

use tracing::debug;

use cinder_ir::{Name, SharedInterner};
use cinder_value::{ModuleId, ObjectArena, ObjectId, Value};

use crate::cell::VirtualCell;
use crate::class_vars::{ClassVarLookup, ClassVariableTable};
use crate::config::RuntimeConfig;
use crate::errors::{StoreError, StoreResult};
use crate::hierarchy::ModuleGraph;
use crate::name_store::GlobalNameStore;
use crate::sidecar::SidecarStore;

/// One interpreter instance's variable storage.
pub struct Runtime {
    config: RuntimeConfig,
    interner: SharedInterner,
    modules: ModuleGraph,
    objects: ObjectArena,
    globals: GlobalNameStore<Runtime>,
    class_vars: ClassVariableTable,
    sidecar: SidecarStore,
    /// Backing state of the built-in virtual globals.
    load_path: RefCell<Vec<Value>>,
    loaded_features: RefCell<Vec<Value>>,
    program_name: RefCell<Value>,
}

impl Runtime {
    pub fn new(config: RuntimeConfig) -> Self {
        Self::with_interner(config, SharedInterner::new())
    }

    /// A runtime interning names into an existing table.
    pub fn with_interner(config: RuntimeConfig, interner: SharedInterner) -> Self {
        let load_path = config
            .load_path
            .iter()
            .map(|p| Value::string(p.as_str()))
            .collect();
        let program_name = Value::string(config.program_name.as_str());
        let runtime = Runtime {
            interner,
            modules: ModuleGraph::new(),
            objects: ObjectArena::new(),
            globals: GlobalNameStore::new(),
            class_vars: ClassVariableTable::new(),
            sidecar: SidecarStore::new(),
            load_path: RefCell::new(load_path),
            loaded_features: RefCell::new(Vec::new()),
            program_name: RefCell::new(program_name),
            config,
        };
        if runtime.config.builtin_globals {
            runtime.install_builtin_globals();
        }
        runtime
    }

    fn install_builtin_globals(&self) {
        let load_path = VirtualCell::read_only(|rt: &Runtime| {
            Value::list(rt.load_path.borrow().clone())
        });
        self.define_virtual("$LOAD_PATH", load_path.clone());
        self.define_virtual("$:", load_path);

        let loaded_features = VirtualCell::read_only(|rt: &Runtime| {
            Value::list(rt.loaded_features.borrow().clone())
        });
        self.define_virtual("$LOADED_FEATURES", loaded_features.clone());
        self.define_virtual("$\"", loaded_features);

        self.define_virtual(
            "$$",
            VirtualCell::read_only(|_: &Runtime| Value::int(i64::from(std::process::id()))),
        );

        let program_name = VirtualCell::read_write(
            |rt: &Runtime| rt.program_name.borrow().clone(),
            |rt: &Runtime, name, value| match value {
                Value::Str(_) => {
                    *rt.program_name.borrow_mut() = value;
                    Ok(())
                }
                other => Err(StoreError::TypeMismatch {
                    name,
                    expected: "String",
                    got: other.type_name(),
                }),
            },
        );
        self.define_virtual("$PROGRAM_NAME", program_name.clone());
        self.define_virtual("$0", program_name);

        debug!(count = self.globals.len(), "installed built-in globals");
    }

    /// Install a virtual global under `name`.
    pub fn define_virtual(&self, name: &str, cell: VirtualCell<Runtime>) {
        self.globals.define_virtual(self.interner.intern(name), cell);
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    pub fn globals(&self) -> &GlobalNameStore<Runtime> {
        &self.globals
    }

    pub fn modules(&self) -> &ModuleGraph {
        &self.modules
    }

    pub fn modules_mut(&mut self) -> &mut ModuleGraph {
        &mut self.modules
    }

    pub fn class_vars(&self) -> &ClassVariableTable {
        &self.class_vars
    }

    pub fn objects(&self) -> &ObjectArena {
        &self.objects
    }

    // Globals

    /// Read a global. `None` for an unbound name.
    pub fn global_get(&self, name: Name) -> Option<Value> {
        self.globals.get(self, name)
    }

    pub fn global_set(&self, name: Name, value: Value) -> StoreResult {
        self.globals.set(self, name, value)
    }

    pub fn global_delete(&self, name: Name) -> bool {
        self.globals.delete(name)
    }

    /// Append to `$LOAD_PATH`.
    pub fn add_load_path(&self, path: &str) {
        self.load_path.borrow_mut().push(Value::string(path));
    }

    /// Record a feature as loaded (`$LOADED_FEATURES`).
    pub fn add_loaded_feature(&self, feature: &str) {
        self.loaded_features
            .borrow_mut()
            .push(Value::string(feature));
    }

    // Class hierarchy and class variables

    pub fn define_class(&mut self, name: &str, superclass: Option<ModuleId>) -> ModuleId {
        let name = self.interner.intern(name);
        self.modules.define_class(name, superclass)
    }

    pub fn define_module(&mut self, name: &str) -> ModuleId {
        let name = self.interner.intern(name);
        self.modules.define_module(name)
    }

    pub fn include_module(&mut self, target: ModuleId, module: ModuleId) -> bool {
        self.modules.include(target, module)
    }

    pub fn class_var_resolve(&self, module: ModuleId, name: Name) -> ClassVarLookup {
        self.class_vars.resolve(&self.modules, module, name)
    }

    pub fn class_var_get(&self, module: ModuleId, name: Name) -> Option<Value> {
        self.class_vars.get(&self.modules, module, name)
    }

    pub fn class_var_set(&mut self, module: ModuleId, name: Name, value: Value) {
        self.class_vars.set(&self.modules, module, name, value);
    }

    pub fn class_var_defined(&self, module: ModuleId, name: Name) -> bool {
        self.class_vars.is_defined(&self.modules, module, name)
    }

    pub fn class_var_remove(&mut self, module: ModuleId, name: Name) -> Option<Value> {
        self.class_vars.remove(module, name)
    }

    pub fn class_var_names(&self, module: ModuleId) -> Vec<Name> {
        self.class_vars.visible_names(&self.modules, module)
    }

    // Objects and sidecar attributes

    pub fn alloc_object(&mut self, payload: Value) -> ObjectId {
        self.objects.alloc(payload)
    }

    pub fn sidecar_get(&mut self, domain: Name, object: ObjectId, default: Value) -> Value {
        self.sidecar.get(domain, object, default)
    }

    pub fn sidecar_set(&mut self, domain: Name, object: ObjectId, value: Value) {
        self.sidecar.set(domain, object, value);
    }

    /// Collector hook: `object` is unreachable.
    pub fn object_reclaimed(&mut self, object: ObjectId) -> usize {
        self.sidecar.forget(object)
    }

    /// Render a storage error with names resolved.
    pub fn describe_error(&self, error: &StoreError) -> String {
        error.describe(&self.interner)
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(RuntimeConfig::default())
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("globals", &self.globals)
            .field("modules", &self.modules.len())
            .field("class_vars", &self.class_vars.len())
            .field("sidecar", &self.sidecar.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
