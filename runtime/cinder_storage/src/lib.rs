//! Cinder Storage - variable storage and cache invalidation.
//!
//! This crate holds every mutable named binding of a Cinder runtime in a
//! form compiled code can cache:
//!
//! - [`NameStore`]: per-scope and per-module attribute tables with a shape
//!   [`VersionTag`]; raw values are promoted into [`Cell`]s on their second
//!   write so hot bindings stop invalidating caches
//! - [`GlobalNameStore`]: the `$globals` table, with [`VirtualCell`]s for
//!   built-in pseudo-globals
//! - [`InlineCache`]: the per-access-site guard that trusts cached cells and
//!   revalidates cached raw values
//! - [`ClassVariableTable`]: `@@variables` resolved through a module's
//!   ancestor chain ([`Ancestry`], [`ModuleGraph`])
//! - [`SidecarStore`]: identity-keyed attributes for objects that cannot
//!   carry extra fields
//! - [`Runtime`]: one interpreter instance owning all of the above
//!
//! # Threading
//!
//! Tables use `Rc` and `RefCell` and are `!Send`. The host serializes access
//! to an interpreter instance; nothing here locks.
//!
//! # Tracing
//!
//! Shape changes, promotions, and class-variable shadow removal are traced.
//! Call [`init_tracing`] and set `RUST_LOG=cinder_storage=trace` to see them.

mod cell;
mod class_vars;
mod config;
mod errors;
mod hierarchy;
mod inline_cache;
mod name_store;
mod runtime;
mod sidecar;
mod version;

pub use cell::{Cell, Getter, Setter, VirtualCell};
pub use class_vars::{ClassVarLookup, ClassVariableTable};
pub use config::{RuntimeConfig, LOAD_PATH_VAR, PROGRAM_NAME_VAR};
pub use errors::{StoreError, StoreResult};
pub use hierarchy::{Ancestors, Ancestry, ModuleGraph, ModuleKind};
pub use inline_cache::InlineCache;
pub use name_store::{GlobalNameStore, NameStore, Slot};
pub use runtime::Runtime;
pub use sidecar::SidecarStore;
pub use version::{StoreId, VersionTag};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing output.
///
/// Safe to call more than once. Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
