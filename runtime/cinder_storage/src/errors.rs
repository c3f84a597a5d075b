//! Errors raised by the storage layer.
//!
//! Lookups report absence through `Option` and never fail. The only error
//! the tables raise themselves is a write to a read-only virtual binding;
//! setters installed by the runtime may also reject a value they cannot
//! store.

use cinder_ir::{Name, StringLookup};

/// Result of a write to a binding.
pub type StoreResult<T = ()> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Write through a virtual binding that has no setter.
    #[error("binding {name:?} is a read-only variable")]
    ReadOnlyBinding { name: Name },
    /// A virtual binding's setter refused the value's type.
    #[error("binding {name:?} expects {expected}, got {got}")]
    TypeMismatch {
        name: Name,
        expected: &'static str,
        got: &'static str,
    },
}

impl StoreError {
    /// The binding the error is about.
    pub fn name(&self) -> Name {
        match self {
            StoreError::ReadOnlyBinding { name } | StoreError::TypeMismatch { name, .. } => *name,
        }
    }

    /// Render the guest-facing message with the binding name resolved.
    pub fn describe<L: StringLookup + ?Sized>(&self, lookup: &L) -> String {
        match self {
            StoreError::ReadOnlyBinding { name } => {
                format!("{} is a read-only variable", lookup.lookup(*name))
            }
            StoreError::TypeMismatch {
                name,
                expected,
                got,
            } => format!(
                "value of {} must be {} (got {})",
                lookup.lookup(*name),
                expected,
                got
            ),
        }
    }
}
