//! Cinder IR - identifiers shared across the runtime.
//!
//! Every binding name the storage layer sees (local names, `$globals`,
//! `@@class_variables`, sidecar domains) is interned once and passed around
//! as a 32-bit [`Name`]. Equality and hashing are O(1) and never touch the
//! string contents.

mod interner;
mod name;

pub use interner::{InternError, SharedInterner, StringInterner, StringLookup};
pub use name::Name;
