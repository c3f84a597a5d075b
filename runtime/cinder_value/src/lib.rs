//! Cinder values - the data the storage layer holds references to.
//!
//! The storage crates never own the lifetime of a value: heap payloads are
//! shared through `Rc`, and guest objects live in an [`ObjectArena`] and are
//! referred to by [`ObjectId`]. Identity-keyed tables use these arena indices
//! directly instead of hashing values.

mod arena;
mod value;

pub use arena::{ModuleId, ObjectArena, ObjectId};
pub use value::Value;
