//! Shape version tags.

use std::fmt;
use std::num::NonZeroU64;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TAG: AtomicU64 = AtomicU64::new(1);
static NEXT_STORE: AtomicU64 = AtomicU64::new(1);

fn mint(counter: &AtomicU64) -> NonZeroU64 {
    let raw = counter.fetch_add(1, Ordering::Relaxed);
    // The counter starts at 1 and would need 2^64 mints to wrap.
    NonZeroU64::new(raw).unwrap_or(NonZeroU64::MIN)
}

/// Identity token for the current shape of a storage table.
///
/// Tags support equality only. Every call to [`VersionTag::fresh`] returns a
/// tag that is unequal to every tag handed out before it, across all tables.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct VersionTag(NonZeroU64);

impl VersionTag {
    /// Mint a tag no other table has seen.
    pub fn fresh() -> Self {
        VersionTag(mint(&NEXT_TAG))
    }
}

/// Identity of one storage table, fixed for its whole lifetime.
///
/// Copies made with `deep_copy` get their own id.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct StoreId(NonZeroU64);

impl StoreId {
    pub fn fresh() -> Self {
        StoreId(mint(&NEXT_STORE))
    }
}

impl fmt::Debug for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StoreId#{}", self.0)
    }
}

impl fmt::Debug for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VersionTag#{}", self.0)
    }
}
