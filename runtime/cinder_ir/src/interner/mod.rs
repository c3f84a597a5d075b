//! String interner for binding names.
//!
//! Interning is O(1) amortized and lookup is a table index. The interner is
//! shared between interpreter instances through [`SharedInterner`], so the
//! table sits behind a `parking_lot::RwLock`.

use super::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// The table exceeded `u32::MAX` entries.
    Overflow { count: usize },
}

impl fmt::Display for InternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternError::Overflow { count } => write!(
                f,
                "interner exceeded capacity: {} strings, max is {}",
                count,
                u32::MAX
            ),
        }
    }
}

impl std::error::Error for InternError {}

struct InternTable {
    /// Map from string content to table index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents.
    strings: Vec<&'static str>,
}

impl InternTable {
    fn with_empty() -> Self {
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, 0);
        let mut strings = Vec::with_capacity(256);
        strings.push(empty);
        InternTable { map, strings }
    }
}

/// String interner for binding names.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    /// Create a new interner with the built-in global names pre-interned.
    pub fn new() -> Self {
        let interner = StringInterner {
            table: RwLock::new(InternTable::with_empty()),
        };
        interner.pre_intern_builtins();
        interner
    }

    /// Try to intern a string, returning its Name or an error on overflow.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        // Fast path: already interned
        if let Some(&index) = self.table.read().map.get(s) {
            return Ok(Name::from_raw(index));
        }

        let mut table = self.table.write();

        // Double-check after acquiring write lock
        if let Some(&index) = table.map.get(s) {
            return Ok(Name::from_raw(index));
        }

        let index = u32::try_from(table.strings.len()).map_err(|_| InternError::Overflow {
            count: table.strings.len(),
        })?;

        // Interned strings live as long as the process.
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        table.strings.push(leaked);
        table.map.insert(leaked, index);
        Ok(Name::from_raw(index))
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if the interner exceeds `u32::MAX` strings.
    /// Use `try_intern` for fallible interning.
    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{}", e))
    }

    /// Look up the string for a Name.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.table.read().strings[name.index()]
    }

    /// Look up a Name without interning. Returns `None` for unknown strings.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.table.read().map.get(s).copied().map(Name::from_raw)
    }

    /// Pre-intern the names of the built-in pseudo-globals.
    fn pre_intern_builtins(&self) {
        const BUILTINS: &[&str] = &[
            "$LOAD_PATH",
            "$:",
            "$LOADED_FEATURES",
            "$\"",
            "$$",
            "$PROGRAM_NAME",
            "$0",
            "$stdin",
            "$stdout",
            "$stderr",
            "$/",
            "$!",
            "$~",
            "$?",
        ];

        for name in BUILTINS {
            self.intern(name);
        }
    }

    /// Number of interned strings, including the empty string.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Check if the interner only holds the empty string.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for looking up interned string names.
///
/// Lets error rendering accept any interner handle without depending on
/// `StringInterner` directly.
pub trait StringLookup {
    /// Look up the string for an interned name.
    fn lookup(&self, name: Name) -> &str;
}

impl StringLookup for StringInterner {
    fn lookup(&self, name: Name) -> &str {
        StringInterner::lookup(self, name)
    }
}

impl StringLookup for SharedInterner {
    fn lookup(&self, name: Name) -> &str {
        self.0.lookup(name)
    }
}

/// Shared interner handle.
///
/// Cloning shares the same table, so every clone hands out identical
/// `Name`s for identical strings.
#[derive(Clone)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    /// Create a new shared interner.
    pub fn new() -> Self {
        SharedInterner(Arc::new(StringInterner::new()))
    }
}

impl Default for SharedInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Debug for SharedInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedInterner")
            .field("len", &self.0.len())
            .finish()
    }
}
