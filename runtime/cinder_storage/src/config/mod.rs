//! Runtime configuration.
//!
//! Defaults suit embedding. [`RuntimeConfig::from_env`] layers the process
//! environment on top:
//!
//! | Variable | Effect |
//! |----------|--------|
//! | `CINDER_PROGRAM_NAME` | initial value of `$0` / `$PROGRAM_NAME` |
//! | `CINDER_LOAD_PATH` | `:`-separated initial `$LOAD_PATH` |

/// Environment variable naming the program.
pub const PROGRAM_NAME_VAR: &str = "CINDER_PROGRAM_NAME";

/// Environment variable holding the initial load path.
pub const LOAD_PATH_VAR: &str = "CINDER_LOAD_PATH";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Initial value of `$0`.
    pub program_name: String,
    /// Initial entries of `$LOAD_PATH`.
    pub load_path: Vec<String>,
    /// Install the built-in virtual globals (`$LOAD_PATH`, `$0`, ...).
    pub builtin_globals: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig {
            program_name: String::from("cinder"),
            load_path: Vec::new(),
            builtin_globals: true,
        }
    }
}

impl RuntimeConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(name) = lookup(PROGRAM_NAME_VAR).filter(|n| !n.is_empty()) {
            config.program_name = name;
        }
        if let Some(paths) = lookup(LOAD_PATH_VAR) {
            config.load_path = paths
                .split(':')
                .filter(|p| !p.is_empty())
                .map(str::to_owned)
                .collect();
        }
        config
    }

    #[must_use]
    pub fn with_program_name(mut self, name: impl Into<String>) -> Self {
        self.program_name = name.into();
        self
    }

    #[must_use]
    pub fn with_load_path(mut self, path: impl Into<String>) -> Self {
        self.load_path.push(path.into());
        self
    }

    /// Skip the built-in virtual globals.
    #[must_use]
    pub fn without_builtin_globals(mut self) -> Self {
        self.builtin_globals = false;
        self
    }
}

#[cfg(test)]
mod tests;
