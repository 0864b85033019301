//! Explicit process environment values.
//!
//! The ambient environment is captured once into an [`EnvSnapshot`] and then
//! passed around by reference. Changes for a particular child process are
//! expressed as an [`EnvOverlay`] and merged only when the process is spawned,
//! so the environment of this process is never mutated.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};

/// A copy of a process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<OsString, OsString>,
}

impl EnvSnapshot {
    /// Capture the environment of the current process.
    pub fn capture() -> Self {
        EnvSnapshot {
            vars: std::env::vars_os().collect(),
        }
    }

    /// An empty environment.
    pub fn empty() -> Self {
        EnvSnapshot::default()
    }

    /// Look up a variable. Non-UTF-8 values are reported as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_os(key).and_then(OsStr::to_str)
    }

    /// Look up a variable with its raw value.
    pub fn get_os(&self, key: &str) -> Option<&OsStr> {
        self.vars.get(OsStr::new(key)).map(OsString::as_os_str)
    }

    /// Check whether a variable is set, whatever its value.
    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(OsStr::new(key))
    }

    /// Iterate over all variables.
    pub fn iter(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.vars.iter().map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }

    /// Return a new snapshot with the overlay applied on top of this one.
    pub fn with_overlay(&self, overlay: &EnvOverlay) -> EnvSnapshot {
        let mut vars = self.vars.clone();
        for (key, value) in &overlay.vars {
            vars.insert(key.clone(), value.clone());
        }
        EnvSnapshot { vars }
    }
}

impl<K, V> FromIterator<(K, V)> for EnvSnapshot
where
    K: Into<OsString>,
    V: Into<OsString>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        EnvSnapshot {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Variables to set on top of a snapshot for one child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverlay {
    vars: BTreeMap<OsString, OsString>,
}

impl EnvOverlay {
    /// Create an empty overlay.
    pub fn new() -> Self {
        EnvOverlay::default()
    }

    /// Set (or overwrite) a variable.
    pub fn set(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Look up a variable set by this overlay.
    pub fn get(&self, key: &str) -> Option<&OsStr> {
        self.vars.get(OsStr::new(key)).map(OsString::as_os_str)
    }
}
