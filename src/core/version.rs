//! Version discovery from the C++ info header.
//!
//! The library declares its version as a preprocessor constant:
//!
//! ```c
//! #define TTTRLIB_VERSION "0.21.9"
//! ```
//!
//! The value is treated as an opaque token. It is not parsed as semver.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::util::errors::SetupError;

/// Version reported when the header has no version line.
pub const DEFAULT_VERSION: &str = "0.0.0";

/// Name of the version constant in the info header.
pub const DEFAULT_VERSION_MACRO: &str = "TTTRLIB_VERSION";

const DEFINE_TOKEN: &str = "#define";

/// An opaque version token such as `1.4.2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VersionString(String);

impl VersionString {
    /// Wrap a version token.
    pub fn new(version: impl Into<String>) -> Self {
        VersionString(version.into())
    }

    /// Get the version as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for VersionString {
    fn default() -> Self {
        VersionString::new(DEFAULT_VERSION)
    }
}

impl fmt::Display for VersionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VersionString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Read the version from a header file.
///
/// Falls back to [`DEFAULT_VERSION`] when no line defines `macro_name`; only a
/// missing or unreadable file is an error.
pub fn read_version(header: &Path, macro_name: &str) -> Result<VersionString, SetupError> {
    let contents = fs::read_to_string(header).map_err(|source| SetupError::HeaderRead {
        path: header.to_path_buf(),
        source,
    })?;

    let version = parse_version(&contents, macro_name);
    tracing::debug!("read version {} from {}", version, header.display());
    Ok(version)
}

/// Extract the version from header contents.
///
/// The first line containing both `#define` and `macro_name` wins; its last
/// whitespace-separated token, with surrounding double quotes removed, is the
/// version.
pub fn parse_version(contents: &str, macro_name: &str) -> VersionString {
    contents
        .lines()
        .find(|line| line.contains(DEFINE_TOKEN) && line.contains(macro_name))
        .and_then(|line| line.split_whitespace().last())
        .map(|token| VersionString::new(token.trim_matches('"')))
        .unwrap_or_default()
}
