//! Extension module descriptors.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::util::fs::absolute_path;

/// A native extension built from a whole source directory.
///
/// Unlike an ordinary compiled target there is no list of source files;
/// discovering compilation units is left to CMake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionDescriptor {
    name: String,
    source_dir: PathBuf,
}

impl ExtensionDescriptor {
    /// Declare an extension. The source directory is made absolute.
    pub fn new(name: impl Into<String>, source_dir: impl AsRef<Path>) -> Self {
        ExtensionDescriptor {
            name: name.into(),
            source_dir: absolute_path(source_dir.as_ref()),
        }
    }

    /// Module name of the extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory containing the top-level CMakeLists.txt.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }
}
