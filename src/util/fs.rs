//! Filesystem utilities.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Make a path absolute against the current directory without touching the
/// filesystem. Returns the path as-is if that fails.
pub fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        absolute_path(&base.join(path))
    }
}

/// Render a path with forward slashes only, as CMake expects on every host.
pub fn forward_slashes(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}
