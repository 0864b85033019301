//! Test fixtures for common test scenarios.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Fixture for a tttrlib-like source tree.
#[derive(Debug, Clone)]
pub struct ProjectFixture {
    /// Files to create (path relative to project root -> content).
    pub files: HashMap<PathBuf, String>,
    /// Empty directories to create.
    pub dirs: Vec<PathBuf>,
}

impl ProjectFixture {
    /// A project whose info header defines the given version.
    pub fn with_version(version: &str) -> Self {
        ProjectFixture::with_header(info_header(version))
    }

    /// A project with arbitrary info header contents.
    pub fn with_header(header: impl Into<String>) -> Self {
        let mut files = HashMap::new();
        files.insert(PathBuf::from("include/info.h"), header.into());
        files.insert(
            PathBuf::from("CMakeLists.txt"),
            "cmake_minimum_required(VERSION 3.13)\nproject(tttrlib)\n".to_string(),
        );

        ProjectFixture {
            files,
            dirs: vec![PathBuf::from("doc")],
        }
    }

    /// Also create the documentation bridge file.
    pub fn with_bridge_file(mut self) -> Self {
        self.files.insert(
            PathBuf::from("ext/python/documentation.i"),
            "// generated by doxy2swig\n".to_string(),
        );
        self
    }

    /// Write the fixture into a fresh temporary directory.
    pub fn create(&self) -> TempDir {
        let tmp = TempDir::new().expect("failed to create temp dir");
        self.write_to(tmp.path());
        tmp
    }

    /// Write the fixture below `root`.
    pub fn write_to(&self, root: &Path) {
        for dir in &self.dirs {
            fs::create_dir_all(root.join(dir)).expect("failed to create fixture dir");
        }
        for (path, content) in &self.files {
            let full = root.join(path);
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).expect("failed to create fixture dir");
            }
            fs::write(&full, content).expect("failed to write fixture file");
        }
    }
}

/// Info header text defining `TTTRLIB_VERSION`.
pub fn info_header(version: &str) -> String {
    format!(
        r#"#ifndef TTTRLIB_INFO_H
#define TTTRLIB_INFO_H

#define TTTRLIB_VERSION "{}"
#define TTTRLIB_AUTHOR "tttrlib developers"

#endif // TTTRLIB_INFO_H
"#,
        version
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_layout() {
        let tmp = ProjectFixture::with_version("1.4.2").with_bridge_file().create();

        assert!(tmp.path().join("include/info.h").is_file());
        assert!(tmp.path().join("CMakeLists.txt").is_file());
        assert!(tmp.path().join("doc").is_dir());
        assert!(tmp.path().join("ext/python/documentation.i").is_file());
    }
}
