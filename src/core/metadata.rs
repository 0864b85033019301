//! Static package metadata published alongside the extension.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::version::VersionString;

/// Package name of the Python distribution.
pub const PACKAGE_NAME: &str = "tttrlib";

/// Declarative metadata of the distribution.
///
/// Everything except the version is fixed; the version comes from the info
/// header so the package and the compiled module always agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageMetadata {
    pub name: String,
    pub version: VersionString,
    pub description: String,
    pub long_description: String,
    pub license: String,
    pub author: String,
    pub author_email: String,
    pub install_requires: Vec<String>,
    pub setup_requires: Vec<String>,
    pub zip_safe: bool,
    pub classifiers: Vec<String>,
}

impl PackageMetadata {
    /// Metadata of the tttrlib distribution at the given version.
    pub fn tttrlib(version: VersionString) -> Self {
        PackageMetadata {
            name: PACKAGE_NAME.to_string(),
            version,
            description: "tttrlib read/process/write TTTR data".to_string(),
            long_description: "tttrlib is a C++ library with Python wrappers to read, write \
                               and process time-tagged time resolved data."
                .to_string(),
            license: "BSD 3-Clause License".to_string(),
            author: "Thomas-Otavio Peulen".to_string(),
            author_email: "thomas@peulen.xyz".to_string(),
            install_requires: vec!["numpy".to_string()],
            setup_requires: vec!["setuptools".to_string()],
            zip_safe: false,
            classifiers: [
                "Development Status :: 2 - Pre-Alpha",
                "Intended Audience :: Science/Research",
                "License :: OSI Approved :: MIT License",
                "Natural Language :: English",
                "Operating System :: Microsoft :: Windows",
                "Operating System :: POSIX :: Linux",
                "Programming Language :: Python",
                "Topic :: Scientific/Engineering",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize package metadata")
    }

    /// Serialize as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize package metadata")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_carried_through() {
        let meta = PackageMetadata::tttrlib(VersionString::new("1.4.2"));
        assert_eq!(meta.version.as_str(), "1.4.2");
        assert_eq!(meta.install_requires, vec!["numpy"]);
        assert!(!meta.zip_safe);
    }

    #[test]
    fn test_serialized_forms() {
        let meta = PackageMetadata::tttrlib(VersionString::new("1.4.2"));

        let json = meta.to_json().unwrap();
        assert!(json.contains("\"version\": \"1.4.2\""));
        assert!(json.contains("\"name\": \"tttrlib\""));

        let toml = meta.to_toml().unwrap();
        assert!(toml.contains("version = \"1.4.2\""));
        assert!(toml.contains("Topic :: Scientific/Engineering"));
    }
}
