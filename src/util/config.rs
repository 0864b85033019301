//! Configuration file support.
//!
//! Two optional configuration file locations are read:
//! - Global: `~/.tttrlib-build/config.toml` - User-wide defaults
//! - Project: `.tttrlib-build/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. Every key is optional;
//! missing keys fall back to the standard tttrlib source layout.
//!
//! ```toml
//! [project]
//! header = "include/info.h"
//! build_temp = "build/temp"
//!
//! [tools]
//! cmake = "/opt/cmake/bin/cmake"
//! python = "python3"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::version::DEFAULT_VERSION_MACRO;

/// Name of the per-user and per-project configuration directory.
pub const CONFIG_DIR_NAME: &str = ".tttrlib-build";

/// Configuration file name inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Orchestrator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source layout and build directories
    pub project: ProjectConfig,

    /// Documentation generation
    pub docs: DocsConfig,

    /// External tool executables
    pub tools: ToolsConfig,
}

/// Source layout and build directories, relative to the project root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Header defining the version constant
    pub header: Option<PathBuf>,

    /// Name of the version constant
    pub version_macro: Option<String>,

    /// Extension module name
    pub module_name: Option<String>,

    /// Directory with the top-level CMakeLists.txt
    pub source_dir: Option<PathBuf>,

    /// Scratch directory for the CMake build
    pub build_temp: Option<PathBuf>,

    /// Output directory for the compiled module and SWIG glue
    pub ext_dir: Option<PathBuf>,
}

impl ProjectConfig {
    pub fn header(&self) -> &Path {
        self.header.as_deref().unwrap_or(Path::new("include/info.h"))
    }

    pub fn version_macro(&self) -> &str {
        self.version_macro.as_deref().unwrap_or(DEFAULT_VERSION_MACRO)
    }

    pub fn module_name(&self) -> &str {
        self.module_name.as_deref().unwrap_or("tttrlib")
    }

    pub fn source_dir(&self) -> &Path {
        self.source_dir.as_deref().unwrap_or(Path::new("."))
    }

    pub fn build_temp(&self) -> &Path {
        self.build_temp.as_deref().unwrap_or(Path::new("build/temp"))
    }

    pub fn ext_dir(&self) -> &Path {
        self.ext_dir.as_deref().unwrap_or(Path::new("build/lib"))
    }

    fn merge(&mut self, other: ProjectConfig) {
        self.header = other.header.or(self.header.take());
        self.version_macro = other.version_macro.or(self.version_macro.take());
        self.module_name = other.module_name.or(self.module_name.take());
        self.source_dir = other.source_dir.or(self.source_dir.take());
        self.build_temp = other.build_temp.or(self.build_temp.take());
        self.ext_dir = other.ext_dir.or(self.ext_dir.take());
    }
}

/// Documentation generation settings.
///
/// `doc_dir` and `bridge_file` are relative to the project root. The converter
/// script and XML index are relative to `doc_dir`, where the tools run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    pub doc_dir: Option<PathBuf>,
    pub bridge_file: Option<PathBuf>,
    pub converter_script: Option<String>,
    pub xml_index: Option<String>,
}

impl DocsConfig {
    pub fn doc_dir(&self) -> &Path {
        self.doc_dir.as_deref().unwrap_or(Path::new("doc"))
    }

    pub fn bridge_file(&self) -> &Path {
        self.bridge_file
            .as_deref()
            .unwrap_or(Path::new("ext/python/documentation.i"))
    }

    pub fn converter_script(&self) -> &str {
        self.converter_script.as_deref().unwrap_or("doxy2swig.py")
    }

    pub fn xml_index(&self) -> &str {
        self.xml_index.as_deref().unwrap_or("./_build/xml/index.xml")
    }

    fn merge(&mut self, other: DocsConfig) {
        self.doc_dir = other.doc_dir.or(self.doc_dir.take());
        self.bridge_file = other.bridge_file.or(self.bridge_file.take());
        self.converter_script = other.converter_script.or(self.converter_script.take());
        self.xml_index = other.xml_index.or(self.xml_index.take());
    }
}

/// External tool executables (names are looked up in PATH).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub cmake: Option<PathBuf>,
    pub doxygen: Option<PathBuf>,
    pub python: Option<PathBuf>,
}

impl ToolsConfig {
    pub fn cmake(&self) -> &Path {
        self.cmake.as_deref().unwrap_or(Path::new("cmake"))
    }

    pub fn doxygen(&self) -> &Path {
        self.doxygen.as_deref().unwrap_or(Path::new("doxygen"))
    }

    pub fn python(&self) -> &Path {
        self.python.as_deref().unwrap_or(Path::new("python"))
    }

    fn merge(&mut self, other: ToolsConfig) {
        self.cmake = other.cmake.or(self.cmake.take());
        self.doxygen = other.doxygen.or(self.doxygen.take());
        self.python = other.python.or(self.python.take());
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        self.project.merge(other.project);
        self.docs.merge(other.docs);
        self.tools.merge(other.tools);
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.tttrlib-build/config.toml)
/// 2. Global config (~/.tttrlib-build/config.toml)
/// 3. Defaults
///
/// A file that exists but cannot be parsed is an error.
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Result<Config> {
    let mut config = Config::default();

    if let Some(global_path) = global_path.filter(|p| p.exists()) {
        config.merge(Config::load(global_path)?);
    }

    if project_path.exists() {
        config.merge(Config::load(project_path)?);
    }

    Ok(config)
}

/// Get the global config directory (~/.tttrlib-build).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR_NAME))
}

/// Get the global config path (~/.tttrlib-build/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Get the project config path (.tttrlib-build/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
}
