//! Global context for orchestration runs.
//!
//! Captures, once per process, everything the orchestration reads from the
//! outside world: the project root, the environment, and the host OS. Later
//! stages receive these values from the context instead of querying the
//! process again.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::core::platform::HostOs;
use crate::util::config::{self, Config};
use crate::util::env::EnvSnapshot;
use crate::util::fs::absolute_path;

/// Global context containing configuration inputs and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Root of the tttrlib source tree
    project_root: PathBuf,

    /// Environment captured at startup
    env: EnvSnapshot,

    /// Host operating system
    host: HostOs,

    /// Whether to use verbose output
    verbose: bool,
}

impl GlobalContext {
    /// Create a context for the project in `project_dir`, or in the current
    /// directory when none is given.
    pub fn new(project_dir: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        let project_root = match project_dir {
            Some(dir) => absolute_path(&cwd.join(dir)),
            None => cwd,
        };

        if !project_root.is_dir() {
            bail!("project directory not found: {}", project_root.display());
        }

        Ok(GlobalContext {
            project_root,
            env: EnvSnapshot::capture(),
            host: HostOs::current(),
            verbose: false,
        })
    }

    /// Replace the captured environment.
    pub fn with_env(mut self, env: EnvSnapshot) -> Self {
        self.env = env;
        self
    }

    /// Replace the detected host OS.
    pub fn with_host(mut self, host: HostOs) -> Self {
        self.host = host;
        self
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Get the project root directory.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the environment captured at startup.
    pub fn env(&self) -> &EnvSnapshot {
        &self.env
    }

    /// Get the host OS.
    pub fn host(&self) -> &HostOs {
        &self.host
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Get the project configuration file path.
    pub fn project_config_path(&self) -> PathBuf {
        config::project_config_path(&self.project_root)
    }

    /// Load the merged global and project configuration.
    pub fn load_config(&self) -> Result<Config> {
        let global = config::global_config_path();
        config::load_config(global.as_deref(), &self.project_config_path())
    }
}
