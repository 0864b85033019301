//! CMake argument planning.
//!
//! All host- and environment-dependent branching for the CMake invocations
//! lives in [`BuildPlanner::plan`], which is a pure function of the build
//! mode, the host OS, the presence of the package prefix variable, and the
//! extension output directory.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::core::platform::HostOs;
use crate::util::env::EnvSnapshot;
use crate::util::fs::forward_slashes;

/// Environment variable naming a conda-style third-party installation prefix.
pub const PREFIX_ENV_VAR: &str = "CONDA_PREFIX";

/// Job count handed to the native build tool on POSIX hosts.
pub const PARALLEL_JOBS: usize = 8;

/// CMake generator used on Windows hosts.
pub const WINDOWS_GENERATOR: &str = "Visual Studio 14 2015 Win64";

/// Debug or release build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// Pick the mode from a `--debug` style flag.
    pub fn from_debug_flag(debug: bool) -> Self {
        if debug {
            BuildMode::Debug
        } else {
            BuildMode::Release
        }
    }

    /// CMake build type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Debug => "Debug",
            BuildMode::Release => "Release",
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arguments for one configure + build cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildConfiguration {
    /// Build type.
    pub mode: BuildMode,
    /// Arguments following the source directory in the configure call.
    pub configure_args: Vec<String>,
    /// Arguments following `--build .` in the build call.
    pub build_args: Vec<String>,
}

/// Decides CMake arguments for a host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPlanner {
    mode: BuildMode,
    host: HostOs,
    prefix_present: bool,
}

impl BuildPlanner {
    /// Create a planner from explicit inputs.
    pub fn new(mode: BuildMode, host: HostOs, prefix_present: bool) -> Self {
        BuildPlanner {
            mode,
            host,
            prefix_present,
        }
    }

    /// Create a planner, testing the environment for [`PREFIX_ENV_VAR`].
    pub fn from_env(mode: BuildMode, host: HostOs, env: &EnvSnapshot) -> Self {
        if let Some(notice) = prefix_notice(&host, env) {
            tracing::info!("{}", notice);
        }
        BuildPlanner::new(mode, host, env.contains(PREFIX_ENV_VAR))
    }

    /// Plan the configure and build arguments for an extension whose
    /// compiled module must land in `ext_dir`.
    pub fn plan(&self, ext_dir: &Path) -> BuildConfiguration {
        let ext_dir = forward_slashes(ext_dir);
        let build_type = self.mode.as_str();

        let mut configure_args = vec![
            format!("-DCMAKE_LIBRARY_OUTPUT_DIRECTORY={}", ext_dir),
            format!("-DCMAKE_SWIG_OUTDIR={}", ext_dir),
            format!("-DCMAKE_BUILD_TYPE={}", build_type),
        ];
        let mut build_args = vec!["--config".to_string(), build_type.to_string()];

        if self.host.is_windows() {
            configure_args.push("-DBUILD_PYTHON_INTERFACE=ON".to_string());
            configure_args.push(format!(
                "-DCMAKE_LIBRARY_OUTPUT_DIRECTORY_{}={}",
                build_type.to_uppercase(),
                ext_dir
            ));
            configure_args.push(format!("-G{}", WINDOWS_GENERATOR));
        } else {
            // Only turns on Boost discovery diagnostics; the prefix is not passed.
            if self.prefix_present {
                configure_args.push("-DBoost_DEBUG=ON".to_string());
                configure_args.push("-DBoost_DETAILED_FAILURE_MESSAGE=ON".to_string());
            }
            build_args.push("--".to_string());
            build_args.push(format!("-j{}", PARALLEL_JOBS));
        }

        BuildConfiguration {
            mode: self.mode,
            configure_args,
            build_args,
        }
    }
}

/// The prefix log line, emitted on POSIX hosts only.
pub fn prefix_notice(host: &HostOs, env: &EnvSnapshot) -> Option<String> {
    if host.is_windows() {
        return None;
    }
    env.get(PREFIX_ENV_VAR)
        .map(|prefix| format!("Conda prefix is: {}", prefix))
}
