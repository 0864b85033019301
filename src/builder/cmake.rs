//! CMake driver for the extension module.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::builder::plan::BuildConfiguration;
use crate::core::extension::ExtensionDescriptor;
use crate::core::version::VersionString;
use crate::util::env::{EnvOverlay, EnvSnapshot};
use crate::util::errors::{Phase, SetupError};
use crate::util::fs::ensure_dir;
use crate::util::process::{run_checked, Executor, ProcessBuilder};

/// Compiler-flags variable that carries the version into the build.
pub const CXXFLAGS: &str = "CXXFLAGS";

/// Preprocessor macro the C++ sources read the version from.
pub const VERSION_MACRO: &str = "VERSION_INFO";

/// Inputs shared by every extension built in one run.
#[derive(Debug, Clone, Copy)]
pub struct BuildInputs<'a> {
    /// Version embedded into the compiled module.
    pub version: &'a VersionString,
    /// Environment the external tools run with.
    pub env: &'a EnvSnapshot,
}

/// Builds extensions of one category.
pub trait ExtensionHandler {
    /// Build `ext` according to `config`.
    fn build_extension(
        &self,
        ext: &ExtensionDescriptor,
        config: &BuildConfiguration,
        inputs: &BuildInputs<'_>,
        exec: &mut dyn Executor,
    ) -> Result<(), SetupError>;
}

/// Out-of-tree CMake build: configure, then `cmake --build`.
#[derive(Debug, Clone)]
pub struct CMakeBuilder {
    cmake: PathBuf,
    work_dir: PathBuf,
}

impl CMakeBuilder {
    /// Create a builder running `cmake` inside `work_dir`.
    pub fn new(cmake: impl Into<PathBuf>, work_dir: impl Into<PathBuf>) -> Self {
        CMakeBuilder {
            cmake: cmake.into(),
            work_dir: work_dir.into(),
        }
    }

    /// Scratch directory the build runs in.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Run CMake configuration.
    fn configure(
        &self,
        ext: &ExtensionDescriptor,
        config: &BuildConfiguration,
        inputs: &BuildInputs<'_>,
        exec: &mut dyn Executor,
    ) -> Result<(), SetupError> {
        tracing::info!("BUILDING: {}", config.configure_args.join(" "));

        let env = inputs.env.with_overlay(&version_overlay(inputs.env, inputs.version));
        let cmd = ProcessBuilder::new(&self.cmake)
            .arg(ext.source_dir())
            .args(&config.configure_args)
            .cwd(&self.work_dir)
            .env(&env);

        run_checked(exec, Phase::Configure, &cmd)?;
        Ok(())
    }

    /// Run CMake build.
    fn compile(
        &self,
        config: &BuildConfiguration,
        inputs: &BuildInputs<'_>,
        exec: &mut dyn Executor,
    ) -> Result<(), SetupError> {
        tracing::info!("Building `{}` configuration", config.mode);

        // The version flag was captured into the CMake cache at configure time.
        let cmd = ProcessBuilder::new(&self.cmake)
            .arg("--build")
            .arg(".")
            .args(&config.build_args)
            .cwd(&self.work_dir)
            .env(inputs.env);

        run_checked(exec, Phase::Build, &cmd)?;
        Ok(())
    }
}

impl ExtensionHandler for CMakeBuilder {
    fn build_extension(
        &self,
        ext: &ExtensionDescriptor,
        config: &BuildConfiguration,
        inputs: &BuildInputs<'_>,
        exec: &mut dyn Executor,
    ) -> Result<(), SetupError> {
        ensure_dir(&self.work_dir).map_err(|source| SetupError::WorkDir {
            path: self.work_dir.clone(),
            source,
        })?;

        self.configure(ext, config, inputs, exec)?;
        self.compile(config, inputs, exec)
    }
}

/// Append the version definition to whatever `CXXFLAGS` the base environment
/// already carries.
pub fn version_overlay(base: &EnvSnapshot, version: &VersionString) -> EnvOverlay {
    let mut flags = base
        .get_os(CXXFLAGS)
        .map(OsStr::to_os_string)
        .unwrap_or_default();
    flags.push(format!(r#" -D{}=\"{}\""#, VERSION_MACRO, version));

    EnvOverlay::new().set(CXXFLAGS, flags)
}

/// Check if a directory contains a CMake project.
pub fn is_cmake_project(dir: &Path) -> bool {
    dir.join("CMakeLists.txt").exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::plan::{BuildMode, BuildPlanner};
    use crate::core::platform::HostOs;
    use crate::test_support::{MockProcessOutput, RecordingExecutor};
    use tempfile::TempDir;

    fn release_config() -> BuildConfiguration {
        BuildPlanner::new(BuildMode::Release, HostOs::Linux, false).plan(Path::new("/out"))
    }

    #[test]
    fn test_version_overlay_appends() {
        let version = VersionString::new("1.4.2");

        let overlay = version_overlay(&EnvSnapshot::empty(), &version);
        assert_eq!(
            overlay.get(CXXFLAGS),
            Some(OsStr::new(r#" -DVERSION_INFO=\"1.4.2\""#))
        );

        let base: EnvSnapshot = [(CXXFLAGS, "-O3 -march=native")].into_iter().collect();
        let overlay = version_overlay(&base, &version);
        assert_eq!(
            overlay.get(CXXFLAGS),
            Some(OsStr::new(r#"-O3 -march=native -DVERSION_INFO=\"1.4.2\""#))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_version_overlay_keeps_non_utf8_flags() {
        use std::os::unix::ffi::OsStrExt;

        let version = VersionString::new("1.4.2");
        let existing = OsStr::from_bytes(b"-I/opt/\xffinc -O2");
        let base: EnvSnapshot = [(OsStr::new(CXXFLAGS), existing)].into_iter().collect();

        let merged = base.with_overlay(&version_overlay(&base, &version));

        let mut expected = existing.as_bytes().to_vec();
        expected.extend_from_slice(br#" -DVERSION_INFO=\"1.4.2\""#);
        assert_eq!(merged.get_os(CXXFLAGS).map(OsStr::as_bytes), Some(&expected[..]));
    }

    #[test]
    fn test_configure_then_build() {
        let tmp = TempDir::new().unwrap();
        let work_dir = tmp.path().join("build").join("temp");
        let ext = ExtensionDescriptor::new("tttrlib", tmp.path());
        let version = VersionString::new("0.23.1");
        let env: EnvSnapshot = [("PATH", "/usr/bin")].into_iter().collect();
        let inputs = BuildInputs {
            version: &version,
            env: &env,
        };
        let mut exec = RecordingExecutor::succeeding();

        CMakeBuilder::new("cmake", &work_dir)
            .build_extension(&ext, &release_config(), &inputs, &mut exec)
            .unwrap();

        assert!(work_dir.is_dir());
        assert_eq!(exec.phases(), vec![Phase::Configure, Phase::Build]);

        let configure = &exec.calls()[0];
        assert_eq!(configure.get_args()[0].as_os_str(), ext.source_dir().as_os_str());
        let configure_args: Vec<_> = configure.get_args()[1..]
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(configure_args, release_config().configure_args);
        assert_eq!(configure.get_cwd(), Some(work_dir.as_path()));
        assert!(configure
            .get_env(CXXFLAGS)
            .unwrap()
            .contains(r#"-DVERSION_INFO=\"0.23.1\""#));
        assert_eq!(configure.get_env("PATH"), Some("/usr/bin"));

        let build = &exec.calls()[1];
        assert_eq!(
            build.display_command(),
            "cmake --build . --config Release -- -j8"
        );
        assert_eq!(build.get_cwd(), Some(work_dir.as_path()));
        assert!(build.get_env(CXXFLAGS).is_none());
    }

    #[test]
    fn test_failed_configure_skips_build() {
        let tmp = TempDir::new().unwrap();
        let ext = ExtensionDescriptor::new("tttrlib", tmp.path());
        let version = VersionString::new("0.23.1");
        let env = EnvSnapshot::empty();
        let inputs = BuildInputs {
            version: &version,
            env: &env,
        };
        let mut exec = RecordingExecutor::new();
        exec.expect_prefix("cmake", MockProcessOutput::failure(1, "CMake Error"));

        let err = CMakeBuilder::new("cmake", tmp.path().join("build"))
            .build_extension(&ext, &release_config(), &inputs, &mut exec)
            .unwrap_err();

        assert!(matches!(
            err,
            SetupError::ToolFailed {
                phase: Phase::Configure,
                code: Some(1),
                ..
            }
        ));
        assert_eq!(exec.calls().len(), 1);
    }

    #[test]
    fn test_is_cmake_project() {
        let tmp = TempDir::new().unwrap();

        assert!(!is_cmake_project(tmp.path()));

        std::fs::write(
            tmp.path().join("CMakeLists.txt"),
            "cmake_minimum_required(VERSION 3.10)",
        )
        .unwrap();

        assert!(is_cmake_project(tmp.path()));
    }
}
