//! Packaging driver.
//!
//! Composition root of a build run. In order it:
//!
//! 1. reads the version from the info header (exactly once),
//! 2. generates the SWIG documentation bridge if it is missing,
//! 3. declares the extension module and the package metadata,
//! 4. registers the CMake builder as the `build_ext` handler,
//! 5. plans and builds every declared extension.
//!
//! The run moves through
//! `Start → DocCheck → {DocSkip | DocGenerate} → Configure → Build → Done`.
//! Any failure ends in `Failed`, which is terminal; nothing is retried.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::builder::cmake::{is_cmake_project, BuildInputs, CMakeBuilder, ExtensionHandler};
use crate::builder::plan::{BuildConfiguration, BuildMode, BuildPlanner};
use crate::core::extension::ExtensionDescriptor;
use crate::core::metadata::PackageMetadata;
use crate::core::version::{read_version, VersionString};
use crate::ops::docs::{DocOutcome, DocsOptions, DocumentationGenerator};
use crate::util::config::Config;
use crate::util::context::GlobalContext;
use crate::util::errors::{Phase, SetupError};
use crate::util::fs::resolve_against;
use crate::util::process::Executor;

/// Command category the extension builder is registered for.
pub const BUILD_EXT: &str = "build_ext";

/// Progress of a run through the orchestration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Start,
    DocCheck,
    DocSkip,
    DocGenerate,
    Configure,
    Build,
    Done,
    Failed,
}

/// Resolved inputs of a run. All paths are absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupOptions {
    /// Header defining the version constant.
    pub header: PathBuf,
    /// Name of the version constant.
    pub version_macro: String,
    /// Extension module name.
    pub module_name: String,
    /// Directory with the top-level CMakeLists.txt.
    pub source_dir: PathBuf,
    /// CMake working directory.
    pub build_temp: PathBuf,
    /// Output directory for the compiled module.
    pub ext_dir: PathBuf,
    /// CMake executable.
    pub cmake: PathBuf,
    /// Documentation generation.
    pub docs: DocsOptions,
    /// Debug or release.
    pub mode: BuildMode,
    /// Stop after planning; don't run CMake.
    pub plan_only: bool,
}

impl SetupOptions {
    /// Resolve a configuration against the project root. Builds in release
    /// mode unless changed afterwards.
    pub fn from_config(config: &Config, root: &Path) -> Self {
        let project = &config.project;
        let doc_dir = resolve_against(root, config.docs.doc_dir());
        let bridge_file = resolve_against(root, config.docs.bridge_file());
        let bridge_output =
            pathdiff::diff_paths(&bridge_file, &doc_dir).unwrap_or_else(|| bridge_file.clone());

        SetupOptions {
            header: resolve_against(root, project.header()),
            version_macro: project.version_macro().to_string(),
            module_name: project.module_name().to_string(),
            source_dir: resolve_against(root, project.source_dir()),
            build_temp: resolve_against(root, project.build_temp()),
            ext_dir: resolve_against(root, project.ext_dir()),
            cmake: config.tools.cmake().to_path_buf(),
            docs: DocsOptions {
                doc_dir,
                bridge_file,
                doxygen: config.tools.doxygen().to_path_buf(),
                python: config.tools.python().to_path_buf(),
                converter_script: config.docs.converter_script().to_string(),
                xml_index: config.docs.xml_index().to_string(),
                bridge_output,
            },
            mode: BuildMode::Release,
            plan_only: false,
        }
    }
}

/// Declared contents of the package.
pub struct Distribution {
    /// Static metadata.
    pub metadata: PackageMetadata,
    /// Extensions to build.
    pub ext_modules: Vec<ExtensionDescriptor>,
    cmdclass: BTreeMap<&'static str, Box<dyn ExtensionHandler>>,
}

impl Distribution {
    /// Declare a distribution with no handlers registered.
    pub fn new(metadata: PackageMetadata, ext_modules: Vec<ExtensionDescriptor>) -> Self {
        Distribution {
            metadata,
            ext_modules,
            cmdclass: BTreeMap::new(),
        }
    }

    /// Register the handler for a command category, replacing any previous one.
    pub fn register(&mut self, command: &'static str, handler: Box<dyn ExtensionHandler>) {
        self.cmdclass.insert(command, handler);
    }

    /// Handler registered for a command category.
    pub fn handler(&self, command: &str) -> Option<&dyn ExtensionHandler> {
        self.cmdclass.get(command).map(|h| h.as_ref())
    }
}

impl fmt::Debug for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Distribution")
            .field("metadata", &self.metadata)
            .field("ext_modules", &self.ext_modules)
            .field("cmdclass", &self.cmdclass.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct SetupReport {
    /// Version read from the header.
    pub version: VersionString,
    /// What the documentation step did.
    pub docs: DocOutcome,
    /// Planned CMake arguments, one per extension.
    pub configurations: Vec<BuildConfiguration>,
    /// Package metadata carrying the same version.
    pub metadata: PackageMetadata,
    /// Stages passed through, in order.
    pub stages: Vec<Stage>,
}

/// Runs documentation generation and the extension build.
#[derive(Debug)]
pub struct PackagingDriver<'a> {
    ctx: &'a GlobalContext,
    opts: &'a SetupOptions,
    stages: Vec<Stage>,
}

impl<'a> PackagingDriver<'a> {
    /// Create a driver.
    pub fn new(ctx: &'a GlobalContext, opts: &'a SetupOptions) -> Self {
        PackagingDriver {
            ctx,
            opts,
            stages: Vec::new(),
        }
    }

    /// Stages passed through by the last run, ending in `Failed` if it failed.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Run the whole orchestration.
    pub fn run(&mut self, exec: &mut dyn Executor) -> Result<SetupReport, SetupError> {
        self.stages.clear();
        self.stages.push(Stage::Start);

        match self.run_stages(exec) {
            Ok(report) => Ok(report),
            Err(err) => {
                self.stages.push(Stage::Failed);
                Err(err)
            }
        }
    }

    fn run_stages(&mut self, exec: &mut dyn Executor) -> Result<SetupReport, SetupError> {
        let opts = self.opts;

        let version = read_version(&opts.header, &opts.version_macro)?;
        tracing::info!("{} VERSION: {}", opts.module_name, version);

        let docs = self.document(exec)?;

        let dist = self.distribution(version.clone());
        let configurations = self.build_ext(&dist, &version, exec)?;

        self.stages.push(Stage::Done);

        Ok(SetupReport {
            version,
            docs,
            configurations,
            metadata: dist.metadata,
            stages: self.stages.clone(),
        })
    }

    fn document(&mut self, exec: &mut dyn Executor) -> Result<DocOutcome, SetupError> {
        self.stages.push(Stage::DocCheck);

        let generator = DocumentationGenerator::new(&self.opts.docs, self.ctx.env());
        if !generator.needs_generation() {
            self.stages.push(Stage::DocSkip);
            return Ok(DocOutcome::Skipped);
        }

        self.stages.push(Stage::DocGenerate);
        generator.generate(exec)?;
        Ok(DocOutcome::Generated)
    }

    /// Declare the package: one extension, its metadata, and the CMake
    /// builder as `build_ext` handler.
    pub fn distribution(&self, version: VersionString) -> Distribution {
        let ext = ExtensionDescriptor::new(&self.opts.module_name, &self.opts.source_dir);

        let mut dist = Distribution::new(PackageMetadata::tttrlib(version), vec![ext]);
        dist.register(
            BUILD_EXT,
            Box::new(CMakeBuilder::new(&self.opts.cmake, &self.opts.build_temp)),
        );
        dist
    }

    fn build_ext(
        &mut self,
        dist: &Distribution,
        version: &VersionString,
        exec: &mut dyn Executor,
    ) -> Result<Vec<BuildConfiguration>, SetupError> {
        let Some(handler) = dist.handler(BUILD_EXT) else {
            tracing::warn!("no `{}` handler registered, nothing to build", BUILD_EXT);
            return Ok(Vec::new());
        };

        let inputs = BuildInputs {
            version,
            env: self.ctx.env(),
        };
        let mut configurations = Vec::with_capacity(dist.ext_modules.len());

        for ext in &dist.ext_modules {
            if !is_cmake_project(ext.source_dir()) {
                tracing::warn!("no CMakeLists.txt in {}", ext.source_dir().display());
            }

            let planner =
                BuildPlanner::from_env(self.opts.mode, self.ctx.host().clone(), self.ctx.env());
            let config = planner.plan(&self.opts.ext_dir);

            if self.opts.plan_only {
                configurations.push(config);
                continue;
            }

            self.stages.push(Stage::Configure);
            if let Err(err) = handler.build_extension(ext, &config, &inputs, exec) {
                if err.phase() == Some(Phase::Build) {
                    self.stages.push(Stage::Build);
                }
                return Err(err);
            }
            self.stages.push(Stage::Build);

            configurations.push(config);
        }

        Ok(configurations)
    }
}
