//! SWIG documentation bridge generation.
//!
//! The Python bindings `%include` a `documentation.i` file with docstrings
//! derived from the C++ API. It is produced by running doxygen over the
//! sources (XML output) and converting the XML index with `doxy2swig.py`.
//!
//! Generation only happens when the bridge file does not exist yet. The
//! check is existence-only: an existing file is never refreshed, even when
//! the headers have changed since. Delete the file to force regeneration.

use std::path::PathBuf;

use serde::Serialize;

use crate::util::env::EnvSnapshot;
use crate::util::errors::{Phase, SetupError};
use crate::util::process::{run_checked, Executor, ProcessBuilder};

/// Where the documentation tools run and what they read and write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsOptions {
    /// Directory holding the Doxyfile; both tools run here.
    pub doc_dir: PathBuf,
    /// Bridge file whose existence skips generation.
    pub bridge_file: PathBuf,
    /// Doxygen executable.
    pub doxygen: PathBuf,
    /// Python interpreter running the converter.
    pub python: PathBuf,
    /// Converter script, relative to `doc_dir`.
    pub converter_script: String,
    /// Doxygen XML index, relative to `doc_dir`.
    pub xml_index: String,
    /// `bridge_file` as seen from `doc_dir`, passed to the converter.
    pub bridge_output: PathBuf,
}

/// What the generator did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocOutcome {
    /// The bridge file already existed.
    Skipped,
    /// Both tools ran successfully.
    Generated,
}

/// Runs doxygen and doxy2swig when the bridge file is missing.
#[derive(Debug, Clone, Copy)]
pub struct DocumentationGenerator<'a> {
    opts: &'a DocsOptions,
    env: &'a EnvSnapshot,
}

impl<'a> DocumentationGenerator<'a> {
    /// Create a generator running the tools with `env`.
    pub fn new(opts: &'a DocsOptions, env: &'a EnvSnapshot) -> Self {
        DocumentationGenerator { opts, env }
    }

    /// Whether the bridge file is missing.
    pub fn needs_generation(&self) -> bool {
        !self.opts.bridge_file.exists()
    }

    /// Generate the bridge file if it does not exist.
    pub fn run(&self, exec: &mut dyn Executor) -> Result<DocOutcome, SetupError> {
        if !self.needs_generation() {
            tracing::debug!(
                "{} exists, skipping documentation",
                self.opts.bridge_file.display()
            );
            return Ok(DocOutcome::Skipped);
        }

        self.generate(exec)?;
        Ok(DocOutcome::Generated)
    }

    /// Run doxygen, then the converter. The converter never runs when
    /// doxygen fails.
    pub fn generate(&self, exec: &mut dyn Executor) -> Result<(), SetupError> {
        tracing::info!("building documentation.i using doxygen and doxy2swig");

        let doxygen = ProcessBuilder::new(&self.opts.doxygen)
            .cwd(&self.opts.doc_dir)
            .env(self.env);
        run_checked(exec, Phase::DocExtract, &doxygen)?;

        let convert = ProcessBuilder::new(&self.opts.python)
            .arg(&self.opts.converter_script)
            .arg(&self.opts.xml_index)
            .arg(&self.opts.bridge_output)
            .cwd(&self.opts.doc_dir)
            .env(self.env);
        run_checked(exec, Phase::DocConvert, &convert)?;

        Ok(())
    }
}
