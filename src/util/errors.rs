//! Orchestration error types and diagnostics.

use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// External-process phase of the orchestration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Doxygen run producing the XML index.
    DocExtract,
    /// doxy2swig conversion producing the bridge file.
    DocConvert,
    /// CMake configure step.
    Configure,
    /// CMake build step.
    Build,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::DocExtract => write!(f, "documentation extraction"),
            Phase::DocConvert => write!(f, "documentation conversion"),
            Phase::Configure => write!(f, "CMake configure"),
            Phase::Build => write!(f, "CMake build"),
        }
    }
}

/// Error raised while orchestrating the extension build.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("failed to read version header `{}`", .path.display())]
    HeaderRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{phase} failed: `{command}` {}", describe_exit(.code))]
    ToolFailed {
        phase: Phase,
        command: String,
        code: Option<i32>,
    },

    #[error("failed to run `{program}` during {phase}")]
    ToolSpawn {
        phase: Phase,
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to create working directory `{}`", .path.display())]
    WorkDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

impl SetupError {
    /// The external-process phase this error belongs to, if any.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            SetupError::ToolFailed { phase, .. } | SetupError::ToolSpawn { phase, .. } => {
                Some(*phase)
            }
            SetupError::HeaderRead { .. } | SetupError::WorkDir { .. } => None,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            SetupError::HeaderRead { path, source } => {
                Diagnostic::error(format!("could not read version header: {}", source))
                    .with_location(path)
                    .with_suggestion(suggestions::HEADER_MISSING)
            }

            SetupError::ToolFailed {
                phase,
                command,
                code,
            } => {
                let mut diag = Diagnostic::error(format!("{} failed", phase))
                    .with_context(format!("command: {}", command))
                    .with_context(describe_exit(code));

                diag = match phase {
                    Phase::DocExtract | Phase::DocConvert => {
                        diag.with_suggestion(suggestions::DOCS_FAILED)
                    }
                    Phase::Configure | Phase::Build => {
                        diag.with_suggestion(suggestions::BUILD_FAILED)
                    }
                };

                diag
            }

            SetupError::ToolSpawn {
                phase,
                program,
                source,
            } => Diagnostic::error(format!("could not start `{}` for {}", program, phase))
                .with_context(source.to_string())
                .with_suggestion(suggestions::TOOL_MISSING),

            SetupError::WorkDir { path, source } => {
                Diagnostic::error(format!("could not create working directory: {}", source))
                    .with_location(path)
            }
        }
    }
}
