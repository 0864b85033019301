//! Subprocess execution utilities.
//!
//! Every external tool is described by a [`ProcessBuilder`] and run through an
//! [`Executor`]. The executor reports a typed [`ProcessOutcome`];
//! [`run_checked`] is the single place where a non-zero exit turns into a
//! [`SetupError::ToolFailed`].

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output};

use crate::util::env::EnvSnapshot;
use crate::util::errors::{Phase, SetupError};

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<OsString>,
    env: Option<EnvSnapshot>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            env: None,
            cwd: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_os_string()));
        self
    }

    /// Run with exactly this environment instead of inheriting ours.
    pub fn env(mut self, env: &EnvSnapshot) -> Self {
        self.env = Some(env.clone());
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Get the program path.
    pub fn get_program(&self) -> &Path {
        &self.program
    }

    /// Get the arguments.
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Get the working directory.
    pub fn get_cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Look up a variable in the explicit environment, if one was set.
    pub fn get_env(&self, key: &str) -> Option<&str> {
        self.env.as_ref().and_then(|env| env.get(key))
    }

    /// Build the Command.
    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref env) = self.env {
            cmd.env_clear();
            cmd.envs(env.iter());
        }

        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }

        cmd
    }

    /// Execute with inherited standard streams and wait for completion.
    pub fn status(&self) -> io::Result<ExitStatus> {
        self.build_command().status()
    }

    /// Execute and capture stdout and stderr.
    pub fn output(&self) -> io::Result<Output> {
        self.build_command().output()
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }
}

/// What happened to the standard streams of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamOutput {
    /// Streams went straight to our terminal.
    Inherited,
    /// Streams were collected.
    Captured { stdout: String, stderr: String },
}

/// Result of running an external process to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Exit code, `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    /// Standard stream handling.
    pub output: StreamOutput,
}

impl ProcessOutcome {
    /// Build an outcome from an exit status with inherited streams.
    pub fn from_status(status: ExitStatus) -> Self {
        ProcessOutcome {
            exit_code: status.code(),
            output: StreamOutput::Inherited,
        }
    }

    /// Whether the process exited with status zero.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs external processes.
///
/// Implemented by [`SystemExecutor`] for real runs and by recording spies in
/// tests.
pub trait Executor {
    /// Run the command to completion.
    ///
    /// An `Err` means the process could not be run at all; a non-zero exit is
    /// reported through the returned outcome.
    fn run(&mut self, phase: Phase, cmd: &ProcessBuilder) -> Result<ProcessOutcome, SetupError>;
}

/// Executor that spawns real processes and blocks until they exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run(&mut self, phase: Phase, cmd: &ProcessBuilder) -> Result<ProcessOutcome, SetupError> {
        tracing::debug!("running `{}`", cmd.display_command());

        let status = cmd.status().map_err(|source| SetupError::ToolSpawn {
            phase,
            program: cmd.get_program().display().to_string(),
            source,
        })?;

        Ok(ProcessOutcome::from_status(status))
    }
}

/// Run a command and require a zero exit status.
pub fn run_checked(
    exec: &mut dyn Executor,
    phase: Phase,
    cmd: &ProcessBuilder,
) -> Result<ProcessOutcome, SetupError> {
    let outcome = exec.run(phase, cmd)?;
    if !outcome.success() {
        return Err(SetupError::ToolFailed {
            phase,
            command: cmd.display_command(),
            code: outcome.exit_code,
        });
    }
    Ok(outcome)
}

/// Find an executable in PATH.
pub fn find_executable(name: impl AsRef<OsStr>) -> Option<PathBuf> {
    which::which(name).ok()
}
