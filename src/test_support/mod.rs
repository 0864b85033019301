//! Test utilities and mocks for unit tests.
//!
//! The main piece is [`RecordingExecutor`], a process-invocation spy: it
//! records every command it is asked to run and answers with scripted
//! outcomes instead of spawning anything.
//!
//! # Example
//!
//! ```rust,ignore
//! use tttrlib_build::test_support::{MockProcessOutput, RecordingExecutor};
//!
//! let mut exec = RecordingExecutor::new();
//! exec.expect_prefix("doxygen", MockProcessOutput::success(""));
//! exec.expect_contains("doxy2swig.py", MockProcessOutput::failure(1, "bad xml"));
//! ```

pub mod fixtures;

use std::io;

use crate::util::errors::{Phase, SetupError};
use crate::util::process::{Executor, ProcessBuilder, ProcessOutcome, StreamOutput};

pub use fixtures::*;

/// Mock process output for testing command execution.
#[derive(Debug, Clone)]
pub struct MockProcessOutput {
    /// Exit status code (0 = success).
    pub status: i32,
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
}

impl MockProcessOutput {
    /// Create a successful output with the given stdout.
    pub fn success(stdout: impl Into<String>) -> Self {
        MockProcessOutput {
            status: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Create a failure output with the given stderr and status code.
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        MockProcessOutput {
            status,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    fn to_outcome(&self) -> ProcessOutcome {
        ProcessOutcome {
            exit_code: Some(self.status),
            output: StreamOutput::Captured {
                stdout: self.stdout.clone(),
                stderr: self.stderr.clone(),
            },
        }
    }
}

impl Default for MockProcessOutput {
    fn default() -> Self {
        MockProcessOutput::success("")
    }
}

/// Pattern for matching commands in [`RecordingExecutor`].
#[derive(Debug, Clone)]
pub enum CommandPattern {
    /// Exact match on full command string.
    Exact(String),
    /// Match if command starts with prefix.
    StartsWith(String),
    /// Match if command contains substring.
    Contains(String),
    /// Match using a regex pattern.
    Regex(String),
}

impl CommandPattern {
    /// Check if this pattern matches the given command.
    pub fn matches(&self, cmd: &str) -> bool {
        match self {
            CommandPattern::Exact(s) => cmd == s,
            CommandPattern::StartsWith(s) => cmd.starts_with(s),
            CommandPattern::Contains(s) => cmd.contains(s),
            CommandPattern::Regex(pattern) => regex::Regex::new(pattern)
                .map(|re| re.is_match(cmd))
                .unwrap_or(false),
        }
    }
}

/// Expectation for a command execution.
#[derive(Debug, Clone)]
pub struct CommandExpectation {
    /// Pattern to match against commands.
    pub pattern: CommandPattern,
    /// Output to return when matched.
    pub output: MockProcessOutput,
    /// Number of times this expectation can be used (None = unlimited).
    pub times: Option<usize>,
    /// Number of times this expectation has been used.
    pub used: usize,
}

impl CommandExpectation {
    /// Create a new expectation.
    pub fn new(pattern: CommandPattern, output: MockProcessOutput) -> Self {
        CommandExpectation {
            pattern,
            output,
            times: None,
            used: 0,
        }
    }

    /// Set the number of times this expectation can be used.
    pub fn times(mut self, n: usize) -> Self {
        self.times = Some(n);
        self
    }

    /// Check if this expectation can still be used.
    pub fn available(&self) -> bool {
        match self.times {
            Some(n) => self.used < n,
            None => true,
        }
    }
}

/// Process-invocation spy.
///
/// Records every command and answers with the first matching expectation.
/// Commands with no match get the default output, or fail to spawn when no
/// default is set.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    expectations: Vec<CommandExpectation>,
    calls: Vec<ProcessBuilder>,
    phases: Vec<Phase>,
    default_output: Option<MockProcessOutput>,
}

impl RecordingExecutor {
    /// Create a spy with no expectations.
    pub fn new() -> Self {
        RecordingExecutor::default()
    }

    /// Create a spy where every command succeeds.
    pub fn succeeding() -> Self {
        let mut exec = RecordingExecutor::new();
        exec.set_default(MockProcessOutput::success(""));
        exec
    }

    /// Add an expectation for an exact command match.
    pub fn expect(&mut self, cmd: &str, output: MockProcessOutput) -> &mut Self {
        self.expect_pattern(CommandExpectation::new(
            CommandPattern::Exact(cmd.to_string()),
            output,
        ))
    }

    /// Add an expectation for a command starting with a prefix.
    pub fn expect_prefix(&mut self, prefix: &str, output: MockProcessOutput) -> &mut Self {
        self.expect_pattern(CommandExpectation::new(
            CommandPattern::StartsWith(prefix.to_string()),
            output,
        ))
    }

    /// Add an expectation for a command containing a substring.
    pub fn expect_contains(&mut self, substring: &str, output: MockProcessOutput) -> &mut Self {
        self.expect_pattern(CommandExpectation::new(
            CommandPattern::Contains(substring.to_string()),
            output,
        ))
    }

    /// Add a custom expectation.
    pub fn expect_pattern(&mut self, expectation: CommandExpectation) -> &mut Self {
        self.expectations.push(expectation);
        self
    }

    /// Set a default output for commands that don't match any expectation.
    pub fn set_default(&mut self, output: MockProcessOutput) -> &mut Self {
        self.default_output = Some(output);
        self
    }

    /// Every command run so far, in order.
    pub fn calls(&self) -> &[ProcessBuilder] {
        &self.calls
    }

    /// Phase of every command run so far, in order.
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Command lines run so far, in order.
    pub fn commands(&self) -> Vec<String> {
        self.calls
            .iter()
            .map(ProcessBuilder::display_command)
            .collect()
    }

    /// Verify that all expectations with a specific count were satisfied.
    pub fn verify(&self) -> anyhow::Result<()> {
        for (i, exp) in self.expectations.iter().enumerate() {
            if let Some(expected) = exp.times {
                if exp.used != expected {
                    anyhow::bail!(
                        "expectation {} was used {} times, expected {}",
                        i,
                        exp.used,
                        expected
                    );
                }
            }
        }
        Ok(())
    }
}

impl Executor for RecordingExecutor {
    fn run(&mut self, phase: Phase, cmd: &ProcessBuilder) -> Result<ProcessOutcome, SetupError> {
        let full_cmd = cmd.display_command();
        self.calls.push(cmd.clone());
        self.phases.push(phase);

        for exp in &mut self.expectations {
            if exp.pattern.matches(&full_cmd) && exp.available() {
                exp.used += 1;
                return Ok(exp.output.to_outcome());
            }
        }

        if let Some(ref default) = self.default_output {
            return Ok(default.to_outcome());
        }

        Err(SetupError::ToolSpawn {
            phase,
            program: cmd.get_program().display().to_string(),
            source: io::Error::new(
                io::ErrorKind::NotFound,
                format!("unexpected command: {}", full_cmd),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_executor_basic() {
        let mut exec = RecordingExecutor::new();
        exec.expect("doxygen", MockProcessOutput::success(""));
        exec.expect_prefix("cmake", MockProcessOutput::failure(2, "CMake Error"));

        let ok = exec
            .run(Phase::DocExtract, &ProcessBuilder::new("doxygen"))
            .unwrap();
        assert!(ok.success());

        let failed = exec
            .run(Phase::Configure, &ProcessBuilder::new("cmake").arg("/src"))
            .unwrap();
        assert_eq!(failed.exit_code, Some(2));

        assert_eq!(exec.commands(), vec!["doxygen", "cmake /src"]);
        assert_eq!(exec.phases(), vec![Phase::DocExtract, Phase::Configure]);
    }

    #[test]
    fn test_recording_executor_unexpected() {
        let mut exec = RecordingExecutor::new();
        let result = exec.run(Phase::Build, &ProcessBuilder::new("make"));
        assert!(matches!(result, Err(SetupError::ToolSpawn { .. })));
        assert_eq!(exec.calls().len(), 1);
    }

    #[test]
    fn test_expectation_times_and_regex() {
        let mut exec = RecordingExecutor::new();
        exec.expect_pattern(
            CommandExpectation::new(
                CommandPattern::Regex(r"^cmake --build \. --config (Debug|Release)".to_string()),
                MockProcessOutput::success(""),
            )
            .times(1),
        );
        exec.set_default(MockProcessOutput::failure(1, ""));

        let cmd = ProcessBuilder::new("cmake").args(["--build", ".", "--config", "Release"]);
        assert!(exec.run(Phase::Build, &cmd).unwrap().success());
        assert!(!exec.run(Phase::Build, &cmd).unwrap().success());
        exec.verify().unwrap();
    }
}
