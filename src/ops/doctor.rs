//! Environment and project health checks.
//!
//! The `doctor` command verifies, without building anything, that a build
//! could start: the info header is readable, the source tree is a CMake
//! project, and the external tools are on PATH.
//!
//! ## Checks Performed
//!
//! - Info header and the version it defines
//! - Top-level CMakeLists.txt
//! - CMake (required)
//! - Doxygen and Python (required only while the documentation bridge is missing)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::builder::cmake::is_cmake_project;
use crate::builder::plan::PREFIX_ENV_VAR;
use crate::core::version::read_version;
use crate::ops::setup::SetupOptions;
use crate::util::context::GlobalContext;
use crate::util::env::EnvSnapshot;
use crate::util::process::{find_executable, ProcessBuilder};

/// Result of a single health check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check
    pub name: String,

    /// Whether the check passed
    pub passed: bool,

    /// Human-readable status message
    pub message: String,

    /// Path to the tool or file (if applicable)
    pub path: Option<PathBuf>,

    /// Version string (if applicable)
    pub version: Option<String>,

    /// How long the check took
    pub duration: Duration,

    /// Whether this check is required or optional
    pub required: bool,
}

impl CheckResult {
    /// Create a passing check result.
    pub fn pass(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            name: name.into(),
            passed: true,
            message: message.into(),
            path: None,
            version: None,
            duration: Duration::ZERO,
            required: true,
        }
    }

    /// Create a failing check result.
    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        CheckResult {
            passed: false,
            ..CheckResult::pass(name, message)
        }
    }

    /// Mark this check as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Set whether the check is required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the tool path.
    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }

    /// Set the version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Summary of all health checks.
#[derive(Debug, Clone, Default)]
pub struct DoctorReport {
    /// Individual check results
    pub checks: Vec<CheckResult>,

    /// Total time taken
    pub total_duration: Duration,

    /// Environment information
    pub environment: BTreeMap<String, String>,
}

impl DoctorReport {
    /// Create a new empty report.
    pub fn new() -> Self {
        DoctorReport::default()
    }

    /// Add a check result.
    pub fn add(&mut self, check: CheckResult) {
        self.checks.push(check);
    }

    /// Check if all required checks passed.
    pub fn all_required_passed(&self) -> bool {
        self.checks.iter().filter(|c| c.required).all(|c| c.passed)
    }

    /// Get the count of passed checks.
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Get the count of failed checks.
    pub fn failed_count(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }

    /// Get the count of required failed checks.
    pub fn required_failed_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| c.required && !c.passed)
            .count()
    }
}

/// Run every check against the resolved options.
pub fn doctor(ctx: &GlobalContext, opts: &SetupOptions) -> DoctorReport {
    let start = Instant::now();
    let mut report = DoctorReport::new();

    report
        .environment
        .insert("os".to_string(), ctx.host().to_string());
    report
        .environment
        .insert("arch".to_string(), std::env::consts::ARCH.to_string());
    if let Some(prefix) = ctx.env().get(PREFIX_ENV_VAR) {
        report
            .environment
            .insert(PREFIX_ENV_VAR.to_string(), prefix.to_string());
    }

    report.add(check_header(opts));
    report.add(check_cmake_project(&opts.source_dir));
    report.add(check_tool("CMake", &opts.cmake, true, ctx.env()));

    let docs_needed = !opts.docs.bridge_file.exists();
    report.add(check_bridge_file(&opts.docs.bridge_file));
    report.add(check_tool("Doxygen", &opts.docs.doxygen, docs_needed, ctx.env()));
    report.add(check_tool("Python", &opts.docs.python, docs_needed, ctx.env()));

    report.total_duration = start.elapsed();
    report
}

fn check_header(opts: &SetupOptions) -> CheckResult {
    let start = Instant::now();

    match read_version(&opts.header, &opts.version_macro) {
        Ok(version) => CheckResult::pass("Info header", format!("version {}", version))
            .with_path(opts.header.clone())
            .with_version(version.as_str())
            .with_duration(start.elapsed()),
        Err(err) => CheckResult::fail("Info header", err.to_string())
            .with_path(opts.header.clone())
            .with_duration(start.elapsed()),
    }
}

fn check_cmake_project(source_dir: &Path) -> CheckResult {
    if is_cmake_project(source_dir) {
        CheckResult::pass("CMake project", "CMakeLists.txt found")
            .with_path(source_dir.join("CMakeLists.txt"))
    } else {
        CheckResult::fail(
            "CMake project",
            format!("no CMakeLists.txt in {}", source_dir.display()),
        )
    }
}

fn check_bridge_file(bridge_file: &Path) -> CheckResult {
    let check = if bridge_file.exists() {
        CheckResult::pass("Documentation bridge", "present, documentation step is skipped")
    } else {
        CheckResult::pass(
            "Documentation bridge",
            "missing, will be generated with doxygen and doxy2swig",
        )
    };
    check.with_path(bridge_file.to_path_buf()).optional()
}

/// Check that a tool resolves to an executable.
fn check_tool(name: &str, program: &Path, required: bool, env: &EnvSnapshot) -> CheckResult {
    let start = Instant::now();

    match find_executable(program) {
        Some(path) => {
            let mut check = CheckResult::pass(name, format!("{} is available", name))
                .required(required)
                .with_duration(start.elapsed());
            if let Some(version) = tool_version(&path, env) {
                check = check.with_version(version);
            }
            check.with_path(path)
        }
        None => {
            let reason = if required { "" } else { " (optional)" };
            CheckResult::fail(
                name,
                format!("`{}` not found in PATH{}", program.display(), reason),
            )
            .required(required)
            .with_duration(start.elapsed())
        }
    }
}

/// First non-empty line of `<tool> --version`.
fn tool_version(path: &Path, env: &EnvSnapshot) -> Option<String> {
    let output = ProcessBuilder::new(path)
        .arg("--version")
        .env(env)
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

/// Format the doctor report for display.
pub fn format_report(report: &DoctorReport, verbose: bool) -> String {
    let mut lines = vec![
        "tttrlib-build doctor".to_string(),
        "====================".to_string(),
        String::new(),
    ];

    if verbose {
        lines.push("Environment:".to_string());
        for (key, value) in &report.environment {
            lines.push(format!("  {}: {}", key, value));
        }
        lines.push(String::new());
    }

    lines.push("Checks:".to_string());
    for check in &report.checks {
        let status = if check.passed { "[OK]" } else { "[!!]" };
        let required = if check.required { "" } else { " (optional)" };
        lines.push(format!("  {} {}{}", status, check.name, required));

        if verbose || !check.passed {
            lines.push(format!("      {}", check.message));
        }
        if verbose {
            if let Some(path) = &check.path {
                lines.push(format!("      Path: {}", path.display()));
            }
            if let Some(version) = &check.version {
                lines.push(format!("      Version: {}", version));
            }
        }
    }
    lines.push(String::new());

    let failed = report.failed_count();
    let required_failed = report.required_failed_count();
    lines.push(format!(
        "Summary: {} passed, {} failed",
        report.passed_count(),
        failed
    ));

    lines.push(String::new());
    if required_failed > 0 {
        lines.push(format!(
            "Warning: {} required check(s) failed. The build will not succeed.",
            required_failed
        ));
    } else if failed > 0 {
        lines.push(format!(
            "All required checks passed. {} optional check(s) failed.",
            failed
        ));
    } else {
        lines.push("All checks passed. Ready to build.".to_string());
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}
