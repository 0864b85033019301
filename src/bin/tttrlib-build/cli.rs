//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// tttrlib-build - build the tttrlib Python extension with CMake
#[derive(Parser)]
#[command(name = "tttrlib-build")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Root of the tttrlib source tree (defaults to the current directory)
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Flags shared by every command.
    pub fn globals(&self) -> GlobalArgs {
        GlobalArgs {
            verbose: self.verbose,
            project_dir: self.project_dir.clone(),
        }
    }
}

/// Flags shared by every command.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub verbose: bool,
    pub project_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate documentation if needed, then build the extension
    Build(BuildArgs),

    /// Generate the SWIG documentation bridge if it is missing
    Docs,

    /// Print the version defined in the info header
    Version,

    /// Print the package metadata
    Metadata(MetadataArgs),

    /// Check that the project and external tools are ready
    Doctor,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Build the Debug configuration instead of Release
    #[arg(long)]
    pub debug: bool,

    /// Print the planned CMake arguments as JSON (no CMake run)
    #[arg(long)]
    pub plan: bool,

    /// CMake working directory
    #[arg(long, value_name = "DIR")]
    pub build_temp: Option<PathBuf>,

    /// Output directory for the compiled module
    #[arg(long, value_name = "DIR")]
    pub ext_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct MetadataArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: MetadataFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetadataFormat {
    Json,
    Toml,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
