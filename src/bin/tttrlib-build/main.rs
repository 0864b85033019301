//! tttrlib-build CLI - build orchestration for the tttrlib Python extension

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tttrlib_build::util::diagnostic::emit;
use tttrlib_build::SetupError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli) {
        match e.chain().find_map(|cause| cause.downcast_ref::<SetupError>()) {
            Some(err) => emit(&err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("tttrlib_build=debug")
    } else {
        EnvFilter::new("tttrlib_build=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let globals = cli.globals();

    // Execute command
    match cli.command {
        Commands::Build(args) => commands::build::execute(args, &globals),
        Commands::Docs => commands::docs::execute(&globals),
        Commands::Version => commands::version::execute(&globals),
        Commands::Metadata(args) => commands::metadata::execute(args, &globals),
        Commands::Doctor => commands::doctor::execute(&globals),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
