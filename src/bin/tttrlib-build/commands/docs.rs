//! `tttrlib-build docs` command

use anyhow::Result;

use crate::cli::GlobalArgs;
use tttrlib_build::ops::{DocOutcome, DocumentationGenerator};
use tttrlib_build::util::process::SystemExecutor;

pub fn execute(globals: &GlobalArgs) -> Result<()> {
    let (ctx, opts) = super::setup(globals)?;

    let generator = DocumentationGenerator::new(&opts.docs, ctx.env());
    match generator.run(&mut SystemExecutor)? {
        DocOutcome::Skipped => eprintln!(
            "{} already exists, nothing to do",
            opts.docs.bridge_file.display()
        ),
        DocOutcome::Generated => {
            eprintln!("    Generated {}", opts.docs.bridge_file.display())
        }
    }

    Ok(())
}
