//! `tttrlib-build doctor` command

use anyhow::Result;

use crate::cli::GlobalArgs;
use tttrlib_build::ops::{doctor, format_report};

pub fn execute(globals: &GlobalArgs) -> Result<()> {
    let (ctx, opts) = super::setup(globals)?;

    let report = doctor(&ctx, &opts);
    print!("{}", format_report(&report, ctx.is_verbose()));

    // Exit with error code if required checks failed
    if !report.all_required_passed() {
        std::process::exit(1);
    }

    Ok(())
}
