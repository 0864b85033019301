//! `tttrlib-build version` command

use anyhow::Result;

use crate::cli::GlobalArgs;
use tttrlib_build::core::read_version;

pub fn execute(globals: &GlobalArgs) -> Result<()> {
    let (_ctx, opts) = super::setup(globals)?;

    let version = read_version(&opts.header, &opts.version_macro)?;
    println!("{}", version);

    Ok(())
}
