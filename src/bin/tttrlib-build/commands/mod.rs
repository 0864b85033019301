//! Command implementations

pub mod build;
pub mod completions;
pub mod docs;
pub mod doctor;
pub mod metadata;
pub mod version;

use anyhow::Result;

use crate::cli::GlobalArgs;
use tttrlib_build::ops::SetupOptions;
use tttrlib_build::util::GlobalContext;

/// Create the context and resolve the merged configuration against it.
pub fn setup(globals: &GlobalArgs) -> Result<(GlobalContext, SetupOptions)> {
    let mut ctx = GlobalContext::new(globals.project_dir.as_deref())?;
    ctx.set_verbose(globals.verbose);

    let config = ctx.load_config()?;
    let opts = SetupOptions::from_config(&config, ctx.project_root());

    Ok((ctx, opts))
}
