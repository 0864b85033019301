//! `tttrlib-build build` command

use anyhow::{Context, Result};

use crate::cli::{BuildArgs, GlobalArgs};
use tttrlib_build::builder::BuildMode;
use tttrlib_build::ops::PackagingDriver;
use tttrlib_build::util::fs::resolve_against;
use tttrlib_build::util::process::SystemExecutor;

pub fn execute(args: BuildArgs, globals: &GlobalArgs) -> Result<()> {
    let (ctx, mut opts) = super::setup(globals)?;

    // CLI overrides config
    if let Some(dir) = &args.build_temp {
        opts.build_temp = resolve_against(ctx.project_root(), dir);
    }
    if let Some(dir) = &args.ext_dir {
        opts.ext_dir = resolve_against(ctx.project_root(), dir);
    }
    opts.mode = BuildMode::from_debug_flag(args.debug);
    opts.plan_only = args.plan;

    let mut driver = PackagingDriver::new(&ctx, &opts);
    let report = driver.run(&mut SystemExecutor)?;

    if args.plan {
        let json = serde_json::to_string_pretty(&report.configurations)
            .context("failed to serialize build plan")?;
        println!("{}", json);
    } else {
        eprintln!(
            "    Finished {} {} [{}] -> {}",
            report.metadata.name,
            report.version,
            opts.mode,
            opts.ext_dir.display()
        );
    }

    Ok(())
}
