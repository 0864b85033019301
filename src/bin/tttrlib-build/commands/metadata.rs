//! `tttrlib-build metadata` command

use anyhow::Result;

use crate::cli::{GlobalArgs, MetadataArgs, MetadataFormat};
use tttrlib_build::core::{read_version, PackageMetadata};

pub fn execute(args: MetadataArgs, globals: &GlobalArgs) -> Result<()> {
    let (_ctx, opts) = super::setup(globals)?;

    let version = read_version(&opts.header, &opts.version_macro)?;
    let metadata = PackageMetadata::tttrlib(version);

    let output = match args.format {
        MetadataFormat::Json => metadata.to_json()?,
        MetadataFormat::Toml => metadata.to_toml()?,
    };
    println!("{}", output.trim_end());

    Ok(())
}
