//! `catomic-gen tree` command

use anyhow::Result;

use crate::cli::TreeArgs;
use catomic_gen::ops::{format_package_tree, format_target_tree, load_registry, RegistryOptions};
use catomic_gen::packages::catomic;
use catomic_gen::util::Config;

pub fn execute(args: TreeArgs, config: &Config) -> Result<()> {
    let registry = load_registry(
        config,
        &RegistryOptions {
            entry_point: args.no_entry.then_some(false),
            manifest_dirs: args.manifests,
        },
    )?;

    let name = args.package.as_deref().unwrap_or(catomic::NAME);
    let package = registry.get_package(name)?;

    let tree = if args.targets {
        format_target_tree(&package, args.depth)
    } else {
        format_package_tree(&package, args.depth)
    };
    print!("{}", tree);

    Ok(())
}
