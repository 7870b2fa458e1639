//! `catomic-gen list` command

use anyhow::Result;

use crate::cli::ListArgs;
use catomic_gen::ops::{load_registry, RegistryOptions};
use catomic_gen::util::Config;

pub fn execute(args: ListArgs, config: &Config) -> Result<()> {
    let registry = load_registry(
        config,
        &RegistryOptions {
            manifest_dirs: args.manifests,
            ..Default::default()
        },
    )?;

    for name in registry.names() {
        println!("{}", name);
    }

    Ok(())
}
