//! `catomic-gen generate` command

use std::path::Path;

use anyhow::Result;

use crate::cli::GenerateArgs;
use catomic_gen::ops::{generate, GenerateOptions, RegistryOptions};
use catomic_gen::util::Config;
use catomic_gen::GeneratorKind;

pub fn execute(args: GenerateArgs, config: &Config, cwd: &Path) -> Result<()> {
    let mut opts = GenerateOptions {
        kind: args
            .format
            .as_deref()
            .map(str::parse::<GeneratorKind>)
            .transpose()?,
        output_dir: args.out,
        workspace_root: args.workspace_root,
        registry: RegistryOptions {
            entry_point: args.no_entry.then_some(false),
            manifest_dirs: args.manifests,
        },
        dry_run: args.dry_run,
        ..Default::default()
    };
    if let Some(package) = args.package {
        opts.package = package;
    }

    let report = generate(config, cwd, &opts)?;

    let verb = if report.dry_run { "Would write" } else { "Wrote" };
    for path in &report.written {
        println!("{:>12} {}", verb, path.display());
    }
    for path in &report.unchanged {
        println!("{:>12} {}", "Unchanged", path.display());
    }
    println!(
        "{:>12} {} ({} targets)",
        "Generated",
        opts.package,
        report.targets
    );

    Ok(())
}
